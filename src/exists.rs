use crate::error::FinderError;
use crate::filter::TypeFilter;
use crate::traits::FileSystem;

/// Check whether `path` exists and its kind passes `filter`.
///
/// A missing path (or the empty path) is `Ok(false)`, not an error. `"."` is
/// the filesystem root and always a directory.
///
/// ```rust
/// use globfind::{exists, MemFs, TypeFilter};
///
/// let fs = MemFs::new().with_file("dir/subfile.txt");
/// assert!(exists(&fs, "dir", TypeFilter::DirOnly).unwrap());
/// assert!(!exists(&fs, "dir", TypeFilter::FileOnly).unwrap());
/// assert!(!exists(&fs, "nope", TypeFilter::Any).unwrap());
/// ```
pub fn exists<F: FileSystem + ?Sized>(fs: &F, path: &str, filter: TypeFilter) -> Result<bool, FinderError> {
    match fs.stat(path) {
        Ok(Some(kind)) => Ok(filter.matches(kind)),
        Ok(None) => Ok(false),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
