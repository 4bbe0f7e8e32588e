use std::sync::Arc;

use crate::entry::{Entry, EntryKind};
use crate::error::FinderError;

/// The filesystem a search runs against.
///
/// Implement this to search anything shaped like a directory tree: an OS
/// directory ([`DirFs`](crate::DirFs)), an in-memory tree
/// ([`MemFs`](crate::MemFs)), an archive, a remote store.
///
/// Paths are slash-separated strings relative to the filesystem's own root.
///
/// # Object Safety
///
/// `FileSystem` is object-safe, so `walk()` returns a boxed iterator rather
/// than `impl Iterator`.
///
/// # Thread Safety
///
/// `Send + Sync` are required: one filesystem is shared read-only by every
/// worker of a search.
///
/// # Error Handling
///
/// "Does not exist" must be distinguishable from real failures. `stat`
/// reports it as `Ok(None)`; `walk` yields [`FinderError::NotFound`] for a
/// missing root. Everything else (permission denied, device errors) is a
/// real error and fails the search.
pub trait FileSystem: Send + Sync {
    /// Look up a single path. `Ok(None)` means it does not exist.
    fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError>;

    /// Traverse everything reachable from `root`, depth first, starting with
    /// `root` itself at depth 0.
    ///
    /// Entry paths are root-joined (`root/child/grandchild`). Callers stop the
    /// traversal early by dropping the iterator.
    fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError> {
        (**self).stat(path)
    }

    fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a> {
        (**self).walk(root)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError> {
        (**self).stat(path)
    }

    fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a> {
        (**self).walk(root)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError> {
        (**self).stat(path)
    }

    fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a> {
        (**self).walk(root)
    }
}
