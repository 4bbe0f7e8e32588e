use std::io;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::entry::{Entry, EntryKind};
use crate::error::FinderError;
use crate::path;
use crate::traits::FileSystem;

// ---------------------------------------------------------------------------
// DirFs
// ---------------------------------------------------------------------------

/// A [`FileSystem`] rooted at a directory on the OS filesystem.
///
/// Search paths are slash-separated and relative to `base`, so searching
/// root `etc` on `DirFs::new("/")` reports `etc/config.yaml`, not an absolute
/// path.
///
/// Walks use the `ignore` walker with every ignore rule disabled: hidden
/// files, `.gitignore`d files and files on other mounts are all visited.
/// Siblings are visited in file-name order.
#[derive(Debug, Clone)]
pub struct DirFs {
    base: PathBuf,
    follow_links: bool,
}

impl DirFs {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            follow_links: false,
        }
    }

    /// Resolve symbolic links for both stat and walk.
    ///
    /// Off by default, in which case links are reported as
    /// [`EntryKind::Symlink`] and only pass the `Any` type filter.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Map a search path onto the OS filesystem.
    ///
    /// A leading `/` is relative to `base`; a path that climbs above `base`
    /// with `..` is rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, FinderError> {
        let cleaned = path::clean(path);
        match cleaned.trim_start_matches('/') {
            "" | "." => Ok(self.base.clone()),
            rel if rel == ".." || rel.starts_with("../") => {
                Err(FinderError::InvalidPath(path.to_string()))
            }
            rel => Ok(self.base.join(rel)),
        }
    }

    /// Best-effort search-style path for an OS path, used in error messages.
    fn display(&self, p: &Path) -> String {
        match p.strip_prefix(&self.base) {
            Ok(rel) => slash_path(rel),
            Err(_) => p.to_string_lossy().into_owned(),
        }
    }
}

impl FileSystem for DirFs {
    fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError> {
        if path.is_empty() {
            return Ok(None);
        }

        let target = self.resolve(path)?;
        let meta = if self.follow_links {
            std::fs::metadata(&target)
        } else {
            std::fs::symlink_metadata(&target)
        };

        match meta {
            Ok(m) => Ok(Some(EntryKind::from_file_type(m.file_type()))),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(FinderError::from_io(path, e)),
        }
    }

    fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a> {
        let root_path = path::clean(root);
        let walk_root = match self.resolve(root) {
            Ok(p) => p,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        let mut builder = WalkBuilder::new(&walk_root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(self.follow_links)
            .same_file_system(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let walker = builder.build();

        Box::new(walker.map(move |res| match res {
            Ok(dent) => {
                let kind = dent
                    .file_type()
                    .map(EntryKind::from_file_type)
                    .unwrap_or(EntryKind::Other);

                let rel = dent
                    .path()
                    .strip_prefix(&walk_root)
                    .map(slash_path)
                    .unwrap_or_default();
                let entry_path = match rel.as_str() {
                    "" | "." => root_path.clone(),
                    rel => path::join(&root_path, rel),
                };

                Ok(Entry::new(entry_path, kind, dent.depth()))
            }
            Err(e) => Err(map_ignore_error(e, &root_path, self)),
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A path that cannot exist: missing, or a component is not a directory.
fn is_absent(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

fn slash_path(p: &Path) -> String {
    let parts: Vec<String> = p
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Map an `ignore::Error` to a [`FinderError`], unwrapping its path/depth
/// wrappers. `at` is the path reported when the error carries none.
fn map_ignore_error(e: ignore::Error, at: &str, fs: &DirFs) -> FinderError {
    match e {
        ignore::Error::WithPath { path, err } => {
            let at = fs.display(&path);
            map_ignore_error(*err, &at, fs)
        }
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            map_ignore_error(*err, at, fs)
        }
        ignore::Error::Loop { child, .. } => FinderError::SymlinkLoop(fs.display(&child)),
        ignore::Error::Io(io_err) if is_absent(&io_err) => FinderError::NotFound(at.to_string()),
        ignore::Error::Io(io_err) => FinderError::from_io(at, io_err),
        other => FinderError::Walk(other.to_string()),
    }
}
