/// A single item produced by a [`FileSystem`](crate::traits::FileSystem) walk.
///
/// `path` is always the root-joined, slash-separated path of the entry (for
/// a walk started at `foo`, a grandchild is reported as `foo/bat/bar`), never
/// a path relative to the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path to the entry.
    pub path: String,

    /// The entry's base name.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// How deep in the traversal this entry was found. Root = 0.
    pub depth: usize,
}

impl Entry {
    /// Build an entry, deriving `name` from the last path segment.
    pub fn new(path: impl Into<String>, kind: EntryKind, depth: usize) -> Self {
        let path = path.into();
        let name = crate::path::base(&path).to_string();
        Self {
            path,
            name,
            kind,
            depth,
        }
    }
}

/// The kind of a filesystem object.
///
/// Both a single-path stat and a directory walk report this same
/// classification, so the type filter has one input shape for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link that the filesystem layer did not resolve.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    /// Classify a `std::fs::FileType`.
    pub fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        }
    }
}
