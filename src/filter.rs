use crate::entry::EntryKind;

/// Restricts the kind of entries a search returns.
///
/// The same predicate is applied to stat results and to walked entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    /// Files, directories and anything else.
    #[default]
    Any,

    /// Regular files only.
    FileOnly,

    /// Directories only.
    DirOnly,
}

impl TypeFilter {
    /// Returns `true` if an entry of `kind` passes this filter.
    ///
    /// Unresolved symlinks and special files only pass [`TypeFilter::Any`].
    pub fn matches(self, kind: EntryKind) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::FileOnly => kind == EntryKind::File,
            TypeFilter::DirOnly => kind == EntryKind::Dir,
        }
    }
}
