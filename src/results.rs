use std::time::Duration;

/// The output of a completed search.
///
/// `paths` is sorted in ascending byte order. A path matched by several
/// (root, pattern) pairs appears once per match; duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// Matched paths, sorted.
    pub paths: Vec<String>,

    /// Search statistics.
    pub stats: SearchStats,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl IntoIterator for ResultSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Statistics for a completed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// (root, pattern) tasks that ran.
    pub tasks: usize,

    /// Tasks resolved with a single stat.
    pub probes: usize,

    /// Tasks resolved with a glob walk.
    pub walks: usize,

    /// Entries visited by glob walks, roots excluded.
    pub entries: usize,

    /// Wall-clock time from search start to completion.
    pub duration: Duration,
}
