use crate::filter::TypeFilter;
use crate::matcher::SearchTask;

/// An immutable search: every root crossed with every name pattern.
///
/// Roots may repeat or nest inside one another; each is searched
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    roots: Vec<String>,
    patterns: Vec<String>,
    type_filter: TypeFilter,
}

impl SearchRequest {
    pub fn new<R, P>(roots: R, patterns: P, type_filter: TypeFilter) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            type_filter,
        }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    /// Number of (root, pattern) tasks this request expands to.
    pub fn task_count(&self) -> usize {
        self.roots.len() * self.patterns.len()
    }

    /// A request with no roots or no patterns trivially matches nothing.
    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }

    /// The cartesian product of roots and patterns, root-major.
    pub(crate) fn tasks(&self) -> impl Iterator<Item = SearchTask<'_>> + '_ {
        self.roots.iter().flat_map(move |root| {
            self.patterns.iter().map(move |pattern| SearchTask {
                root: root.as_str(),
                pattern: pattern.as_str(),
            })
        })
    }
}
