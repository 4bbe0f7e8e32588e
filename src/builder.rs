use crate::engine::{Searcher, DEFAULT_CONCURRENCY};
use crate::error::FinderError;
use crate::filter::TypeFilter;
use crate::request::SearchRequest;
use crate::results::ResultSet;
use crate::traits::FileSystem;

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`globfind::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) with the
/// filesystem to search.
///
/// # Example
///
/// ```rust,ignore
/// let results = globfind::search()
///     .roots(["home/user", "etc"])
///     .name("config.*")
///     .type_filter(TypeFilter::FileOnly)
///     .concurrency(8)
///     .run(&DirFs::new("/"))?;
/// ```
#[derive(Debug, Clone)]
pub struct SearchBuilder {
    roots:       Vec<String>,
    patterns:    Vec<String>,
    type_filter: TypeFilter,
    concurrency: usize,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            roots:       Vec::new(),
            patterns:    Vec::new(),
            type_filter: TypeFilter::Any,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl SearchBuilder {
    // ── Roots ─────────────────────────────────────────────────────────────

    /// Add a directory to search in.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Add several directories to search in, in order.
    pub fn roots<I>(mut self, roots: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    // ── Names ─────────────────────────────────────────────────────────────

    /// Add a name to look for under every root.
    ///
    /// A plain name (`config.yaml`, or a nested one like `conf.d/app.yaml`)
    /// is checked directly. A name containing any of `* ? [ ] \ ^` is a glob
    /// matched against base names across each root's whole subtree.
    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add several names, in order.
    pub fn names<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Restrict results to files or directories. [`TypeFilter::Any`] by default.
    pub fn type_filter(mut self, filter: TypeFilter) -> Self {
        self.type_filter = filter;
        self
    }

    /// Maximum number of (root, name) tasks running at once.
    ///
    /// Defaults to [`DEFAULT_CONCURRENCY`]. `0` is rejected by `run()`.
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Freeze the configured roots, names and filter into a request.
    pub fn build(&self) -> SearchRequest {
        SearchRequest::new(self.roots.iter().cloned(), self.patterns.iter().cloned(), self.type_filter)
    }

    /// Execute the search against `fs`.
    ///
    /// Blocks until every task finished or the first one failed.
    ///
    /// # Errors
    ///
    /// Returns the first error any task hit (filesystem failure, malformed
    /// glob) or [`FinderError::InvalidConcurrency`] for a zero bound. A
    /// search never returns partial results.
    pub fn run<F: FileSystem + ?Sized>(&self, fs: &F) -> Result<ResultSet, FinderError> {
        Searcher::new()
            .with_concurrency(self.concurrency)
            .find(fs, &self.build())
    }
}
