//! # globfind
//!
//! Find files and directories across many roots at once, by literal name or
//! shell glob, in parallel.
//!
//! globfind crosses every search root with every name pattern and runs each
//! (root, pattern) pair as an independent task on a bounded worker pool.
//! A plain name is resolved with a single stat (`etc` + `config.yaml` →
//! `etc/config.yaml` if it exists); a name containing glob characters walks
//! the root's entire subtree and matches entry base names. Results are merged
//! and sorted, so output is deterministic whatever order tasks finish in.
//!
//! It owns the search engine, the type filter and the [`FileSystem`]
//! contract. It ships an OS-backed [`DirFs`] and an in-memory [`MemFs`].
//!
//! # Quick Start
//!
//! ```rust
//! use globfind::{MemFs, TypeFilter};
//!
//! let fs = MemFs::new()
//!     .with_file("home/user/config.yaml")
//!     .with_file("etc/config.yaml")
//!     .with_file("etc/app/config.toml");
//!
//! // Direct lookup: is there a config.yaml in either place?
//! let results = globfind::search()
//!     .roots(["home/user", "etc"])
//!     .name("config.yaml")
//!     .type_filter(TypeFilter::FileOnly)
//!     .run(&fs)
//!     .unwrap();
//!
//! assert_eq!(results.paths, ["etc/config.yaml", "home/user/config.yaml"]);
//!
//! // Glob: every config.* anywhere under etc
//! let results = globfind::search()
//!     .root("etc")
//!     .name("config.*")
//!     .run(&fs)
//!     .unwrap();
//!
//! assert_eq!(results.paths, ["etc/app/config.toml", "etc/config.yaml"]);
//! ```
//!
//! # Semantics
//!
//! - A glob walk never returns its root and never stops descending: a match
//!   three levels down is found just like a direct child.
//! - A path matched by several (root, pattern) pairs is reported once per
//!   match. Duplicates are not removed.
//! - Missing roots and missing names are empty results, not errors.
//! - The first real error (I/O failure, malformed glob) fails the whole
//!   search; there are no partial results.
//!
//! # Custom Filesystems
//!
//! Implement [`FileSystem`] to search anything tree-shaped:
//!
//! ```rust
//! use globfind::{Entry, EntryKind, FileSystem, FinderError};
//!
//! /// A flat namespace of files.
//! struct Flat(Vec<&'static str>);
//!
//! impl FileSystem for Flat {
//!     fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError> {
//!         Ok(match path {
//!             "." => Some(EntryKind::Dir),
//!             p if self.0.iter().any(|f| *f == p) => Some(EntryKind::File),
//!             _ => None,
//!         })
//!     }
//!
//!     fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a> {
//!         if root != "." {
//!             return Box::new(std::iter::once(Err(FinderError::NotFound(root.to_string()))));
//!         }
//!         let root_entry = std::iter::once(Ok(Entry::new(".", EntryKind::Dir, 0)));
//!         let files = self.0.iter().map(|name| Ok(Entry::new(*name, EntryKind::File, 1)));
//!         Box::new(root_entry.chain(files))
//!     }
//! }
//!
//! let fs = Flat(vec!["invoice_jan.txt", "invoice_feb.txt", "report.txt"]);
//! let results = globfind::search().root(".").name("invoice_*").run(&fs).unwrap();
//! assert_eq!(results.paths, ["invoice_feb.txt", "invoice_jan.txt"]);
//! ```

#![forbid(unsafe_code)]

mod builder;
mod dirfs;
mod engine;
mod entry;
mod error;
mod exists;
mod filter;
mod matcher;
mod memfs;
mod path;
mod request;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use dirfs::DirFs;
pub use engine::{Searcher, DEFAULT_CONCURRENCY};
pub use entry::{Entry, EntryKind};
pub use error::FinderError;
pub use exists::exists;
pub use filter::TypeFilter;
pub use matcher::{is_glob, NamePattern, GLOB_META};
pub use memfs::MemFs;
pub use request::SearchRequest;
pub use results::{ResultSet, SearchStats};
pub use traits::FileSystem;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
///
/// # Example
///
/// ```rust
/// use globfind::{MemFs, TypeFilter};
///
/// let fs = MemFs::new()
///     .with_file("foo/bar")
///     .with_file("foo/baz")
///     .with_file("foo/bat/bar/baz");
///
/// let dirs = globfind::search()
///     .root("foo")
///     .name("ba?")
///     .type_filter(TypeFilter::DirOnly)
///     .run(&fs)
///     .unwrap();
///
/// assert_eq!(dirs.paths, ["foo/bat", "foo/bat/bar"]);
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
