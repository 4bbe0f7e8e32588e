use std::collections::{BTreeMap, BTreeSet};

use crate::entry::{Entry, EntryKind};
use crate::error::FinderError;
use crate::path;
use crate::traits::FileSystem;

/// An in-memory filesystem.
///
/// Paths are slash-separated and relative to the filesystem root `"."`.
/// Parent directories of inserted paths exist implicitly. Walks visit
/// children in name order.
///
/// [`deny`](MemFs::deny) marks a subtree as unreadable so error paths can be
/// exercised without touching real permissions.
///
/// ```rust
/// use globfind::{EntryKind, FileSystem, MemFs};
///
/// let fs = MemFs::new().with_file("etc/config.yaml");
/// assert_eq!(fs.stat("etc").unwrap(), Some(EntryKind::Dir));
/// assert_eq!(fs.stat("etc/config.yaml").unwrap(), Some(EntryKind::File));
/// assert_eq!(fs.stat("etc/missing").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    nodes: BTreeMap<String, EntryKind>,
    denied: BTreeSet<String>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file, creating its parent directories.
    pub fn with_file(mut self, path: &str) -> Self {
        self.insert(path, EntryKind::File);
        self
    }

    /// Add a directory, creating its parent directories.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert(path, EntryKind::Dir);
        self
    }

    /// Add an entry of any kind. Inserting the root is a no-op.
    pub fn insert(&mut self, path: &str, kind: EntryKind) {
        let Some(key) = normalize(path) else {
            return;
        };

        let mut parent = parent_of(&key);
        while parent != "." {
            self.nodes.insert(parent.to_string(), EntryKind::Dir);
            parent = parent_of(parent);
        }
        self.nodes.insert(key, kind);
    }

    /// Make `path` and everything below it fail with permission denied.
    pub fn deny(&mut self, path: &str) {
        let key = normalize(path).unwrap_or_else(|| ".".to_string());
        self.denied.insert(key);
    }

    fn is_denied(&self, key: &str) -> bool {
        self.denied.iter().any(|d| {
            d == "." || d == key || key.strip_prefix(d.as_str()).is_some_and(|rest| rest.starts_with('/'))
        })
    }

    fn kind_of(&self, key: &str) -> Option<EntryKind> {
        if key == "." {
            return Some(EntryKind::Dir);
        }
        self.nodes.get(key).copied()
    }

    /// Direct children of a directory key, in name order.
    fn children(&self, dir: &str) -> Vec<(String, EntryKind)> {
        if dir == "." {
            return self
                .nodes
                .iter()
                .filter(|(k, _)| !k.contains('/'))
                .map(|(k, v)| (k.clone(), *v))
                .collect();
        }

        let prefix = format!("{dir}/");
        self.nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .filter(|(k, _)| !k[prefix.len()..].contains('/'))
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

impl FileSystem for MemFs {
    fn stat(&self, path: &str) -> Result<Option<EntryKind>, FinderError> {
        if path.is_empty() {
            return Ok(None);
        }
        let key = normalize(path).unwrap_or_else(|| ".".to_string());
        if self.is_denied(&key) {
            return Err(FinderError::PermissionDenied(key));
        }
        Ok(self.kind_of(&key))
    }

    fn walk<'a>(&'a self, root: &str) -> Box<dyn Iterator<Item = Result<Entry, FinderError>> + 'a> {
        let key = normalize(root).unwrap_or_else(|| ".".to_string());
        match self.kind_of(&key) {
            Some(kind) => Box::new(MemWalk {
                fs: self,
                stack: vec![(key, kind, 0)],
                failed: false,
            }),
            None => Box::new(std::iter::once(Err(FinderError::NotFound(key)))),
        }
    }
}

/// Lazy depth-first walk over a [`MemFs`].
struct MemWalk<'a> {
    fs: &'a MemFs,
    stack: Vec<(String, EntryKind, usize)>,
    failed: bool,
}

impl Iterator for MemWalk<'_> {
    type Item = Result<Entry, FinderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (key, kind, depth) = self.stack.pop()?;

        if self.fs.is_denied(&key) {
            self.failed = true;
            return Some(Err(FinderError::PermissionDenied(key)));
        }

        if kind == EntryKind::Dir {
            let children = self.fs.children(&key);
            self.stack
                .extend(children.into_iter().rev().map(|(k, v)| (k, v, depth + 1)));
        }

        Some(Ok(Entry::new(key, kind, depth)))
    }
}

/// Clean `path` into a map key; `None` for the filesystem root.
fn normalize(path: &str) -> Option<String> {
    let cleaned = path::clean(path);
    let cleaned = cleaned.trim_start_matches('/');
    match cleaned {
        "" | "." => None,
        key => Some(key.to_string()),
    }
}

fn parent_of(key: &str) -> &str {
    match key.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => ".",
    }
}
