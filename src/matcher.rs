use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use globset::{GlobBuilder, GlobMatcher};
use tracing::trace;

use crate::entry::Entry;
use crate::error::FinderError;
use crate::exists::exists;
use crate::filter::TypeFilter;
use crate::path;
use crate::traits::FileSystem;

/// Characters whose presence switches a name from a direct probe to a glob walk.
pub const GLOB_META: [char; 6] = ['*', '?', '[', ']', '\\', '^'];

/// Whether `pattern` needs a recursive glob walk rather than a direct probe.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

// ---------------------------------------------------------------------------
// NamePattern
// ---------------------------------------------------------------------------

/// A compiled glob matched against entry base names.
///
/// `*` matches any run of non-separator characters, `?` one character,
/// `[...]` a class (`[!...]` negated), and `\` escapes the next character.
/// Braces are ordinary characters: `a{b}c*` matches `a{b}c.txt`.
#[derive(Debug, Clone)]
pub struct NamePattern {
    matcher: GlobMatcher,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, FinderError> {
        let glob = GlobBuilder::new(&literal_braces(pattern))
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| FinderError::PatternSyntax {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// Rewrite `{` and `}` outside classes and escapes as one-character classes,
/// so globset never sees them as alternation.
fn literal_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                if let Some(&(neg @ ('!' | '^'))) = chars.peek() {
                    out.push(neg);
                    chars.next();
                }
                // A leading `]` is a member, not the end of the class.
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// How a single (root, pattern) pair is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    Probe,
    GlobWalk,
}

/// One (root, pattern) unit of work.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchTask<'a> {
    pub root: &'a str,
    pub pattern: &'a str,
}

impl SearchTask<'_> {
    pub fn strategy(&self) -> Strategy {
        if is_glob(self.pattern) {
            Strategy::GlobWalk
        } else {
            Strategy::Probe
        }
    }
}

/// Counters shared by every task of one search.
#[derive(Debug, Default)]
pub(crate) struct TaskCounters {
    pub probes: AtomicUsize,
    pub walks: AtomicUsize,
    pub entries: AtomicUsize,
}

/// Resolve one task to the list of matching paths, in traversal order.
///
/// `cancelled` is polled between walked entries; once set the walk stops and
/// whatever was gathered so far is returned (the caller discards it).
pub(crate) fn run_task<F: FileSystem + ?Sized>(
    fs: &F,
    task: SearchTask<'_>,
    filter: TypeFilter,
    cancelled: &AtomicBool,
    counters: &TaskCounters,
) -> Result<Vec<String>, FinderError> {
    match task.strategy() {
        Strategy::Probe => {
            counters.probes.fetch_add(1, Ordering::Relaxed);
            probe(fs, task.root, task.pattern, filter)
        }
        Strategy::GlobWalk => {
            counters.walks.fetch_add(1, Ordering::Relaxed);
            let pattern = NamePattern::new(task.pattern)?;
            glob_walk(fs, task.root, &pattern, filter, cancelled, &counters.entries)
        }
    }
}

/// Look up `root/name` directly.
pub(crate) fn probe<F: FileSystem + ?Sized>(
    fs: &F,
    root: &str,
    name: &str,
    filter: TypeFilter,
) -> Result<Vec<String>, FinderError> {
    let joined = path::join(root, name);
    if exists(fs, &joined, filter)? {
        Ok(vec![joined])
    } else {
        Ok(Vec::new())
    }
}

/// Walk the whole subtree under `root` and collect entries whose base name
/// matches `pattern`.
///
/// The root itself is never a candidate. Directories are always descended,
/// whether or not they matched. A missing root is an empty result.
pub(crate) fn glob_walk<F: FileSystem + ?Sized>(
    fs: &F,
    root: &str,
    pattern: &NamePattern,
    filter: TypeFilter,
    cancelled: &AtomicBool,
    visited: &AtomicUsize,
) -> Result<Vec<String>, FinderError> {
    let mut results = Vec::new();

    for item in fs.walk(root) {
        if cancelled.load(Ordering::Relaxed) {
            trace!(root, "walk stopped, batch cancelled");
            break;
        }

        let entry: Entry = match item {
            Ok(entry) => entry,
            Err(e) if e.is_not_found() => {
                trace!(root, path = ?e.path(), "skipping vanished path");
                continue;
            }
            Err(e) => return Err(e),
        };

        if entry.depth == 0 {
            continue;
        }
        visited.fetch_add(1, Ordering::Relaxed);

        if filter.matches(entry.kind) && pattern.is_match(&entry.name) {
            results.push(entry.path);
        }
    }

    Ok(results)
}
