//! Slash-separated path helpers.
//!
//! Search paths are plain strings using `/` as the separator on every
//! platform; these helpers give them POSIX-like join/clean semantics without
//! touching the filesystem.

/// Lexically clean a slash-separated path.
///
/// Collapses repeated separators, drops `.` segments, resolves `..` against a
/// preceding name and strips trailing separators. The empty path cleans to
/// `"."`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|&last| last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            name => segments.push(name),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join a root and a name into one cleaned path.
///
/// Empty parts are ignored; joining two empty parts yields the empty string.
pub fn join(root: &str, name: &str) -> String {
    match (root.is_empty(), name.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(name),
        (false, true) => clean(root),
        (false, false) => clean(&format!("{root}/{name}")),
    }
}

/// The last segment of a path, ignoring trailing separators.
pub fn base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) => name,
        None => trimmed,
    }
}
