use std::fs;
use std::path::Path;

use globfind::{search, DirFs, FinderError, MemFs, SearchRequest, Searcher, TypeFilter};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// In-memory tree used by most tests.
///
/// ```text
/// foo/
///   bar
///   baz
///   bat/
///     bar/
///       baz
/// ```
fn fixture() -> MemFs {
    MemFs::new()
        .with_file("foo/bar")
        .with_file("foo/baz")
        .with_file("foo/bat/bar/baz")
}

/// The same tree on disk, plus a typical config layout.
///
/// ```text
/// tmp/
///   foo/bar, foo/baz, foo/bat/bar/baz
///   etc/config.yaml
///   etc/app/config.toml
///   home/user/config.yaml
///   home/user/.cache/config.json
///   var/
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("foo/bat/bar")).unwrap();
    fs::write(root.join("foo/bar"), "hello world from bar").unwrap();
    fs::write(root.join("foo/baz"), "hello world from baz").unwrap();
    fs::write(root.join("foo/bat/bar/baz"), "hello world from four levels").unwrap();

    fs::create_dir_all(root.join("etc/app")).unwrap();
    fs::write(root.join("etc/config.yaml"), "a: 1").unwrap();
    fs::write(root.join("etc/app/config.toml"), "a = 1").unwrap();

    fs::create_dir_all(root.join("home/user/.cache")).unwrap();
    fs::write(root.join("home/user/config.yaml"), "b: 2").unwrap();
    fs::write(root.join("home/user/.cache/config.json"), "{}").unwrap();

    fs::create_dir(root.join("var")).unwrap();

    dir
}

fn find(fs: &MemFs, roots: &[&str], names: &[&str], filter: TypeFilter) -> Vec<String> {
    search()
        .roots(roots.iter().copied())
        .names(names.iter().copied())
        .type_filter(filter)
        .run(fs)
        .unwrap()
        .into_paths()
}

/// Independent oracle: every entry under `base/root` whose name matches
/// `pattern` and whose kind passes `filter`, as base-relative slash paths.
fn walkdir_oracle(base: &Path, root: &str, pattern: &str, filter: TypeFilter) -> Vec<String> {
    let glob = globfind::NamePattern::new(pattern).unwrap();
    let mut out: Vec<String> = walkdir::WalkDir::new(base.join(root))
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| glob.is_match(&e.file_name().to_string_lossy()))
        .filter(|e| match filter {
            TypeFilter::Any => true,
            TypeFilter::FileOnly => e.file_type().is_file(),
            TypeFilter::DirOnly => e.file_type().is_dir(),
        })
        .map(|e| {
            let rel = e.path().strip_prefix(base).unwrap();
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    out.sort();
    out
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn nothing_to_find() {
    let fs = fixture();
    assert!(find(&fs, &[], &[], TypeFilter::Any).is_empty());
    assert!(find(&fs, &["foo"], &[], TypeFilter::Any).is_empty());
    assert!(find(&fs, &[], &["bar"], TypeFilter::Any).is_empty());
}

#[test]
fn finds_file_by_name() {
    assert_eq!(find(&fixture(), &["foo"], &["bar"], TypeFilter::Any), ["foo/bar"]);
}

#[test]
fn missing_name_is_empty_not_error() {
    assert!(find(&fixture(), &["foo"], &["nope"], TypeFilter::Any).is_empty());
}

#[test]
fn missing_root_is_empty_not_error() {
    let fs = fixture();
    assert!(find(&fs, &["nowhere"], &["bar"], TypeFilter::Any).is_empty());
    assert!(find(&fs, &["nowhere"], &["ba?"], TypeFilter::Any).is_empty());
}

#[test]
fn expecting_file_but_entry_is_dir() {
    assert!(find(&fixture(), &["foo"], &["bat"], TypeFilter::FileOnly).is_empty());
}

#[test]
fn expecting_dir_but_entry_is_file() {
    assert!(find(&fixture(), &["foo"], &["bar"], TypeFilter::DirOnly).is_empty());
}

#[test]
fn glob_matches_whole_subtree() {
    assert_eq!(
        find(&fixture(), &["foo"], &["ba?"], TypeFilter::Any),
        ["foo/bar", "foo/bat", "foo/bat/bar", "foo/bat/bar/baz", "foo/baz"]
    );
}

#[test]
fn glob_matches_files_only() {
    assert_eq!(
        find(&fixture(), &["foo"], &["ba?"], TypeFilter::FileOnly),
        ["foo/bar", "foo/bat/bar/baz", "foo/baz"]
    );
}

#[test]
fn glob_matches_dirs_only() {
    assert_eq!(
        find(&fixture(), &["foo"], &["ba?"], TypeFilter::DirOnly),
        ["foo/bat", "foo/bat/bar"]
    );
}

#[test]
fn malformed_glob_fails_the_search() {
    let err = search().root("foo").name("ba[").run(&fixture()).unwrap_err();
    assert!(matches!(err, FinderError::PatternSyntax { ref pattern, .. } if pattern == "ba["));
}

#[test]
fn malformed_glob_fails_even_with_good_tasks_alongside() {
    let err = search()
        .roots(["foo", "foo/bat"])
        .names(["bar", "ba?", "[oops"])
        .run(&fixture())
        .unwrap_err();
    assert!(matches!(err, FinderError::PatternSyntax { .. }));
}

#[test]
fn nested_name_is_probed_directly() {
    assert_eq!(
        find(&fixture(), &["foo"], &["bat/bar/baz"], TypeFilter::FileOnly),
        ["foo/bat/bar/baz"]
    );
}

#[test]
fn braces_are_ordinary_characters() {
    let fs = MemFs::new()
        .with_file("etc/a{b}c.txt")
        .with_file("etc/abc.txt")
        .with_file("etc/x{y");

    assert_eq!(find(&fs, &["etc"], &["a{b}c*"], TypeFilter::FileOnly), ["etc/a{b}c.txt"]);
    assert_eq!(find(&fs, &["etc"], &["x{*"], TypeFilter::Any), ["etc/x{y"]);
    assert!(find(&fs, &["etc"], &["*}", "{a,x}*"], TypeFilter::Any).is_empty());
}

// ---------------------------------------------------------------------------
// Ordering and duplicates
// ---------------------------------------------------------------------------

/// Overlapping roots match the same paths more than once; every match is kept.
#[test]
fn duplicates_from_overlapping_roots_are_kept() {
    assert_eq!(
        find(&fixture(), &["foo", "foo/bat"], &["ba?"], TypeFilter::Any),
        [
            "foo/bar",
            "foo/bat",
            "foo/bat/bar",
            "foo/bat/bar",
            "foo/bat/bar/baz",
            "foo/bat/bar/baz",
            "foo/baz",
        ]
    );
}

#[test]
fn duplicates_from_overlapping_patterns_are_kept() {
    assert_eq!(
        find(&fixture(), &["foo"], &["bar", "ba[rz]"], TypeFilter::FileOnly),
        ["foo/bar", "foo/bar", "foo/bat/bar/baz", "foo/baz"]
    );
}

#[test]
fn repeated_runs_are_identical_and_sorted() {
    let fs = fixture();
    let req = SearchRequest::new(
        ["foo", "foo/bat", "foo", "foo/bat/bar"],
        ["ba?", "bar", "baz", "*"],
        TypeFilter::Any,
    );

    let first = Searcher::new().find(&fs, &req).unwrap().into_paths();
    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted);

    for concurrency in [1, 2, 5, 16] {
        for _ in 0..10 {
            let again = Searcher::new()
                .with_concurrency(concurrency)
                .find(&fs, &req)
                .unwrap()
                .into_paths();
            assert_eq!(again, first, "concurrency {concurrency}");
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn filesystem_error_fails_the_search() {
    let mut fs = fixture();
    fs.deny("foo/bat/bar");

    let err = search().root("foo").name("*").run(&fs).unwrap_err();
    assert!(matches!(err, FinderError::PermissionDenied(ref p) if p == "foo/bat/bar"));

    // The probe strategy hits the same wall.
    let err = search().root("foo/bat").name("bar/baz").run(&fs).unwrap_err();
    assert!(matches!(err, FinderError::PermissionDenied(_)));
}

#[test]
fn roots_above_the_base_fail_the_search() {
    let dir = setup_test_dir();
    let fs = DirFs::new(dir.path().join("etc"));

    let err = search().root("..").name("config.*").run(&fs).unwrap_err();
    assert!(matches!(err, FinderError::InvalidPath(ref p) if p == ".."));

    let err = search().root("app/../..").name("config.yaml").run(&fs).unwrap_err();
    assert!(matches!(err, FinderError::InvalidPath(_)));

    // Inside the base is still fine.
    let ok = search().root("app/..").name("config.yaml").run(&fs).unwrap();
    assert_eq!(ok.paths, ["config.yaml"]);
}

#[test]
fn zero_concurrency_is_rejected() {
    let err = search().root("foo").name("bar").concurrency(0).run(&fixture()).unwrap_err();
    assert!(matches!(err, FinderError::InvalidConcurrency(0)));
}

// ---------------------------------------------------------------------------
// On disk
// ---------------------------------------------------------------------------

#[test]
fn config_discovery_on_disk() {
    let dir = setup_test_dir();
    let fs = DirFs::new(dir.path());

    let results = search()
        .roots(["home/user", "etc"])
        .name("config.*")
        .type_filter(TypeFilter::FileOnly)
        .run(&fs)
        .unwrap();

    assert_eq!(
        results.paths,
        [
            "etc/app/config.toml",
            "etc/config.yaml",
            "home/user/.cache/config.json",
            "home/user/config.yaml",
        ]
    );
    assert_eq!(results.stats.walks, 2);
}

#[test]
fn direct_probe_on_disk() {
    let dir = setup_test_dir();
    let fs = DirFs::new(dir.path());

    let results = search()
        .roots(["home/user", "etc", "var", "missing"])
        .name("config.yaml")
        .run(&fs)
        .unwrap();

    assert_eq!(results.paths, ["etc/config.yaml", "home/user/config.yaml"]);
    assert_eq!(results.stats.probes, 4);
    assert_eq!(results.stats.walks, 0);
}

#[test]
fn disk_and_memory_agree() {
    let dir = setup_test_dir();
    let disk = DirFs::new(dir.path());
    let mem = fixture();

    for filter in [TypeFilter::Any, TypeFilter::FileOnly, TypeFilter::DirOnly] {
        for name in ["ba?", "bar", "b*", "*z"] {
            let req = SearchRequest::new(["foo"], [name], filter);
            let on_disk = Searcher::new().find(&disk, &req).unwrap().into_paths();
            let in_mem = Searcher::new().find(&mem, &req).unwrap().into_paths();
            assert_eq!(on_disk, in_mem, "{name} / {filter:?}");
        }
    }
}

#[test]
fn glob_results_match_an_independent_walk() {
    let dir = setup_test_dir();
    let fs = DirFs::new(dir.path());

    for (root, pattern) in [("foo", "ba?"), (".", "config.*"), ("home", "*"), ("etc", "[a-c]*")] {
        for filter in [TypeFilter::Any, TypeFilter::FileOnly, TypeFilter::DirOnly] {
            let got = search()
                .root(root)
                .name(pattern)
                .type_filter(filter)
                .run(&fs)
                .unwrap()
                .into_paths();
            let want = walkdir_oracle(dir.path(), root, pattern, filter);
            assert_eq!(got, want, "{root} / {pattern} / {filter:?}");
        }
    }
}

/// A link is classified the same way whether it is stat'ed by name or met
/// during a walk.
#[cfg(unix)]
#[test]
fn symlinks_agree_across_strategies() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("real/dir")).unwrap();
    fs::write(root.join("real/dir/inner"), "inner").unwrap();
    fs::write(root.join("real/file"), "file").unwrap();
    fs::create_dir(root.join("links")).unwrap();
    symlink(root.join("real/dir"), root.join("links/linkdir")).unwrap();
    symlink(root.join("real/file"), root.join("links/linkfile")).unwrap();

    for follow in [false, true] {
        let fs = DirFs::new(root).follow_links(follow);

        for filter in [TypeFilter::Any, TypeFilter::FileOnly, TypeFilter::DirOnly] {
            let by_name = search()
                .root("links")
                .names(["linkdir", "linkfile"])
                .type_filter(filter)
                .run(&fs)
                .unwrap()
                .into_paths();
            let by_glob = search()
                .root("links")
                .name("link*")
                .type_filter(filter)
                .run(&fs)
                .unwrap()
                .into_paths();

            assert_eq!(by_name, by_glob, "follow={follow} / {filter:?}");

            let want: &[&str] = match (follow, filter) {
                (_, TypeFilter::Any) => &["links/linkdir", "links/linkfile"],
                (false, _) => &[],
                (true, TypeFilter::FileOnly) => &["links/linkfile"],
                (true, TypeFilter::DirOnly) => &["links/linkdir"],
            };
            assert_eq!(by_glob, want, "follow={follow} / {filter:?}");
        }
    }
}
