//! # globfind
//!
//! Command-line front end: turns flags into a search request against a
//! directory and prints the sorted matches, one per line.
//!
//! ## Usage
//!
//! ```bash
//! # Is there a config.yaml in either place?
//! globfind -n config.yaml home/user etc
//!
//! # Every config.* file anywhere under /etc, searching from /
//! globfind --base / -n 'config.*' -t file etc
//!
//! # Directories named build under the current directory
//! globfind -n build -n 'build-*' -t dir .
//! ```
//!
//! Exits 0 when something matched, 1 when nothing did, 2 on error. Set
//! `GLOBFIND_LOG` (e.g. `GLOBFIND_LOG=globfind=trace`) or pass `-v` for logs
//! on stderr.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use globfind::{DirFs, TypeFilter, DEFAULT_CONCURRENCY};
use tracing_subscriber::EnvFilter;

/// Find files and directories by name or glob across several roots.
#[derive(Debug, Parser)]
#[command(name = "globfind", version, about)]
struct Cli {
    /// Directories to search in, relative to --base
    #[arg(value_name = "ROOT", default_value = ".")]
    roots: Vec<String>,

    /// Name or glob to look for (repeatable)
    #[arg(short, long = "name", value_name = "PATTERN", required = true)]
    names: Vec<String>,

    /// Kind of entries to report
    #[arg(short = 't', long = "type", value_enum, default_value_t = Kind::Any)]
    kind: Kind,

    /// Directory all roots are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    base: PathBuf,

    /// Maximum number of (root, name) searches running at once
    #[arg(short = 'j', long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Resolve symbolic links instead of reporting them as links
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Print search statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Any,
    #[value(alias = "f")]
    File,
    #[value(alias = "d")]
    Dir,
}

impl From<Kind> for TypeFilter {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Any => TypeFilter::Any,
            Kind::File => TypeFilter::FileOnly,
            Kind::Dir => TypeFilter::DirOnly,
        }
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "globfind=debug",
        _ => "globfind=trace",
    };
    let filter = EnvFilter::try_from_env("GLOBFIND_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let fs = DirFs::new(&cli.base).follow_links(cli.follow_links);

    let results = globfind::search()
        .roots(cli.roots)
        .names(cli.names)
        .type_filter(cli.kind.into())
        .concurrency(cli.concurrency)
        .run(&fs)
        .with_context(|| format!("search under {} failed", cli.base.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for path in &results {
        writeln!(out, "{path}")?;
    }
    out.flush()?;

    if cli.stats {
        let s = results.stats;
        eprintln!(
            "{} matches, {} tasks ({} probes, {} walks), {} entries visited in {:.3}s",
            results.len(),
            s.tasks,
            s.probes,
            s.walks,
            s.entries,
            s.duration.as_secs_f64()
        );
    }

    Ok(!results.is_empty())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
