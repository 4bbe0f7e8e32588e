use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::Instant;

use tracing::{debug, trace};

use crate::error::FinderError;
use crate::filter::TypeFilter;
use crate::matcher::{run_task, SearchTask, TaskCounters};
use crate::request::SearchRequest;
use crate::results::{ResultSet, SearchStats};
use crate::traits::FileSystem;

/// Default ceiling on simultaneously running (root, pattern) tasks.
pub const DEFAULT_CONCURRENCY: usize = 5;

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs a [`SearchRequest`] against a [`FileSystem`] on a bounded worker pool.
///
/// Every (root, pattern) pair becomes one task. At most `concurrency` tasks
/// run at once. The first failing task cancels the batch: no further tasks
/// start, results gathered so far are dropped and that single error is
/// returned. On success all matches are merged and sorted.
#[derive(Debug, Clone, Copy)]
pub struct Searcher {
    concurrency: usize,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of tasks in flight. Must be at least 1; `find` rejects 0.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Execute `request` against `fs`.
    ///
    /// # Errors
    ///
    /// [`FinderError::InvalidConcurrency`] for a zero bound, otherwise the
    /// first error any task hit: a filesystem failure, a malformed glob, or a
    /// panicking task. Missing paths are never errors.
    pub fn find<F: FileSystem + ?Sized>(&self, fs: &F, request: &SearchRequest) -> Result<ResultSet, FinderError> {
        if self.concurrency == 0 {
            return Err(FinderError::InvalidConcurrency(self.concurrency));
        }

        let start = Instant::now();

        if request.is_empty() {
            debug!("empty request, nothing to search");
            return Ok(ResultSet {
                paths: Vec::new(),
                stats: SearchStats {
                    duration: start.elapsed(),
                    ..SearchStats::default()
                },
            });
        }

        let tasks: Vec<SearchTask<'_>> = request.tasks().collect();
        let workers = self.concurrency.min(tasks.len());
        debug!(tasks = tasks.len(), workers, filter = ?request.type_filter(), "search started");

        let pool = Pool {
            fs,
            tasks: &tasks,
            filter: request.type_filter(),
            next: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            first_error: OnceLock::new(),
            collected: Mutex::new(Vec::new()),
            counters: TaskCounters::default(),
        };

        thread::scope(|scope| {
            for id in 0..workers {
                let spawned = thread::Builder::new()
                    .name(format!("globfind-worker-{id}"))
                    .spawn_scoped(scope, || pool.work());

                if let Err(e) = spawned {
                    pool.fail(FinderError::ThreadPool(e.to_string()));
                    break;
                }
            }
        });

        let Pool {
            first_error,
            collected,
            completed,
            counters,
            ..
        } = pool;

        if let Some(err) = first_error.into_inner() {
            debug!(error = %err, "search failed");
            return Err(err);
        }

        let mut paths = collected.into_inner().unwrap_or_else(PoisonError::into_inner);
        paths.sort();

        let stats = SearchStats {
            tasks: completed.into_inner(),
            probes: counters.probes.into_inner(),
            walks: counters.walks.into_inner(),
            entries: counters.entries.into_inner(),
            duration: start.elapsed(),
        };
        debug!(matches = paths.len(), ?stats, "search finished");

        Ok(ResultSet { paths, stats })
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// State shared by the workers of one `find` call.
struct Pool<'a, F: ?Sized> {
    fs: &'a F,
    tasks: &'a [SearchTask<'a>],
    filter: TypeFilter,
    next: AtomicUsize,
    completed: AtomicUsize,
    cancelled: AtomicBool,
    first_error: OnceLock<FinderError>,
    collected: Mutex<Vec<String>>,
    counters: TaskCounters,
}

impl<F: FileSystem + ?Sized> Pool<'_, F> {
    /// Pull tasks until the queue drains or the batch is cancelled.
    fn work(&self) {
        loop {
            if self.cancelled.load(Ordering::Acquire) {
                break;
            }

            let index = self.next.fetch_add(1, Ordering::Relaxed);
            let Some(&task) = self.tasks.get(index) else {
                break;
            };

            trace!(root = task.root, pattern = task.pattern, strategy = ?task.strategy(), "task started");

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                run_task(self.fs, task, self.filter, &self.cancelled, &self.counters)
            }))
            .unwrap_or_else(|payload| Err(FinderError::TaskPanicked(panic_message(payload.as_ref()))));

            match outcome {
                Ok(paths) => {
                    trace!(root = task.root, pattern = task.pattern, matches = paths.len(), "task finished");
                    self.completed.fetch_add(1, Ordering::Relaxed);
                    self.collected
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .extend(paths);
                }
                Err(err) => {
                    self.fail(err);
                    break;
                }
            }
        }
    }

    /// Cancel the batch. Only the first recorded error is kept.
    fn fail(&self, err: FinderError) {
        self.cancelled.store(true, Ordering::Release);
        if let Err(later) = self.first_error.set(err) {
            trace!(error = %later, "discarding error after batch already failed");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
