//! Serial batch deletion with per-item progress.
//!
//! A batch is a plain iterator over single-path delete calls: each step
//! yields one progress event, a failed item never stops the rest, and a
//! summary accumulates success/fail counts plus the paths that failed,
//! which is what a caller needs to shrink its selection set afterwards.

use std::path::{Path, PathBuf};

use crate::common::errors::{EngineError, EngineResult};

/// Progress report emitted after each completed item
#[derive(Debug)]
pub struct BatchEvent {
    /// 1-based position of this item
    pub index: usize,
    pub total: usize,
    /// Display name of the item just processed
    pub name: String,
    pub outcome: EngineResult<()>,
}

/// Aggregate outcome of a whole batch
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub success_count: usize,
    pub fail_count: usize,
    pub failed_paths: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn record(&mut self, path: &Path, event: &BatchEvent) {
        match &event.outcome {
            Ok(()) => self.success_count += 1,
            Err(_) => {
                self.fail_count += 1;
                self.failed_paths.push(path.to_path_buf());
            }
        }
    }
}

/// Lazily drives one delete operation per path, in order
pub struct BatchDelete<F>
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    paths: Vec<PathBuf>,
    op: F,
    next: usize,
}

impl<F> BatchDelete<F>
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    pub fn new(paths: Vec<PathBuf>, op: F) -> Self {
        Self { paths, op, next: 0 }
    }

    pub fn total(&self) -> usize {
        self.paths.len()
    }

    /// Drain the whole batch without observing individual events
    pub fn run(mut self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        while let Some((path, event)) = self.step() {
            summary.record(&path, &event);
        }
        summary
    }

    /// Execute the next item, returning its path alongside the event
    pub fn step(&mut self) -> Option<(PathBuf, BatchEvent)> {
        let path = self.paths.get(self.next)?.clone();
        self.next += 1;

        let outcome = (self.op)(&path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Some((
            path,
            BatchEvent {
                index: self.next,
                total: self.paths.len(),
                name,
                outcome,
            },
        ))
    }
}

impl<F> Iterator for BatchDelete<F>
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    type Item = BatchEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().map(|(_, event)| event)
    }
}

/// Convenience: run `op` over `paths` serially and summarize
pub fn run_batch<F>(paths: Vec<PathBuf>, op: F) -> BatchSummary
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    BatchDelete::new(paths, op).run()
}
