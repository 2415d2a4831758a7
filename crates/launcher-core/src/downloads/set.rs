use std::sync::atomic::{AtomicU32, Ordering};

use futures_util::{stream, StreamExt};
use itertools::Itertools;
use tracing::debug;

use super::{DownloadContext, DownloadError, DownloadTask};

/// Terminal state of one [`DownloadTask`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The artifact is on disk. `cached` is set when nothing was fetched.
    Succeeded { cached: bool },
    /// The remote store does not have the artifact.
    Skipped(String),
    /// Any other failure. The artifact stays absent.
    Failed(String),
}

impl DownloadOutcome {
    /// Succeeded and skipped tasks count towards batch progress.
    pub fn is_done(&self) -> bool {
        !matches!(self, DownloadOutcome::Failed(_))
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, DownloadOutcome::Succeeded { cached: false })
    }
}

/// Result of one [`DownloadSet::run`].
#[derive(Debug, Default, Clone)]
pub struct BatchReport {
    total: u32,
    done: u32,
    outcomes: Vec<(DownloadTask, DownloadOutcome)>,
}

impl BatchReport {
    /// Number of distinct destinations in the batch.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn done(&self) -> u32 {
        self.done
    }

    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }

    pub fn outcomes(&self) -> &[(DownloadTask, DownloadOutcome)] {
        &self.outcomes
    }

    pub fn outcome(&self, task: &DownloadTask) -> Option<&DownloadOutcome> {
        self.outcomes.iter().find(|(t, _)| t.path == task.path).map(|(_, outcome)| outcome)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DownloadTask> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, DownloadOutcome::Succeeded { .. }))
            .map(|(task, _)| task)
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&DownloadTask, &str)> {
        self.outcomes.iter().filter_map(|(task, outcome)| match outcome {
            DownloadOutcome::Skipped(reason) => Some((task, reason.as_str())),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&DownloadTask, &str)> {
        self.outcomes.iter().filter_map(|(task, outcome)| match outcome {
            DownloadOutcome::Failed(reason) => Some((task, reason.as_str())),
            _ => None,
        })
    }

    /// Number of tasks that actually hit the network and were stored.
    pub fn fetched(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| outcome.is_fetched()).count()
    }
}

/// One batch of downloads, drained by at most `concurrency` workers.
///
/// A set lives for exactly one [`DownloadSet::run`], so each batch starts
/// its progress counter from zero.
pub struct DownloadSet<'a> {
    ctx: &'a DownloadContext,
    done: AtomicU32,
}

impl<'a> DownloadSet<'a> {
    pub fn new(ctx: &'a DownloadContext) -> Self {
        Self {
            ctx,
            done: AtomicU32::new(0),
        }
    }

    /// Resolves once every task reached a terminal state. Per-task failures
    /// never abort the batch.
    ///
    /// Tasks sharing a destination are collapsed into the first one, so a
    /// path is never fetched twice by the same batch.
    #[tracing::instrument(
        skip_all,
        fields(tasks = tasks.len(), concurrency = self.ctx.concurrency)
    )]
    pub async fn run(self, tasks: Vec<DownloadTask>) -> BatchReport {
        let requested = tasks.len();
        let tasks = tasks.into_iter().unique_by(|task| task.path.clone()).collect_vec();
        let total = tasks.len() as u32;

        if tasks.len() != requested {
            debug!("Collapsed {} duplicate destinations", requested - tasks.len());
        }

        self.ctx.events.on_progress(0, total);

        let this = &self;
        let outcomes = stream::iter(tasks)
            .map(|task| async move {
                let outcome = download(this.ctx, &task).await;
                if outcome.is_done() {
                    let done = this.done.fetch_add(1, Ordering::SeqCst) + 1;
                    this.ctx.events.on_progress(done, total);
                }
                (task, outcome)
            })
            .buffer_unordered(self.ctx.concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        let report = BatchReport {
            total,
            done: self.done.into_inner(),
            outcomes,
        };

        debug!(
            "Batch finished: {}/{} done, {} fetched, {} failed",
            report.done,
            report.total,
            report.fetched(),
            report.failed().count()
        );

        report
    }
}

/// Existence check, then a single fetch. Never retries.
pub(super) async fn download(ctx: &DownloadContext, task: &DownloadTask) -> DownloadOutcome {
    if ctx.store.has(&task.path).await {
        return DownloadOutcome::Succeeded { cached: true };
    }

    ctx.events.on_file_start(&task.file_name());

    let result = match ctx.fetcher.fetch(&task.url).await {
        Ok(bytes) => ctx.store.put(&task.path, &bytes).await.map_err(|error| DownloadError::Io {
            path: task.path.clone(),
            error,
        }),
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => {
            ctx.log_info(&format!("[DONE] {}", task.path.display()));
            DownloadOutcome::Succeeded { cached: false }
        }
        Err(err @ DownloadError::NotFound { .. }) => {
            ctx.log_info(&format!("[SKIP] {err}"));
            DownloadOutcome::Skipped(err.to_string())
        }
        Err(err) => {
            ctx.log_error(&format!("[ERROR] {err}"));
            DownloadOutcome::Failed(err.to_string())
        }
    }
}
