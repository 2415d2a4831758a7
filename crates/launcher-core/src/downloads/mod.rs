use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::{error::Error, fs::read_json, store::ArtifactStore};

pub use fetcher::{Fetcher, HttpFetcher};
pub use progress::{Callbacks, IgnoreEvents, LauncherEvent, LauncherEvents, PrintEvents};
pub use set::{BatchReport, DownloadOutcome, DownloadSet};

pub mod assets;
pub mod fetcher;
pub mod libraries;
pub mod progress;
pub mod set;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("{url} does not exist")]
    NotFound { url: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {error}")]
    Transport { url: String, error: String },

    #[error("Cannot write {}: {error}", path.display())]
    Io { path: PathBuf, error: std::io::Error },
}

/// Unit of work of a [`DownloadSet`]. Identity is the destination path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadTask {
    pub url: String,
    pub path: PathBuf,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.url.clone(), |name| name.to_string_lossy().to_string())
    }
}

/// Everything a download needs: where bytes come from, where they go
/// and who hears about it.
#[derive(Clone)]
pub struct DownloadContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub store: Arc<dyn ArtifactStore>,
    pub events: Arc<dyn LauncherEvents>,
    pub concurrency: usize,
}

impl std::fmt::Debug for DownloadContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadContext")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl DownloadContext {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn ArtifactStore>,
        events: Arc<dyn LauncherEvents>,
    ) -> Self {
        Self {
            fetcher,
            store,
            events,
            concurrency: crate::DEFAULT_CONCURRENCY,
        }
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Runs `tasks` as one batch. See [`DownloadSet::run`].
    pub async fn run_batch(&self, tasks: Vec<DownloadTask>) -> BatchReport {
        DownloadSet::new(self).run(tasks).await
    }

    /// Downloads a single artifact unless it is already present.
    /// Not part of any batch, so no progress is reported.
    pub async fn fetch_if_absent(&self, task: &DownloadTask) -> DownloadOutcome {
        set::download(self, task).await
    }

    pub async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, Error> {
        read_json(&*self.store, path).await
    }

    pub(crate) fn log_info(&self, message: &str) {
        info!("{message}");
        self.events.on_log(message);
    }

    pub(crate) fn log_error(&self, message: &str) {
        error!("{message}");
        self.events.on_log(message);
    }
}
