use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    downloads::{DownloadContext, DownloadTask},
    error::Error,
    game_paths::GamePaths,
    repository::{
        launcher_manifest::{LauncherManifest, VersionList},
        manifest::VersionDescriptor,
    },
    LAUNCHER_MANIFEST,
};

/// Resolves version ids to descriptors. The version list is loaded once
/// per resolver and kept for its lifetime.
#[derive(Debug)]
pub struct VersionResolver {
    ctx: DownloadContext,
    paths: GamePaths,
    manifest_url: String,
    versions: OnceCell<VersionList>,
}

impl VersionResolver {
    pub fn new(ctx: DownloadContext, paths: GamePaths) -> Self {
        Self {
            ctx,
            paths,
            manifest_url: LAUNCHER_MANIFEST.to_string(),
            versions: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    /// Fetches the manifest only when no local copy exists.
    pub async fn list_versions(&self) -> Result<&VersionList, Error> {
        self.versions.get_or_try_init(|| self.load_versions()).await
    }

    async fn load_versions(&self) -> Result<VersionList, Error> {
        let task = DownloadTask::new(&self.manifest_url, self.paths.manifest_file());
        let _ = self.ctx.fetch_if_absent(&task).await;

        let manifest: LauncherManifest = self.ctx.read_json(&task.path).await?;
        debug!("Loaded {} versions", manifest.versions.len());

        Ok(manifest.into())
    }

    /// Fails with [`Error::UnknownVersion`] before any per-version fetch.
    pub async fn resolve_version(&self, id: &str) -> Result<VersionDescriptor, Error> {
        let summary = self
            .list_versions()
            .await?
            .get(id)
            .ok_or_else(|| Error::UnknownVersion(id.to_string()))?;

        let task = DownloadTask::new(&summary.url, self.paths.version_json(id));
        let _ = self.ctx.fetch_if_absent(&task).await;

        self.ctx.read_json(&task.path).await
    }
}
