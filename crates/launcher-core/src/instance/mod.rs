use std::{path::PathBuf, sync::Arc, time::Duration};

use tokio::process::Child;
use tracing::{info, warn};

use crate::{
    configs::LauncherConfig,
    downloads::{
        assets::AssetsResolver,
        libraries::{library_artifacts, native_artifacts, LibraryArtifacts},
        BatchReport, DownloadContext, DownloadTask, Fetcher, HttpFetcher, LauncherEvents,
    },
    error::Error,
    game_paths::GamePaths,
    repository::{
        java_runner::JavaRunner, launcher_manifest::VersionList, manifest::VersionDescriptor,
    },
    state::VersionResolver,
    store::{ArtifactStore, FsStore},
};

use self::{
    launch::{LaunchOptions, LaunchSpec},
    natives::{extract_natives, reset_natives_dir, Platform},
};

pub mod launch;
pub mod natives;

/// Downloads gathered while preparing a launch.
#[derive(Debug, Clone, Default)]
pub struct LaunchReport {
    pub libraries: BatchReport,
    pub natives: Vec<PathBuf>,
    /// `None` when the version has no asset index.
    pub assets: Option<BatchReport>,
}

impl LaunchReport {
    /// Downloads dropped by either batch.
    pub fn failed(&self) -> impl Iterator<Item = (&DownloadTask, &str)> {
        self.libraries
            .failed()
            .chain(self.assets.iter().flat_map(BatchReport::failed))
    }
}

/// Resolves, downloads and starts a version.
#[derive(Debug)]
pub struct Launcher {
    paths: GamePaths,
    ctx: DownloadContext,
    resolver: VersionResolver,
    assets: AssetsResolver,
    platform: Platform,
    java: Option<PathBuf>,
    jvm_args: Vec<String>,
}

impl Launcher {
    /// Launcher over HTTP and the local filesystem.
    pub fn new(config: &LauncherConfig, events: Arc<dyn LauncherEvents>) -> Result<Self, Error> {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs))?;

        // The game runs with the base directory as its working directory,
        // so every path handed to it must be absolute.
        let config = LauncherConfig {
            base_dir: GamePaths::new(&config.base_dir).make_absolute()?.root().to_path_buf(),
            ..config.clone()
        };

        Ok(Self::with_parts(&config, Arc::new(fetcher), Arc::new(FsStore), events))
    }

    pub fn with_parts(
        config: &LauncherConfig,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn ArtifactStore>,
        events: Arc<dyn LauncherEvents>,
    ) -> Self {
        let paths = GamePaths::new(&config.base_dir);
        let ctx = DownloadContext::new(fetcher, store, events).with_concurrency(config.concurrency);

        Self {
            resolver: VersionResolver::new(ctx.clone(), paths.clone())
                .with_manifest_url(&config.manifest_url),
            assets: AssetsResolver::new(&config.asset_index_base_url, &config.resources_url),
            platform: config.platform,
            java: config.java.clone(),
            jvm_args: config.jvm_args.clone(),
            paths,
            ctx,
        }
    }

    pub fn paths(&self) -> &GamePaths {
        &self.paths
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub async fn list_versions(&self) -> Result<&VersionList, Error> {
        self.resolver.list_versions().await
    }

    pub async fn resolve_version(&self, id: &str) -> Result<VersionDescriptor, Error> {
        self.resolver.resolve_version(id).await
    }

    /// Client jar and library batch. Returns the ordered classpath.
    pub async fn ensure_libraries(
        &self,
        descriptor: &VersionDescriptor,
    ) -> (LibraryArtifacts, BatchReport) {
        let artifacts = library_artifacts(descriptor, &self.paths);
        let report = self.ctx.run_batch(artifacts.tasks.clone()).await;
        (artifacts, report)
    }

    /// Recreates the natives directory from the matching classifier archives.
    pub async fn ensure_natives(
        &self,
        descriptor: &VersionDescriptor,
    ) -> Result<Vec<PathBuf>, Error> {
        let natives_dir = self.paths.natives_dir();
        reset_natives_dir(&natives_dir).await?;

        let mut extracted = vec![];

        for task in native_artifacts(descriptor, &self.paths, self.platform) {
            let _ = self.ctx.fetch_if_absent(&task).await;

            if !self.ctx.store.has(&task.path).await {
                warn!("Native archive {} is missing, skipping", task.path.display());
                continue;
            }

            let archive = task.path.clone();
            let target = natives_dir.clone();
            let platform = self.platform;
            let result =
                tokio::task::spawn_blocking(move || extract_natives(&archive, &target, platform))
                    .await?;

            match result {
                Ok(files) => extracted.extend(files),
                Err(err) => {
                    self.ctx.log_error(&format!(
                        "[ERROR] Cannot extract {}: {err}",
                        task.path.display()
                    ));

                    // Presence is the only cache state, drop the archive so
                    // the next launch fetches it again.
                    if let Err(err) = tokio::fs::remove_file(&task.path).await {
                        warn!("Cannot remove {}: {err}", task.path.display());
                    }
                }
            }
        }

        Ok(extracted)
    }

    pub async fn ensure_assets(
        &self,
        descriptor: &VersionDescriptor,
    ) -> Result<Option<BatchReport>, Error> {
        match self.assets.resolve(&self.ctx, &self.paths, descriptor).await? {
            Some(tasks) => Ok(Some(self.ctx.run_batch(tasks).await)),
            None => Ok(None),
        }
    }

    /// Resolves the version, brings every dependency to disk and builds the
    /// invocation. Nothing is started.
    #[tracing::instrument(skip(self, options), fields(username = %options.username))]
    pub async fn prepare(
        &self,
        id: &str,
        options: &LaunchOptions,
    ) -> Result<(LaunchSpec, LaunchReport), Error> {
        let descriptor = self.resolve_version(id).await?;

        let (artifacts, libraries) = self.ensure_libraries(&descriptor).await;
        let natives = self.ensure_natives(&descriptor).await?;
        let assets = self.ensure_assets(&descriptor).await?;

        let (uuid, access_token, user_type) = LaunchSpec::identity(&options.auth);

        let spec = LaunchSpec {
            java: JavaRunner::locate(self.java.as_deref()),
            jvm_args: self.jvm_args.clone(),
            classpath: artifacts.classpath,
            natives_dir: self.paths.natives_dir(),
            main_class: descriptor.main_class.clone(),
            version_id: descriptor.id.clone(),
            game_dir: self.paths.root().to_path_buf(),
            assets_dir: self.paths.assets_dir(),
            asset_index_id: descriptor.asset_index_id().to_string(),
            uuid,
            access_token,
            user_type,
            username: options.username.clone(),
        };

        Ok((
            spec,
            LaunchReport {
                libraries,
                natives,
                assets,
            },
        ))
    }

    /// [`Launcher::prepare`] followed by [`LaunchSpec::spawn`]. Returns as
    /// soon as the process is started.
    pub async fn build_and_launch(
        &self,
        id: &str,
        options: &LaunchOptions,
    ) -> Result<(Child, LaunchReport), Error> {
        let (spec, report) = self.prepare(id, options).await?;

        for (task, reason) in report.failed() {
            warn!("{} is missing: {reason}", task.path.display());
        }

        self.ctx.log_info(&format!("Starting {id}..."));
        info!("Arguments: {:?}", spec.arguments());

        let child = spec.spawn().await?;

        Ok((child, report))
    }
}
