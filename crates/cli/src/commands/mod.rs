use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use launcher_core::{
    configs::LauncherConfig,
    downloads::{Callbacks, LauncherEvents},
    repository::{launcher_manifest::VersionType, username::Username},
    Auth, Credentials, LaunchOptions, Launcher,
};
use tracing::{debug, info, warn};

use crate::args::{Cli, Command};

pub async fn process_args(
    args: &Cli,
    config: LauncherConfig,
    config_path: PathBuf,
) -> anyhow::Result<()> {
    match &args.command {
        Command::Versions { version_type } => versions(&config, *version_type).await,
        Command::Launch {
            version,
            username,
            online,
            uuid,
            access_token,
            no_start,
        } => {
            let auth = match (online, uuid, access_token) {
                (true, Some(uuid), Some(access_token)) => Auth::Online(Credentials {
                    uuid: uuid.clone(),
                    access_token: access_token.clone(),
                }),
                _ => Auth::Offline,
            };

            let options = LaunchOptions::builder()
                .username(Username::new(username)?)
                .auth(auth)
                .build();

            launch(&config, version.as_deref(), &options, *no_start).await
        }
        Command::InitConfig => {
            config.write(&config_path).await?;
            info!("Config written to {}", config_path.display());
            Ok(())
        }
    }
}

/// Log lines already go through tracing, only progress and file starts are hooked.
fn events() -> Arc<dyn LauncherEvents> {
    Arc::new(
        Callbacks::new()
            .on_progress(|done, total| {
                if done == total || done % 100 == 0 {
                    info!("Progress {done}/{total}");
                }
            })
            .on_file_start(|file_name| debug!("Downloading {file_name}")),
    )
}

async fn versions(
    config: &LauncherConfig,
    version_type: Option<VersionType>,
) -> anyhow::Result<()> {
    let launcher = Launcher::new(config, events())?;
    let list = launcher.list_versions().await?;

    let versions: Vec<_> = match version_type {
        Some(version_type) => list.of_type(version_type).collect(),
        None => list.iter().collect(),
    };

    for version in versions {
        println!("{:<24} {}", version.id, version.version_type.as_str());
    }

    Ok(())
}

async fn launch(
    config: &LauncherConfig,
    version: Option<&str>,
    options: &LaunchOptions,
    no_start: bool,
) -> anyhow::Result<()> {
    let launcher = Launcher::new(config, events())?;

    let version = match version {
        Some(version) => version.to_string(),
        None => launcher
            .list_versions()
            .await?
            .latest_release()
            .map(|version| version.id.clone())
            .context("The version manifest lists no release")?,
    };

    if no_start {
        let (_, report) = launcher.prepare(&version, options).await?;

        for (task, reason) in report.failed() {
            warn!("{} was not downloaded: {reason}", task.path.display());
        }

        info!("{version} is ready");
        return Ok(());
    }

    let (mut child, _) = launcher.build_and_launch(&version, options).await?;
    info!("{version} started (pid {:?})", child.id());

    let status = child.wait().await?;
    info!("{version} exited with {status}");

    Ok(())
}
