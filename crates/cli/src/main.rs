use std::path::Path;

use args::Cli;
use clap::Parser;
use commands::process_args;
use launcher_core::{configs::LauncherConfig, LOG_FILE};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod args;
pub mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let game_dir = args.game_dir.clone().unwrap_or_else(launcher_core::configs::default_base_dir);
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| LauncherConfig::default_path(&game_dir));

    let mut config = LauncherConfig::load_or_default(&config_path).await?;
    if let Some(dir) = args.game_dir.clone() {
        config.base_dir = dir;
    }

    let _guard = init_tracing(&config.base_dir.join(launcher_core::LOGS_DIR));

    process_args(&args, config, config_path).await
}

fn init_tracing(logs_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false).compact();
    let stdout_layer = fmt::layer().with_target(false).compact();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
