use std::path::PathBuf;

use clap::{Parser, Subcommand};
use launcher_core::repository::launcher_manifest::VersionType;

#[derive(Parser)]
#[command(version, about)]
/// Downloads and starts game versions
pub struct Cli {
    /// Game directory. Defaults to the one from `launcher.toml` or the platform data dir
    #[arg(long, short = 'g', global = true)]
    pub game_dir: Option<PathBuf>,
    /// Path to the config file. Defaults to `<game dir>/launcher.toml`
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show available versions
    Versions {
        /// Only show versions of this type (release, snapshot, old_beta, old_alpha)
        #[arg(long = "type", short = 't')]
        version_type: Option<VersionType>,
    },
    /// Download everything a version needs and start it
    Launch {
        /// Version id. Defaults to the latest release
        version: Option<String>,
        #[arg(long, short, default_value = launcher_core::DEFAULT_USERNAME)]
        username: String,
        /// Use externally obtained credentials instead of an offline identity
        #[arg(long, requires_all = ["uuid", "access_token"])]
        online: bool,
        #[arg(long)]
        uuid: Option<String>,
        #[arg(long)]
        access_token: Option<String>,
        /// Only download, do not start the game
        #[arg(long)]
        no_start: bool,
    },
    /// Write the default config file
    InitConfig,
}
