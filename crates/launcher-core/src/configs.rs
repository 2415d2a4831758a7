use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    fs::{read_toml_config, write_toml_config},
    instance::natives::Platform,
    ASSET_INDEX_BASE_URL, CONFIG_FILE, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS, LAUNCHER_MANIFEST,
    RESOURCES_URL,
};

/// Launcher settings, stored as `launcher.toml`. Every field is optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    pub base_dir: PathBuf,
    pub manifest_url: String,
    pub resources_url: String,
    pub asset_index_base_url: String,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub platform: Platform,
    /// Probed before `JAVA_HOME` and the well-known install locations.
    pub java: Option<PathBuf>,
    pub jvm_args: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            manifest_url: LAUNCHER_MANIFEST.to_string(),
            resources_url: RESOURCES_URL.to_string(),
            asset_index_base_url: ASSET_INDEX_BASE_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            platform: Platform::current(),
            java: None,
            jvm_args: Vec::new(),
        }
    }
}

pub fn default_base_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("./minecraft"),
        |dir| dir.join(crate::LAUNCHER_NAME).join("minecraft"),
    )
}

impl LauncherConfig {
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    pub async fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if tokio::fs::try_exists(path).await? {
            read_toml_config(path).await
        } else {
            tracing::debug!("{} does not exist, using default config", path.display());
            Ok(Self::default())
        }
    }

    pub async fn write(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        write_toml_config(self, path).await
    }
}
