use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Platform tag used to pick classifier archives and native binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    Osx,
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::Osx,
            _ => Platform::Linux,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Osx => "osx",
        }
    }

    pub fn matches_classifier(self, classifier: &str) -> bool {
        classifier.contains(&format!("natives-{}", self.tag()))
    }

    pub fn native_suffixes(self) -> &'static [&'static str] {
        match self {
            Platform::Windows => &[".dll"],
            Platform::Linux => &[".so"],
            Platform::Osx => &[".dylib", ".jnilib"],
        }
    }

    pub fn is_native_binary(self, name: &str) -> bool {
        self.native_suffixes().iter().any(|suffix| name.ends_with(suffix))
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "osx" | "macos" => Ok(Platform::Osx),
            other => Err(format!("unknown platform `{other}`")),
        }
    }
}

/// Wipes and recreates the natives directory.
pub async fn reset_natives_dir(dir: &Path) -> io::Result<()> {
    if tokio::fs::try_exists(dir).await? {
        tokio::fs::remove_dir_all(dir).await?;
    }
    tokio::fs::create_dir_all(dir).await
}

/// Extracts every member of `archive` that is a native binary for `platform`
/// into `target`, flattened to its base name. Returns the extracted files.
pub fn extract_natives(
    archive: &Path,
    target: &Path,
    platform: Platform,
) -> Result<Vec<PathBuf>, Error> {
    let mut zip = zip::ZipArchive::new(File::open(archive)?)?;
    std::fs::create_dir_all(target)?;

    let mut extracted = vec![];

    for index in 0..zip.len() {
        let mut member = zip.by_index(index)?;

        if member.is_dir() || !platform.is_native_binary(member.name()) {
            continue;
        }

        let Some(file_name) = Path::new(member.name()).file_name().map(ToOwned::to_owned) else {
            continue;
        };

        let path = target.join(file_name);
        let mut out = File::create(&path)?;
        io::copy(&mut member, &mut out)?;

        debug!("Extracted {} from {}", path.display(), archive.display());
        extracted.push(path);
    }

    Ok(extracted)
}
