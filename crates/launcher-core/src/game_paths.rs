use std::path::{Path, PathBuf};

use crate::{ASSETS_DIR, LIBRARIES_DIR, LOGS_DIR, MANIFEST_FILE, NATIVES_DIR, VERSIONS_DIR};

/// Fixed directory layout rooted at the game directory.
///
/// ```text
/// <root>/version_manifest.json
/// <root>/versions/<id>/<id>.json
/// <root>/versions/<id>/<id>.jar
/// <root>/libraries/<maven path>
/// <root>/assets/indexes/<index id>.json
/// <root>/assets/objects/<hash[0..2]>/<hash>
/// <root>/natives/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePaths {
    root: PathBuf,
}

impl GamePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn make_absolute(self) -> std::io::Result<Self> {
        if self.root.is_absolute() {
            return Ok(self);
        }

        Ok(Self::new(std::env::current_dir()?.join(self.root)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    pub fn version_dir(&self, id: &str) -> PathBuf {
        self.versions_dir().join(id)
    }

    pub fn version_json(&self, id: &str) -> PathBuf {
        self.version_dir(id).join(format!("{id}.json"))
    }

    pub fn version_jar(&self, id: &str) -> PathBuf {
        self.version_dir(id).join(format!("{id}.jar"))
    }

    pub fn libraries_dir(&self) -> PathBuf {
        self.root.join(LIBRARIES_DIR)
    }

    /// `relative` is a maven-style path with `/` separators.
    pub fn library(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.libraries_dir(), |path, part| path.join(part))
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    pub fn asset_indexes_dir(&self) -> PathBuf {
        self.assets_dir().join("indexes")
    }

    pub fn asset_index(&self, id: &str) -> PathBuf {
        self.asset_indexes_dir().join(format!("{id}.json"))
    }

    pub fn asset_objects_dir(&self) -> PathBuf {
        self.assets_dir().join("objects")
    }

    pub fn asset_object(&self, hash: &str) -> PathBuf {
        self.asset_objects_dir().join(hash_prefix(hash)).join(hash)
    }

    pub fn natives_dir(&self) -> PathBuf {
        self.root.join(NATIVES_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Creates the top-level directories of the layout.
    pub async fn create_dirs(&self) -> std::io::Result<()> {
        for dir in [
            self.root.clone(),
            self.versions_dir(),
            self.libraries_dir(),
            self.assets_dir(),
            self.natives_dir(),
        ] {
            tokio::fs::create_dir_all(dir).await?;
        }

        Ok(())
    }
}

/// First two characters of a content hash, or the whole hash if it is shorter.
pub fn hash_prefix(hash: &str) -> &str {
    hash.get(..2).unwrap_or(hash)
}
