use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use crate::fs::write_to_file;

/// Local sink for downloaded artifacts, keyed by their destination path.
///
/// Presence is the only download state that is ever persisted, so `has`
/// must never report an artifact that was only partially written.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn has(&self, path: &Path) -> bool;

    async fn put(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    async fn get(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`ArtifactStore`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl FsStore {
    fn partial_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".part");
        path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FsStore {
    async fn has(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn put(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let partial = Self::partial_path(path);

        write_to_file(bytes, &partial).await?;

        if let Err(err) = tokio::fs::rename(&partial, path).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(err);
        }

        Ok(())
    }

    async fn get(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_creates_parents_and_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.jar");

        assert!(!FsStore.has(&path).await);

        FsStore.put(&path, b"jar").await.unwrap();

        assert!(FsStore.has(&path).await);
        assert_eq!(FsStore.get(&path).await.unwrap(), b"jar");
        assert!(!FsStore::partial_path(&path).exists());
    }

    #[test]
    fn partial_path_keeps_directory() {
        assert_eq!(
            FsStore::partial_path(Path::new("libs/lwjgl.jar")),
            Path::new("libs/lwjgl.jar.part")
        );
    }
}
