use tracing::info;

use crate::{
    error::Error,
    game_paths::{hash_prefix, GamePaths},
    repository::{assets::AssetIndex, manifest::VersionDescriptor},
    ASSET_INDEX_BASE_URL, RESOURCES_URL,
};

use super::{DownloadContext, DownloadTask};

/// Expands a descriptor's asset index into content-addressed downloads.
#[derive(Debug, Clone)]
pub struct AssetsResolver {
    index_base_url: String,
    resources_url: String,
}

impl Default for AssetsResolver {
    fn default() -> Self {
        Self::new(ASSET_INDEX_BASE_URL, RESOURCES_URL)
    }
}

impl AssetsResolver {
    pub fn new(index_base_url: impl Into<String>, resources_url: impl Into<String>) -> Self {
        Self {
            index_base_url: index_base_url.into(),
            resources_url: resources_url.into(),
        }
    }

    /// `{resources}/{hash[0..2]}/{hash}`
    pub fn object_url(&self, hash: &str) -> String {
        format!("{}/{}/{hash}", self.resources_url.trim_end_matches('/'), hash_prefix(hash))
    }

    pub fn object_tasks(&self, index: &AssetIndex, paths: &GamePaths) -> Vec<DownloadTask> {
        index
            .objects()
            .map(|object| {
                DownloadTask::new(self.object_url(object.hash), paths.asset_object(object.hash))
            })
            .collect()
    }

    /// Fetches the index if absent and returns the object batch.
    /// `None` when the descriptor carries no asset index at all.
    pub async fn resolve(
        &self,
        ctx: &DownloadContext,
        paths: &GamePaths,
        descriptor: &VersionDescriptor,
    ) -> Result<Option<Vec<DownloadTask>>, Error> {
        let Some(index_ref) = descriptor.asset_index_ref() else {
            ctx.log_info(&format!("[INFO] {} has no asset index", descriptor.id));
            return Ok(None);
        };

        let task = DownloadTask::new(
            index_ref.url(&self.index_base_url),
            paths.asset_index(index_ref.id()),
        );
        let _ = ctx.fetch_if_absent(&task).await;

        let index: AssetIndex = ctx.read_json(&task.path).await?;

        info!("Asset index {} lists {} objects", index_ref.id(), index.objects.len());

        Ok(Some(self.object_tasks(&index, paths)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_task_is_content_addressed() {
        let resolver = AssetsResolver::default();
        let paths = GamePaths::new("mc");
        let index: AssetIndex = serde_json::from_str(
            r#"{"objects": {
                "minecraft/sounds/ambient/cave/cave1.ogg": {
                    "hash": "bdf48ef6b5d0d23bbb02e17d04865216179f510a", "size": 1
                },
                "icons/icon_16x16.png": {
                    "hash": "0a2f5c3b0b7b0a4b1e3c1b6b0d7c0a9e2f1d3c4b", "size": 2
                }
            }}"#,
        )
        .unwrap();

        let tasks = resolver.object_tasks(&index, &paths);

        assert_eq!(tasks.len(), 2);
        for (task, object) in tasks.iter().zip(index.objects()) {
            let prefix = &object.hash[..2];
            assert_eq!(task.path, paths.asset_objects_dir().join(prefix).join(object.hash));
            assert_eq!(
                task.url,
                format!("https://resources.download.minecraft.net/{prefix}/{}", object.hash)
            );
        }
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let resolver = AssetsResolver::new("https://meta/", "https://res/");
        assert_eq!(resolver.object_url("abcdef"), "https://res/ab/abcdef");
    }
}
