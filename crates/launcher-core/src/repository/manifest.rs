use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::LEGACY_ASSET_INDEX;

/// Per-version document.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    pub id: String,
    pub main_class: String,
    #[serde(default)]
    pub asset_index: Option<AssetIndexRef>,
    #[serde(default)]
    pub assets: Option<AssetIndexRef>,
    pub downloads: Downloads,
    #[serde(default)]
    pub libraries: Vec<Library>,
}

impl VersionDescriptor {
    /// Reference used to locate the index document. Prefers `assetIndex`,
    /// which usually carries a url, then `assets`.
    pub fn asset_index_ref(&self) -> Option<&AssetIndexRef> {
        self.asset_index.as_ref().or(self.assets.as_ref())
    }

    /// Asset index id passed to the game. Prefers `assets`, then `assetIndex`.
    pub fn asset_index_id(&self) -> &str {
        self.assets
            .as_ref()
            .or(self.asset_index.as_ref())
            .map_or(LEGACY_ASSET_INDEX, AssetIndexRef::id)
    }
}

/// Either an inline `{id, url}` object or a legacy bare id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AssetIndexRef {
    Inline {
        id: String,
        #[serde(default)]
        url: Option<String>,
    },
    Reference(String),
}

impl AssetIndexRef {
    pub fn id(&self) -> &str {
        match self {
            AssetIndexRef::Inline { id, .. } | AssetIndexRef::Reference(id) => id,
        }
    }

    /// Location of the index document. A bare id, or an inline object
    /// without a url, is expanded as `{base}/{id}/{id}.json`.
    pub fn url(&self, base: &str) -> String {
        match self {
            AssetIndexRef::Inline { url: Some(url), .. } => url.clone(),
            AssetIndexRef::Inline { id, url: None } | AssetIndexRef::Reference(id) => {
                format!("{}/{id}/{id}.json", base.trim_end_matches('/'))
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Downloads {
    pub client: DownloadFile,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DownloadFile {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Library {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub downloads: LibraryDownloads,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<Artifact>,
    #[serde(default)]
    pub classifiers: IndexMap<String, Artifact>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub url: String,
}
