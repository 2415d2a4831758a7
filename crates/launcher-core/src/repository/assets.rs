use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Asset index document: `{ "objects": { "<name>": { "hash", "size" } } }`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AssetIndex {
    #[serde(default)]
    pub objects: IndexMap<String, AssetInformation>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AssetInformation {
    pub hash: String,
    pub size: u64,
}

/// A named object of an asset index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetObject<'a> {
    pub name: &'a str,
    pub hash: &'a str,
    pub size: u64,
}

impl AssetIndex {
    pub fn objects(&self) -> impl Iterator<Item = AssetObject<'_>> {
        self.objects.iter().map(|(name, info)| AssetObject {
            name,
            hash: &info.hash,
            size: info.size,
        })
    }
}
