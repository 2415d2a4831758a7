use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level document listing every known version.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct LauncherManifest {
    #[serde(default)]
    pub latest: Option<Latest>,
    pub versions: Vec<VersionSummary>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct VersionSummary {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub version_type: VersionType,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    #[default]
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
    #[serde(other)]
    Unknown,
}

impl VersionType {
    pub fn as_str(&self) -> &str {
        match self {
            VersionType::Release => "release",
            VersionType::Snapshot => "snapshot",
            VersionType::OldBeta => "old_beta",
            VersionType::OldAlpha => "old_alpha",
            VersionType::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for VersionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(Self::Release),
            "snapshot" => Ok(Self::Snapshot),
            "old_beta" => Ok(Self::OldBeta),
            "old_alpha" => Ok(Self::OldAlpha),
            other => Err(format!("unknown version type `{other}`")),
        }
    }
}

/// Loaded manifest keyed by version id. Iteration follows manifest order.
#[derive(Debug, Default, Clone)]
pub struct VersionList {
    latest: Option<Latest>,
    versions: IndexMap<String, VersionSummary>,
}

impl From<LauncherManifest> for VersionList {
    fn from(manifest: LauncherManifest) -> Self {
        let versions = manifest
            .versions
            .into_iter()
            .map(|version| (version.id.clone(), version))
            .collect();

        Self {
            latest: manifest.latest,
            versions,
        }
    }
}

impl VersionList {
    pub fn get(&self, id: &str) -> Option<&VersionSummary> {
        self.versions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.versions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionSummary> {
        self.versions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    pub fn of_type(&self, version_type: VersionType) -> impl Iterator<Item = &VersionSummary> {
        self.iter().filter(move |version| version.version_type == version_type)
    }

    pub fn latest(&self) -> Option<&Latest> {
        self.latest.as_ref()
    }

    pub fn latest_release(&self) -> Option<&VersionSummary> {
        self.latest
            .as_ref()
            .and_then(|latest| self.get(&latest.release))
            .or_else(|| self.of_type(VersionType::Release).next())
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "latest": { "release": "1.20.1", "snapshot": "23w31a" },
        "versions": [
            {
                "id": "23w31a", "type": "snapshot", "url": "https://meta/23w31a.json",
                "time": "", "releaseTime": ""
            },
            { "id": "1.20.1", "type": "release", "url": "https://meta/1.20.1.json" },
            { "id": "b1.7.3", "type": "old_beta", "url": "https://meta/b1.7.3.json" },
            { "id": "1.19.4", "type": "release", "url": "https://meta/1.19.4.json" }
        ]
    }"#;

    fn list() -> VersionList {
        serde_json::from_str::<LauncherManifest>(MANIFEST).unwrap().into()
    }

    #[test]
    fn keeps_manifest_order() {
        let list = list();
        assert_eq!(list.ids().collect::<Vec<_>>(), ["23w31a", "1.20.1", "b1.7.3", "1.19.4"]);
        assert_eq!(list.get("b1.7.3").unwrap().version_type, VersionType::OldBeta);
    }

    #[test]
    fn filters_by_type() {
        let list = list();
        let releases = list
            .of_type(VersionType::Release)
            .map(|v| v.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(releases, ["1.20.1", "1.19.4"]);
        assert_eq!(list.latest_release().unwrap().id, "1.20.1");
    }

    #[test]
    fn unknown_type_does_not_fail() {
        let manifest: LauncherManifest =
            serde_json::from_str(r#"{"versions":[{"id":"x","type":"experiment","url":"u"}]}"#)
                .unwrap();
        assert_eq!(manifest.versions[0].version_type, VersionType::Unknown);
    }
}
