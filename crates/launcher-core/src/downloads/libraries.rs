use std::path::PathBuf;

use crate::{
    game_paths::GamePaths,
    instance::natives::Platform,
    repository::manifest::{Artifact, VersionDescriptor},
};

use super::DownloadTask;

/// Classpath and download batch of a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryArtifacts {
    /// Client jar first, then libraries in descriptor order.
    pub classpath: Vec<PathBuf>,
    pub tasks: Vec<DownloadTask>,
}

/// Client jar plus every library exposing a plain artifact.
/// Classifier-only (native) libraries are left to [`native_artifacts`].
pub fn library_artifacts(descriptor: &VersionDescriptor, paths: &GamePaths) -> LibraryArtifacts {
    let client = paths.version_jar(&descriptor.id);

    let mut artifacts = LibraryArtifacts {
        classpath: vec![client.clone()],
        tasks: vec![DownloadTask::new(&descriptor.downloads.client.url, client)],
    };

    for artifact in descriptor.libraries.iter().filter_map(|lib| lib.downloads.artifact.as_ref()) {
        let path = paths.library(&artifact.path);
        artifacts.tasks.push(DownloadTask::new(&artifact.url, path.clone()));
        artifacts.classpath.push(path);
    }

    artifacts
}

/// Classifier archives matching `platform`, in descriptor order.
pub fn native_artifacts(
    descriptor: &VersionDescriptor,
    paths: &GamePaths,
    platform: Platform,
) -> Vec<DownloadTask> {
    descriptor
        .libraries
        .iter()
        .flat_map(|lib| lib.downloads.classifiers.iter())
        .filter(|(classifier, _)| platform.matches_classifier(classifier))
        .map(|(_, Artifact { path, url })| DownloadTask::new(url, paths.library(path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> VersionDescriptor {
        serde_json::from_str(
            r#"{
                "id": "1.20.1",
                "mainClass": "net.minecraft.client.main.Main",
                "downloads": { "client": { "url": "https://example/client.jar" } },
                "libraries": [
                    {
                        "downloads": {
                            "artifact": { "path": "com/a/a.jar", "url": "https://libs/a.jar" }
                        }
                    },
                    { "downloads": { "classifiers": {
                        "natives-windows": {
                            "path": "org/lwjgl/natives-windows.jar", "url": "https://libs/nw.jar"
                        },
                        "natives-linux": {
                            "path": "org/lwjgl/natives-linux.jar", "url": "https://libs/nl.jar"
                        }
                    } } },
                    {
                        "downloads": {
                            "artifact": { "path": "com/b/b.jar", "url": "https://libs/b.jar" }
                        }
                    },
                    { "name": "no-downloads" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn client_jar_is_first_and_order_is_kept() {
        let paths = GamePaths::new("mc");
        let artifacts = library_artifacts(&descriptor(), &paths);

        assert_eq!(
            artifacts.classpath,
            [
                paths.version_jar("1.20.1"),
                paths.library("com/a/a.jar"),
                paths.library("com/b/b.jar")
            ]
        );
        assert_eq!(
            artifacts.tasks[0],
            DownloadTask::new("https://example/client.jar", paths.version_jar("1.20.1"))
        );
        assert_eq!(artifacts.tasks.len(), 3);
    }

    #[test]
    fn natives_follow_platform() {
        let paths = GamePaths::new("mc");

        let windows = native_artifacts(&descriptor(), &paths, Platform::Windows);
        assert_eq!(
            windows,
            [DownloadTask::new(
                "https://libs/nw.jar",
                paths.library("org/lwjgl/natives-windows.jar")
            )]
        );

        let osx = native_artifacts(&descriptor(), &paths, Platform::Osx);
        assert!(osx.is_empty());
    }
}
