use std::{io, path::PathBuf};

use itertools::Itertools;
use tokio::process::{Child, Command};
use tracing::info;
use typed_builder::TypedBuilder;

use crate::{
    error::Error,
    repository::{java_runner::JavaRunner, username::Username},
    OFFLINE_ACCESS_TOKEN, USER_TYPE,
};

#[cfg(windows)]
pub const CLASSPATH_SEPARATOR: &str = ";";

#[cfg(not(windows))]
pub const CLASSPATH_SEPARATOR: &str = ":";

/// Opaque identity obtained elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub uuid: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    /// Random uuid and a placeholder token.
    #[default]
    Offline,
    Online(Credentials),
}

impl Auth {
    fn identity(&self) -> (String, String) {
        match self {
            Auth::Offline => (uuid::Uuid::new_v4().to_string(), OFFLINE_ACCESS_TOKEN.to_string()),
            Auth::Online(credentials) => {
                (credentials.uuid.clone(), credentials.access_token.clone())
            }
        }
    }
}

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct LaunchOptions {
    #[builder(default)]
    pub username: Username,
    #[builder(default)]
    pub auth: Auth,
}

/// Everything needed to start the game process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub java: JavaRunner,
    pub jvm_args: Vec<String>,
    pub classpath: Vec<PathBuf>,
    pub natives_dir: PathBuf,
    pub main_class: String,
    pub version_id: String,
    pub game_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub asset_index_id: String,
    pub uuid: String,
    pub access_token: String,
    pub user_type: String,
    pub username: Username,
}

impl LaunchSpec {
    pub(crate) fn identity(auth: &Auth) -> (String, String, String) {
        let (uuid, access_token) = auth.identity();
        (uuid, access_token, USER_TYPE.to_string())
    }

    pub fn classpath_string(&self) -> String {
        self.classpath.iter().map(|path| path.display()).join(CLASSPATH_SEPARATOR)
    }

    /// Arguments passed to the runtime, executable excluded.
    pub fn arguments(&self) -> Vec<String> {
        let mut args = self.jvm_args.clone();

        args.extend([
            format!("-Djava.library.path={}", self.natives_dir.display()),
            "-cp".to_string(),
            self.classpath_string(),
            self.main_class.clone(),
        ]);

        args.extend(
            [
                ("--username", self.username.get().to_string()),
                ("--version", self.version_id.clone()),
                ("--gameDir", self.game_dir.display().to_string()),
                ("--assetsDir", self.assets_dir.display().to_string()),
                ("--assetIndex", self.asset_index_id.clone()),
                ("--uuid", self.uuid.clone()),
                ("--accessToken", self.access_token.clone()),
                ("--userType", self.user_type.clone()),
            ]
            .into_iter()
            .flat_map(|(flag, value)| [flag.to_string(), value]),
        );

        args
    }

    /// Starts the process in the game directory and returns without waiting.
    #[tracing::instrument(
        skip(self),
        fields(version = %self.version_id, java = %self.java.get_string())
    )]
    pub async fn spawn(&self) -> Result<Child, Error> {
        let child = Command::new(self.java.get())
            .args(self.arguments())
            .current_dir(&self.game_dir)
            .spawn()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound && self.java.is_fallback() {
                    Error::RuntimeNotFound {
                        program: self.java.get_string(),
                    }
                } else {
                    Error::Spawn {
                        program: self.java.get_string(),
                        source,
                    }
                }
            })?;

        info!("Started {} with pid {:?}", self.version_id, child.id());

        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> LaunchSpec {
        LaunchSpec {
            java: JavaRunner::default(),
            jvm_args: vec!["-Xmx2G".into()],
            classpath: vec![PathBuf::from("client.jar"), PathBuf::from("a.jar")],
            natives_dir: PathBuf::from("natives"),
            main_class: "net.minecraft.client.main.Main".into(),
            version_id: "1.20.1".into(),
            game_dir: PathBuf::from("mc"),
            assets_dir: PathBuf::from("mc/assets"),
            asset_index_id: "5".into(),
            uuid: "u".into(),
            access_token: "0".into(),
            user_type: "mojang".into(),
            username: Username::default(),
        }
    }

    #[test]
    fn argument_order() {
        let args = spec().arguments();

        assert_eq!(
            args,
            [
                "-Xmx2G".to_string(),
                "-Djava.library.path=natives".into(),
                "-cp".into(),
                format!("client.jar{CLASSPATH_SEPARATOR}a.jar"),
                "net.minecraft.client.main.Main".into(),
                "--username".into(),
                "Player".into(),
                "--version".into(),
                "1.20.1".into(),
                "--gameDir".into(),
                "mc".into(),
                "--assetsDir".into(),
                "mc/assets".into(),
                "--assetIndex".into(),
                "5".into(),
                "--uuid".into(),
                "u".into(),
                "--accessToken".into(),
                "0".into(),
                "--userType".into(),
                "mojang".into(),
            ]
        );
    }

    #[test]
    fn offline_identity_is_random() {
        let (first, token, user_type) = LaunchSpec::identity(&Auth::Offline);
        let (second, _, _) = LaunchSpec::identity(&Auth::Offline);

        assert_ne!(first, second);
        assert!(uuid::Uuid::parse_str(&first).is_ok());
        assert_eq!(token, "0");
        assert_eq!(user_type, "mojang");
    }

    #[test]
    fn online_identity_is_passed_through() {
        let auth = Auth::Online(Credentials {
            uuid: "real-uuid".into(),
            access_token: "real-token".into(),
        });

        let (uuid, token, _) = LaunchSpec::identity(&auth);
        assert_eq!((uuid.as_str(), token.as_str()), ("real-uuid", "real-token"));
    }

    #[tokio::test]
    async fn missing_fallback_runtime_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut spec = spec();
        spec.java = JavaRunner::str("definitely-not-a-java-binary-6d1f");
        spec.game_dir = dir.path().to_path_buf();

        assert!(matches!(spec.spawn().await, Err(Error::RuntimeNotFound { .. })));
    }
}
