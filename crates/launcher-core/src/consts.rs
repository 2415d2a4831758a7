pub const LAUNCHER_MANIFEST: &str = "https://piston-meta.mojang.com/mc/game/version_manifest.json";
pub const RESOURCES_URL: &str = "https://resources.download.minecraft.net";
/// Base of the legacy asset index template: `{base}/{id}/{id}.json`.
pub const ASSET_INDEX_BASE_URL: &str = "https://piston-meta.mojang.com/v1/packages";

pub const DEFAULT_CONCURRENCY: usize = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const MANIFEST_FILE: &str = "version_manifest.json";
pub const VERSIONS_DIR: &str = "versions";
pub const LIBRARIES_DIR: &str = "libraries";
pub const ASSETS_DIR: &str = "assets";
pub const NATIVES_DIR: &str = "natives";
pub const LOGS_DIR: &str = "logs";
pub const LOG_FILE: &str = "launcher.log";
pub const CONFIG_FILE: &str = "launcher.toml";

/// Asset index id used when a descriptor names none.
pub const LEGACY_ASSET_INDEX: &str = "legacy";
pub const OFFLINE_ACCESS_TOKEN: &str = "0";
pub const USER_TYPE: &str = "mojang";
pub const DEFAULT_USERNAME: &str = "Player";

pub const LAUNCHER_NAME: &str = "mc-launcher";
pub const LAUNCHER_VERSION: &str = "0.1.0";
