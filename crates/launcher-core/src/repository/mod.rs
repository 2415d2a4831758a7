pub mod assets;
pub mod java_runner;
pub mod launcher_manifest;
pub mod manifest;
pub mod username;
