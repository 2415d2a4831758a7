use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[cfg(windows)]
const JAVA_BINARY: &str = "java.exe";

#[cfg(not(windows))]
const JAVA_BINARY: &str = "java";

#[cfg(windows)]
const WELL_KNOWN_JAVA: &[&str] = &[
    r"C:\Program Files\Eclipse Adoptium\jdk-21\bin\java.exe",
    r"C:\Program Files\Java\jdk-21\bin\java.exe",
    r"C:\Program Files\Microsoft\jdk-21\bin\java.exe",
];

#[cfg(target_os = "macos")]
const WELL_KNOWN_JAVA: &[&str] = &[
    "/Library/Java/JavaVirtualMachines/temurin-21.jdk/Contents/Home/bin/java",
    "/opt/homebrew/opt/openjdk@21/bin/java",
    "/usr/local/opt/openjdk@21/bin/java",
];

#[cfg(all(not(windows), not(target_os = "macos")))]
const WELL_KNOWN_JAVA: &[&str] = &[
    "/usr/lib/jvm/java-21-openjdk/bin/java",
    "/usr/lib/jvm/java-21-openjdk-amd64/bin/java",
    "/usr/lib/jvm/default-java/bin/java",
];

/// Java executable used to start the game.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum JavaRunner {
    /// Bare command name resolved through `PATH` at spawn time.
    String(String),
    Path(PathBuf),
}

impl JavaRunner {
    pub fn get(&self) -> &OsStr {
        match self {
            JavaRunner::String(s) => OsStr::new(s),
            JavaRunner::Path(p) => p.as_os_str(),
        }
    }

    pub fn get_string(&self) -> String {
        match self {
            JavaRunner::String(s) => s.to_string(),
            JavaRunner::Path(p) => p.to_string_lossy().to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, JavaRunner::String(_))
    }

    pub fn path(p: PathBuf) -> JavaRunner {
        JavaRunner::Path(p)
    }

    pub fn str(s: &str) -> JavaRunner {
        JavaRunner::String(s.to_string())
    }

    /// Probes, in order: `explicit`, `$JAVA_HOME/bin/java`, the well-known
    /// install locations of the host. Falls back to the bare `java` command.
    pub fn locate(explicit: Option<&Path>) -> JavaRunner {
        let java_home = std::env::var_os("JAVA_HOME")
            .map(|home| PathBuf::from(home).join("bin").join(JAVA_BINARY));

        let candidates = explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(java_home)
            .chain(WELL_KNOWN_JAVA.iter().map(PathBuf::from));

        Self::first_existing(candidates)
    }

    pub fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> JavaRunner {
        for candidate in candidates {
            if candidate.is_file() {
                debug!("Using java runtime at {}", candidate.display());
                return JavaRunner::Path(candidate);
            }
        }

        warn!("No java runtime found, falling back to `java` from PATH");
        JavaRunner::default()
    }
}

impl Default for JavaRunner {
    fn default() -> JavaRunner {
        JavaRunner::String("java".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::write(&first, b"").unwrap();
        std::fs::write(&second, b"").unwrap();

        let runner =
            JavaRunner::first_existing([dir.path().join("missing"), first.clone(), second]);

        assert_eq!(runner, JavaRunner::Path(first));
        assert!(!runner.is_fallback());
    }

    #[test]
    fn falls_back_to_path_lookup() {
        let dir = tempfile::tempdir().unwrap();

        let runner = JavaRunner::first_existing([dir.path().join("nope")]);

        assert_eq!(runner, JavaRunner::str("java"));
        assert!(runner.is_fallback());
    }

    #[test]
    fn explicit_path_is_probed_first() {
        let dir = tempfile::tempdir().unwrap();
        let java = dir.path().join("java");
        std::fs::write(&java, b"").unwrap();

        assert_eq!(JavaRunner::locate(Some(&java)), JavaRunner::Path(java));
    }
}
