use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`IdentifyConfig::executable`].
pub const ENV_EXECUTABLE: &str = "MAGICK_EXIF_IDENTIFY";
/// Environment variable overriding [`IdentifyConfig::timeout_ms`].
pub const ENV_TIMEOUT_MS: &str = "MAGICK_EXIF_TIMEOUT_MS";

/// How to run ImageMagick's `identify`.
///
/// Deserializes with defaults for missing keys, so it can sit inside an
/// application's own settings file. The key `identify` is accepted as an
/// alias for `executable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifyConfig {
    /// Path or name of the `identify` binary, resolved through `PATH` when bare
    #[serde(alias = "identify")]
    pub executable: PathBuf,

    /// Kill `identify` if it runs longer than this, in milliseconds
    pub timeout_ms: u64,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("identify"),
            timeout_ms: 20_000,
        }
    }
}

impl IdentifyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `MAGICK_EXIF_IDENTIFY` and `MAGICK_EXIF_TIMEOUT_MS`
    /// when they are set. An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(executable) = lookup(ENV_EXECUTABLE).filter(|v| !v.trim().is_empty()) {
            self.executable = PathBuf::from(executable);
        }
        if let Some(timeout_ms) = lookup(ENV_TIMEOUT_MS).and_then(|v| v.trim().parse().ok()) {
            self.timeout_ms = timeout_ms;
        }
        self
    }

    pub fn with_executable(mut self, executable: impl AsRef<Path>) -> Self {
        self.executable = executable.as_ref().to_path_buf();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
