//! Configuration loading for Locker.
//!
//! Sources, in increasing precedence:
//! - Bundled defaults (include_str! from locker.toml)
//! - `~/.config/locker/locker.toml`
//! - `./locker.toml`
//! - `LOCKER_*` environment variables, `__` between section and key
//!   (e.g. `LOCKER_STORAGE__MEDIA_ROOT=/srv/media`)

use config::{Config, Environment, File, FileFormat};
use locker_error::{ConfigError, LockerError, LockerResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../locker.toml");

/// Where media content is stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for media content
    pub media_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("media"),
        }
    }
}

/// Where catalog, metadata and interactions are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PersistenceConfig {
    /// JSON state document
    pub state_file: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("state.json"),
        }
    }
}

/// Change notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventConfig {
    /// Buffered notifications per subscriber before the oldest are dropped
    pub channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            channel_capacity: locker_storage::DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Top-level Locker configuration.
///
/// # Example
///
/// ```no_run
/// use locker::LockerConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LockerConfig::load()?;
/// println!("media lives in {}", config.storage.media_root.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct LockerConfig {
    /// Media content location
    #[serde(default)]
    pub storage: StorageConfig,

    /// State document location
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Change notification settings
    #[serde(default)]
    pub events: EventConfig,
}

impl LockerConfig {
    /// Load configuration from every source, user overrides winning.
    ///
    /// Missing user files are skipped. Relative paths resolve against
    /// [`LockerConfig::data_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    #[instrument]
    pub fn load() -> LockerResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/locker/locker.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("locker").required(false))
            .add_source(
                Environment::with_prefix("LOCKER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = Self::deserialize_from(builder)?;
        Ok(config.resolved_against(&Self::data_dir()))
    }

    /// Load configuration from a single file.
    ///
    /// Relative paths resolve against the directory holding the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> LockerResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        let builder = Config::builder().add_source(File::from(path));
        let config: Self = Self::deserialize_from(builder)?;

        let base = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config.resolved_against(&base))
    }

    /// Default configuration with every path placed under `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        Self::default().resolved_against(root.as_ref())
    }

    /// Per-user data directory that relative paths resolve against.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("locker")
    }

    /// Make relative paths absolute with respect to `base`.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.storage.media_root.is_relative() {
            self.storage.media_root = base.join(&self.storage.media_root);
        }
        if self.persistence.state_file.is_relative() {
            self.persistence.state_file = base.join(&self.persistence.state_file);
        }
        self
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> LockerResult<Self> {
        builder
            .build()
            .map_err(|e| {
                LockerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LockerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_parse() {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        let config = LockerConfig::deserialize_from(builder).unwrap();
        assert_eq!(config, LockerConfig::default());
    }

    #[test]
    fn test_rooted_at_resolves_paths() {
        let config = LockerConfig::rooted_at("/srv/locker");
        assert_eq!(config.storage.media_root, PathBuf::from("/srv/locker/media"));
        assert_eq!(
            config.persistence.state_file,
            PathBuf::from("/srv/locker/state.json")
        );
    }

    #[test]
    fn test_absolute_paths_untouched() {
        let mut config = LockerConfig::default();
        config.storage.media_root = PathBuf::from("/mnt/photos");
        let config = config.resolved_against(Path::new("/elsewhere"));
        assert_eq!(config.storage.media_root, PathBuf::from("/mnt/photos"));
    }
}
