use crate::domain::tag::DEFAULT_LOOKBACK;
use crate::domain::version::parse_base_version;
use crate::error::{Result, TagNextError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "tagnext.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".tagnext.toml";

/// Represents the complete configuration for tag-next-build.
///
/// Every section is optional; a missing file yields [Config::default].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub first_version: FirstVersionConfig,

    #[serde(default)]
    pub flutter: FlutterConfig,
}

fn default_lookback() -> usize {
    DEFAULT_LOOKBACK
}

fn default_base() -> String {
    "0.1".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from("pubspec.yaml")
}

fn default_true() -> bool {
    true
}

/// Tag discovery settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// How many candidate tags to keep, most recent first
    #[serde(default = "default_lookback")]
    pub lookback: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            lookback: default_lookback(),
        }
    }
}

/// Settings for the very first tag of a build type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FirstVersionConfig {
    /// `major.minor` used when the operator just presses Enter
    #[serde(default = "default_base")]
    pub default_base: String,
}

impl Default for FirstVersionConfig {
    fn default() -> Self {
        FirstVersionConfig {
            default_base: default_base(),
        }
    }
}

/// Flutter manifest patching settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FlutterConfig {
    /// Manifest path, relative to the project directory
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Run `flutter pub get` after rewriting the manifest
    #[serde(default = "default_true")]
    pub run_pub_get: bool,
}

impl Default for FlutterConfig {
    fn default() -> Self {
        FlutterConfig {
            manifest: default_manifest(),
            run_pub_get: true,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| TagNextError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        parse_base_version(&self.first_version.default_base).map_err(|e| {
            TagNextError::config(format!("first_version.default_base: {}", e))
        })?;
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagnext.toml` in current directory
/// 3. `.tagnext.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        TagNextError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), "loading configuration");

    Config::from_toml(&content)
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.discovery.lookback, 8);
        assert_eq!(config.first_version.default_base, "0.1");
        assert_eq!(config.flutter.manifest, PathBuf::from("pubspec.yaml"));
        assert!(config.flutter.run_pub_get);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_toml("[flutter]\nrun_pub_get = false\n").unwrap();
        assert!(!config.flutter.run_pub_get);
        assert_eq!(config.flutter.manifest, PathBuf::from("pubspec.yaml"));
        assert_eq!(config.discovery.lookback, 8);
    }

    #[test]
    fn test_invalid_default_base_rejected() {
        let err = Config::from_toml("[first_version]\ndefault_base = \"one\"\n").unwrap_err();
        assert!(err.to_string().contains("default_base"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            Config::from_toml("[discovery\nlookback = 3"),
            Err(TagNextError::Config(_))
        ));
    }
}
