//! User configuration.
//!
//! Read from `config.toml` in the zcalc config directory
//! (`$XDG_CONFIG_HOME/zcalc/` on Linux). Every field is optional:
//!
//! ```toml
//! mode = "common"
//! copy_result = true
//!
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! zcalc = "debug"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::calculator::EngineConfig;
use crate::keypad::Mode;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Operation set offered at startup.
    pub mode: Mode,
    /// Copy the final display to the clipboard.
    pub copy_result: bool,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for everything not listed in `modules`.
    pub default: String,
    /// Per-target level overrides.
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: "warn".to_string(),
            modules: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load from `path`, or from [`Settings::default_path`] when `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            extended_functions: self.mode.extended_functions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.mode, Mode::Scientific);
        assert!(!settings.copy_result);
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.engine_config().extended_functions);
    }

    #[test]
    fn test_full_config() {
        let settings = Settings::from_toml(
            r#"
            mode = "common"
            copy_result = true

            [logging]
            default = "info"

            [logging.modules]
            zcalc = "trace"
            "#,
        )
        .unwrap();

        assert_eq!(settings.mode, Mode::Common);
        assert!(settings.copy_result);
        assert_eq!(settings.logging.default, "info");
        assert_eq!(
            settings.logging.modules.get("zcalc").map(String::as_str),
            Some("trace")
        );
        assert!(!settings.engine_config().extended_functions);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Settings::from_toml(r#"mode = "graphing""#).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("zcalc-test-does-not-exist.toml");
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = std::env::temp_dir().join(format!("zcalc-test-{}.toml", std::process::id()));
        std::fs::write(&path, "mode = [").unwrap();
        let result = Settings::load(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
