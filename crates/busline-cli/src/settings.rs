//! Settings file handling

use busline_client::ClientConfig;
use busline_view::ViewConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Combined client and view settings
///
/// ```toml
/// [client]
/// base_url = "http://localhost:8000"
/// api_prefix = "/api/v1"
/// timeout_secs = 30
///
/// [view]
/// page_limit = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub client: ClientConfig,
    pub view: ViewConfig,
}

/// Settings loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    /// Returns the TOML error for malformed input.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file cannot be read
    /// - `ConfigError::Parse` if it is not valid settings TOML
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_optional() {
        let settings = Settings::from_toml("[view]\npage_limit = 10\n").unwrap();
        assert_eq!(settings.view.page_limit, 10);
        assert_eq!(settings.client, ClientConfig::default());
    }

    #[test]
    fn full_file_parses() {
        let settings = Settings::from_toml(
            r#"
            [client]
            base_url = "https://buses.example"
            api_prefix = "/api/v2"
            timeout_secs = 5

            [view]
            page_limit = 50
            "#,
        )
        .unwrap();
        assert_eq!(settings.client.api_prefix, "/api/v2");
        assert_eq!(settings.client.timeout_secs, 5);
        assert_eq!(settings.view.page_limit, 50);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Settings::from_toml("[view]\npage_limit = \"many\"\n").is_err());
    }
}
