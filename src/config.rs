//! # Configuration
//!
//! Server, upload and geocoder settings. Every field has a default, so an
//! empty JSON object (or no file at all) is a valid configuration. Selected
//! environment variables override the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geocoding::{FixedGeocoder, GeocodeError, Geocoder, Location, MapQuestGeocoder};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    #[error("{0}")]
    Geocoder(#[from] GeocodeError),
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix every route is mounted under (default: "/api/v1")
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Emit JSON log lines instead of compact text
    #[serde(default)]
    pub log_json: bool,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

/// Photo upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes (default: 1 MB)
    #[serde(default = "default_max_file_upload")]
    pub max_file_upload: u64,

    /// Directory uploaded photos are written to
    #[serde(default = "default_file_upload_path")]
    pub file_upload_path: PathBuf,
}

/// Which geocoding provider to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    Mapquest,
    Fixed,
}

/// Geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_provider")]
    pub provider: GeocoderProvider,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    /// Lookup table for the fixed provider: query -> coordinates
    #[serde(default)]
    pub fixed: HashMap<String, FixedEntry>,
}

/// A fixed geocoder table entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixedEntry {
    pub latitude: f64,
    pub longitude: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_max_file_upload() -> u64 {
    1_000_000
}

fn default_file_upload_path() -> PathBuf {
    PathBuf::from("./public/uploads")
}

fn default_provider() -> GeocoderProvider {
    GeocoderProvider::Mapquest
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors_origins: Vec::new(),
            log_json: false,
            upload: UploadConfig::default(),
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_upload: default_max_file_upload(),
            file_upload_path: default_file_upload_path(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            base_url: None,
            fixed: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from an optional JSON file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|name| std::env::var(name).ok())
    }

    /// Parse a JSON config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from `PORT`, `MAX_FILE_UPLOAD`, `FILE_UPLOAD_PATH`,
    /// `GEOCODER_PROVIDER` and `GEOCODER_API_KEY`
    pub fn with_env<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = parse_env("PORT", &port)?;
        }
        if let Some(max) = lookup("MAX_FILE_UPLOAD") {
            self.upload.max_file_upload = parse_env("MAX_FILE_UPLOAD", &max)?;
        }
        if let Some(path) = lookup("FILE_UPLOAD_PATH") {
            self.upload.file_upload_path = PathBuf::from(path);
        }
        if let Some(provider) = lookup("GEOCODER_PROVIDER") {
            self.geocoder.provider = match provider.to_lowercase().as_str() {
                "mapquest" => GeocoderProvider::Mapquest,
                "fixed" => GeocoderProvider::Fixed,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "GEOCODER_PROVIDER".to_string(),
                        value: provider,
                    })
                }
            };
        }
        if let Some(key) = lookup("GEOCODER_API_KEY") {
            self.geocoder.api_key = Some(key);
        }
        Ok(self)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl GeocoderConfig {
    /// Instantiate the configured provider
    pub fn build(&self) -> ConfigResult<Arc<dyn Geocoder>> {
        match self.provider {
            GeocoderProvider::Mapquest => {
                let key = self.api_key.clone().unwrap_or_default();
                let geocoder = match &self.base_url {
                    Some(base) => MapQuestGeocoder::with_base_url(key, base)?,
                    None => MapQuestGeocoder::new(key)?,
                };
                Ok(Arc::new(geocoder))
            }
            GeocoderProvider::Fixed => {
                let mut geocoder = FixedGeocoder::new();
                for (query, entry) in &self.fixed {
                    geocoder.insert(query, Location::at(entry.latitude, entry.longitude));
                }
                Ok(Arc::new(geocoder))
            }
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.upload.max_file_upload, 1_000_000);
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_empty_object_is_valid() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.geocoder.provider, GeocoderProvider::Mapquest);
        assert_eq!(config.upload.file_upload_path, PathBuf::from("./public/uploads"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "8080"),
            ("MAX_FILE_UPLOAD", "2000000"),
            ("FILE_UPLOAD_PATH", "/tmp/uploads"),
            ("GEOCODER_PROVIDER", "fixed"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default()
            .with_env(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upload.max_file_upload, 2_000_000);
        assert_eq!(config.upload.file_upload_path, PathBuf::from("/tmp/uploads"));
        assert_eq!(config.geocoder.provider, GeocoderProvider::Fixed);
    }

    #[test]
    fn test_invalid_env_value() {
        let result = AppConfig::default().with_env(|name| {
            (name == "MAX_FILE_UPLOAD").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"port": 7000, "geocoder": {{"provider": "fixed", "fixed": {{"02215": {{"latitude": 42.35, "longitude": -71.1}}}}}}}}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.geocoder.fixed.len(), 1);
        assert!(config.geocoder.build().is_ok());
    }

    #[test]
    fn test_mapquest_without_key_fails() {
        let result = GeocoderConfig::default().build();
        assert!(matches!(result, Err(ConfigError::Geocoder(_))));
    }
}
