//! Configuration loading and management

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use notes_core::ServiceOptions;
use serde::{Deserialize, Serialize};
use tower_http::cors::AllowOrigin;

/// Main configuration for the notes service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where notes are kept
    #[serde(default)]
    pub storage: StorageKind,

    /// Insert attempts per create before identifier collisions become an error
    #[serde(default = "default_id_attempts")]
    pub id_attempts: u32,

    /// Timeout for a single store call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Allowed CORS origin ("*" for any)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// `notes.json` in the data directory
    #[default]
    File,
    /// Process memory only, lost on exit
    Memory,
}

fn default_id_attempts() -> u32 {
    3
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1 MiB
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            id_attempts: default_id_attempts(),
            store_timeout_ms: default_store_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl Config {
    /// Load configuration from the config directory
    pub fn load(config_path: &str) -> Result<Self> {
        let config_file = Path::new(config_path).join("config.json");

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read config file: {:?}", config_file))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| "Failed to parse config.json")?;
            tracing::info!("Loaded configuration from {:?}", config_file);
            Ok(config)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_file
            );
            let config = Config::default();

            std::fs::create_dir_all(config_path)
                .with_context(|| format!("Failed to create config directory: {}", config_path))?;

            // Write default config for reference
            let content = serde_json::to_string_pretty(&config)?;
            std::fs::write(&config_file, content)
                .with_context(|| format!("Failed to write default config: {:?}", config_file))?;
            tracing::info!("Created default config at {:?}", config_file);

            Ok(config)
        }
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            id_attempts: self.id_attempts,
            store_timeout: Duration::from_millis(self.store_timeout_ms),
        }
    }

    /// Parse `cors_origin` for the CORS layer
    pub fn allow_origin(&self) -> Result<AllowOrigin> {
        if self.cors_origin == "*" {
            return Ok(AllowOrigin::any());
        }
        let origin = HeaderValue::from_str(&self.cors_origin)
            .with_context(|| format!("Invalid cors_origin: {:?}", self.cors_origin))?;
        Ok(AllowOrigin::exact(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("config");
        let dir = dir.to_str().unwrap();

        let config = Config::load(dir).unwrap();
        assert_eq!(config.storage, StorageKind::File);
        assert_eq!(config.id_attempts, 3);
        assert!(Path::new(dir).join("config.json").exists());

        // Second load reads the file that was written
        let reloaded = Config::load(dir).unwrap();
        assert_eq!(reloaded.store_timeout_ms, config.store_timeout_ms);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.json"),
            r#"{ "storage": "memory", "id_attempts": 5 }"#,
        )
        .unwrap();

        let config = Config::load(temp.path().to_str().unwrap()).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.id_attempts, 5);
        assert_eq!(config.max_body_bytes, default_max_body_bytes());
        assert_eq!(config.cors_origin, "*");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.json"), "{ nope").unwrap();
        assert!(Config::load(temp.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_service_options() {
        let config = Config {
            id_attempts: 7,
            store_timeout_ms: 250,
            ..Config::default()
        };
        let options = config.service_options();
        assert_eq!(options.id_attempts, 7);
        assert_eq!(options.store_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_allow_origin() {
        assert!(Config::default().allow_origin().is_ok());

        let exact = Config {
            cors_origin: "https://notes.example.com".to_string(),
            ..Config::default()
        };
        assert!(exact.allow_origin().is_ok());

        let bad = Config {
            cors_origin: "bad\norigin".to_string(),
            ..Config::default()
        };
        assert!(bad.allow_origin().is_err());
    }
}
