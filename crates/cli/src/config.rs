//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CAMPUS_DATA_PATH` - Path of the persisted aggregate
//!   (default: `campus_food_db.json` in the working directory)
//! - `GEMINI_API_KEY` - Gemini API key; without it the AI features fall
//!   back to their synthetic/placeholder outputs
//! - `GEMINI_PRO_MODEL` - Model for demand prediction
//! - `GEMINI_FLASH_MODEL` - Model for merchant advice
//! - `GEMINI_BASE_URL` - Endpoint override (primarily for testing)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use campus_canteen_ai::GeminiConfig;
use campus_canteen_datastore::DEFAULT_DB_FILE;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI application configuration.
#[derive(Debug)]
pub struct CliConfig {
    /// Path of the persisted aggregate.
    pub data_path: PathBuf,
    /// Gemini configuration, present only when an API key is set.
    pub gemini: Option<GeminiConfig>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_path = match std::env::var("CAMPUS_DATA_PATH") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "CAMPUS_DATA_PATH".to_owned(),
                    "path is empty".to_owned(),
                ));
            }
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(DEFAULT_DB_FILE),
        };

        let gemini = std::env::var("GEMINI_API_KEY").ok().map(|key| {
            let mut config = GeminiConfig::new(SecretString::from(key));
            if let Ok(model) = std::env::var("GEMINI_PRO_MODEL") {
                config.pro_model = model;
            }
            if let Ok(model) = std::env::var("GEMINI_FLASH_MODEL") {
                config.flash_model = model;
            }
            if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
                config.base_url = base_url;
            }
            config
        });

        Ok(Self { data_path, gemini })
    }
}
