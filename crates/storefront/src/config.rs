//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TT_DATA_DIR` - Directory for the persisted records (default: `.twist-taste`)
//! - `TT_STORAGE_QUOTA_BYTES` - Store capacity in bytes (default: 5 MiB)
//! - `TT_INVOICE_DIR` - Where invoices are written (default: `invoices`)
//! - `TT_WHATSAPP_NUMBER` - Store owner's WhatsApp number (default: 97433824737)
//! - `TT_NOTIFY_DESTINATION` - Order notification destination; notifications
//!   are skipped when unset
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::DEFAULT_QUOTA_BYTES;

const DEFAULT_DATA_DIR: &str = ".twist-taste";
const DEFAULT_INVOICE_DIR: &str = "invoices";
const DEFAULT_WHATSAPP_NUMBER: &str = "97433824737";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the catalog and cart records
    pub data_dir: PathBuf,
    /// Capacity of the record store in bytes
    pub storage_quota_bytes: usize,
    /// Invoice download directory
    pub invoice_dir: PathBuf,
    /// WhatsApp number for the contact link, digits only
    pub whatsapp_number: String,
    /// Order notification destination
    pub notify_destination: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            invoice_dir: PathBuf::from(DEFAULT_INVOICE_DIR),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            notify_destination: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_quota_bytes = get_optional_env(&vars, "TT_STORAGE_QUOTA_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("TT_STORAGE_QUOTA_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_QUOTA_BYTES);

        let whatsapp_number =
            get_env_or_default(&vars, "TT_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        validate_phone_number(&whatsapp_number, "TT_WHATSAPP_NUMBER")?;

        Ok(Self {
            data_dir: get_env_or_default(&vars, "TT_DATA_DIR", DEFAULT_DATA_DIR).into(),
            storage_quota_bytes,
            invoice_dir: get_env_or_default(&vars, "TT_INVOICE_DIR", DEFAULT_INVOICE_DIR).into(),
            whatsapp_number,
            notify_destination: get_optional_env(&vars, "TT_NOTIFY_DESTINATION"),
            sentry_dsn: get_optional_env(&vars, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&vars, "SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    vars(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(vars, key).unwrap_or_else(|| default.to_string())
}

/// Validate that a phone number is digits only.
fn validate_phone_number(value: &str, var_name: &str) -> Result<(), ConfigError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must contain digits only, without '+' or spaces".to_string(),
        ))
    }
}
