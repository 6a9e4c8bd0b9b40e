//! Integration tests for Twist & Taste.
//!
//! These tests drive the storefront and admin crates end to end against a
//! [`FileStore`] in a temporary directory, reopening the store to check what
//! survives a reload.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p twist-taste-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_persistence` - Catalog merge, reload and reset
//! - `cart_flow` - Cart mutations and reload
//! - `checkout_flow` - Review, invoice and notification
//! - `admin_panel` - Passphrase gate and catalog editing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use twist_taste_storefront::storage::DEFAULT_QUOTA_BYTES;
use twist_taste_storefront::{FileStore, Storefront, StorefrontConfig, StorageError};

/// A scratch data directory that can be opened as a storefront repeatedly.
#[derive(Debug)]
pub struct TestContext {
    dir: TempDir,
    quota: usize,
    notify_destination: Option<String>,
}

impl TestContext {
    /// Create an empty context with the default quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            quota: DEFAULT_QUOTA_BYTES,
            notify_destination: Some("owner@example.com".to_string()),
        })
    }

    /// Limit the record store to `quota` bytes.
    #[must_use]
    pub const fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// Run checkouts without a notification destination.
    #[must_use]
    pub fn without_notifications(mut self) -> Self {
        self.notify_destination = None;
        self
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    #[must_use]
    pub fn invoice_dir(&self) -> PathBuf {
        self.dir.path().join("invoices")
    }

    /// Path of the file holding record `key`.
    #[must_use]
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.data_dir().join(format!("{key}.json"))
    }

    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.data_dir(),
            storage_quota_bytes: self.quota,
            invoice_dir: self.invoice_dir(),
            notify_destination: self.notify_destination.clone(),
            ..StorefrontConfig::default()
        }
    }

    /// Open the storefront as a fresh page load would.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(&self) -> Result<Storefront, StorageError> {
        let config = self.config();
        let store = FileStore::open(&config.data_dir, config.storage_quota_bytes)?;
        Ok(Storefront::with_storage(config, Arc::new(store)))
    }

    /// Invoice files written so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice directory cannot be listed.
    pub fn invoices(&self) -> std::io::Result<Vec<PathBuf>> {
        list_files(&self.invoice_dir())
    }
}

fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}
