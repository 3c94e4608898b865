// SPDX-License-Identifier: PMPL-1.0-or-later
//! JSON file persistence for scan history and monitors.
//!
//! Scan records and monitors are durable application state: both
//! survive restarts as pretty-printed JSON files under one base
//! directory. Missing files load as empty state.

use crate::monitor::Monitor;
use crate::record::ScanRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const SCANS_FILE: &str = "scans.json";
const MONITORS_FILE: &str = "monitors.json";

/// Errors from persistence operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage backend rooted at one directory
pub struct Storage {
    base_path: PathBuf,
}

impl Storage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn save_scans(&self, records: &[ScanRecord]) -> Result<(), StorageError> {
        self.write_json(SCANS_FILE, records)
    }

    pub fn load_scans(&self) -> Result<Vec<ScanRecord>, StorageError> {
        self.read_json(SCANS_FILE)
    }

    pub fn save_monitors(&self, monitors: &[Monitor]) -> Result<(), StorageError> {
        self.write_json(MONITORS_FILE, monitors)
    }

    pub fn load_monitors(&self) -> Result<Vec<Monitor>, StorageError> {
        self.read_json(MONITORS_FILE)
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base_path)?;
        let path = self.base_path.join(name);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "saved state");
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StorageError> {
        let path = self.base_path.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&path)?;
        let value: Vec<T> = serde_json::from_str(&json)?;
        debug!(path = %path.display(), "loaded state");
        Ok(value)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
