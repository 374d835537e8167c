//! JSON file persistence adapter.
//!
//! Stores the ledger and alert documents as JSON files. Each save writes the
//! serialized document to a sibling `.tmp` file and renames it into place,
//! so a crash mid-write leaves the previous document intact — a reader
//! observes either the prior version or the fully updated one, never a torn
//! file. Loading a path that does not exist yields an empty document.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::alert::AlertBook;
use crate::domain::error::SharebookError;
use crate::domain::ledger::LedgerBook;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;

#[derive(Debug)]
pub struct JsonFileStore {
    ledger_path: PathBuf,
    alerts_path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    pub fn new(ledger_path: impl Into<PathBuf>, alerts_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_path: ledger_path.into(),
            alerts_path: alerts_path.into(),
            pretty: true,
        }
    }

    /// Read document locations from `[storage] ledger_path` and
    /// `[storage] alerts_path`; `[storage] pretty` toggles indented output
    /// (default on).
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SharebookError> {
        let ledger_path = config.get_string("storage", "ledger_path").ok_or_else(|| {
            SharebookError::ConfigMissing {
                section: "storage".to_string(),
                key: "ledger_path".to_string(),
            }
        })?;
        let alerts_path = config.get_string("storage", "alerts_path").ok_or_else(|| {
            SharebookError::ConfigMissing {
                section: "storage".to_string(),
                key: "alerts_path".to_string(),
            }
        })?;

        Ok(Self {
            ledger_path: ledger_path.into(),
            alerts_path: alerts_path.into(),
            pretty: config.get_bool("storage", "pretty", true),
        })
    }

    fn load_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T, SharebookError> {
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = fs::read_to_string(path).map_err(|err| persistence_error(path, err))?;
        serde_json::from_str(&raw).map_err(|err| persistence_error(path, err))
    }

    fn save_document<T: Serialize>(&self, path: &Path, document: &T) -> Result<(), SharebookError> {
        let payload = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(|err| persistence_error(path, err))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| persistence_error(parent, err))?;
            }
        }

        // Atomic replace: write the sibling temp file, then rename over the
        // destination. Rename within one directory never exposes a partial file.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, payload).map_err(|err| persistence_error(&tmp, err))?;
        fs::rename(&tmp, path).map_err(|err| persistence_error(path, err))
    }
}

fn persistence_error(path: &Path, err: impl std::fmt::Display) -> SharebookError {
    SharebookError::Persistence {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

impl StorePort for JsonFileStore {
    fn load_ledger(&self) -> Result<LedgerBook, SharebookError> {
        Self::load_document(&self.ledger_path)
    }

    fn save_ledger(&self, book: &LedgerBook) -> Result<(), SharebookError> {
        self.save_document(&self.ledger_path, book)
    }

    fn load_alerts(&self) -> Result<AlertBook, SharebookError> {
        Self::load_document(&self.alerts_path)
    }

    fn save_alerts(&self, book: &AlertBook) -> Result<(), SharebookError> {
        self.save_document(&self.alerts_path, book)
    }
}
