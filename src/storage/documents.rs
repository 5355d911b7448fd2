// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed JSON document store.
//!
//! Each user and asset lives in its own JSON file under the data root.
//! Writes go through a temp-file rename so a crashed write never leaves a
//! half-serialized document behind. Single-document updates are
//! last-writer-wins; every mutation in this service is keyed by a unique
//! identifier, so no cross-document locking exists.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use super::StoragePaths;

/// Error type for document store operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations
    Io(io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// Document not found
    NotFound(String),
    /// Document already exists
    AlreadyExists(String),
    /// Storage not initialized
    NotInitialized,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Json(e) => write!(f, "JSON error: {e}"),
            StorageError::NotFound(entity) => write!(f, "Not found: {entity}"),
            StorageError::AlreadyExists(entity) => write!(f, "Already exists: {entity}"),
            StorageError::NotInitialized => write!(f, "Storage not initialized"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Document store over plain JSON files.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    paths: StoragePaths,
    initialized: bool,
}

impl DocumentStore {
    /// Create a new DocumentStore instance.
    ///
    /// Does NOT create the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Initialize the storage directory structure.
    ///
    /// Creates the `users/` and `assets/` directories under the data root.
    /// Safe to call multiple times (idempotent).
    pub fn initialize(&mut self) -> StorageResult<()> {
        let dirs = [self.paths.users_dir(), self.paths.assets_dir()];

        for dir in dirs {
            fs::create_dir_all(&dir)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Check if the data directory is available and writable.
    ///
    /// Performs a write-read-delete probe under the data root.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let probe_file = self.paths.root().join(".health_check");
        let probe_data = b"health_check_data";

        fs::write(&probe_file, probe_data)?;
        let read_back = fs::read(&probe_file)?;
        fs::remove_file(&probe_file)?;

        if read_back != probe_data {
            return Err(StorageError::Io(io::Error::other(
                "health check data mismatch",
            )));
        }

        Ok(())
    }

    // ========== Generic JSON Operations ==========

    /// Read a JSON document and deserialize it.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Write a JSON document (atomic write via rename).
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Check if a document exists.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().is_file()
    }

    /// List the stems of all files in a directory with the given extension.
    pub fn list_files(&self, dir: impl AsRef<Path>, extension: &str) -> StorageResult<Vec<String>> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext == extension {
                        if let Some(stem) = path.file_stem() {
                            if let Some(id) = stem.to_str() {
                                ids.push(id.to_string());
                            }
                        }
                    }
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Doc {
        id: String,
        count: u32,
    }

    fn test_store() -> (DocumentStore, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(temp_dir.path()));
        store.initialize().expect("initialize");
        (store, temp_dir)
    }

    #[test]
    fn uninitialized_store_rejects_operations() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(StoragePaths::new(temp_dir.path()));

        let err = store
            .read_json::<Doc>(temp_dir.path().join("x.json"))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotInitialized));
    }

    #[test]
    fn write_then_read_round_trips() {
        let (store, temp_dir) = test_store();
        let path = temp_dir.path().join("users").join("doc.json");
        let doc = Doc {
            id: "doc-1".into(),
            count: 3,
        };

        store.write_json(&path, &doc).unwrap();
        let loaded: Doc = store.read_json(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn read_missing_document_is_not_found() {
        let (store, temp_dir) = test_store();
        let err = store
            .read_json::<Doc>(temp_dir.path().join("users").join("missing.json"))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let (store, temp_dir) = test_store();
        let path = temp_dir.path().join("assets").join("doc.json");
        store
            .write_json(
                &path,
                &Doc {
                    id: "doc-2".into(),
                    count: 0,
                },
            )
            .unwrap();

        assert!(store.exists(&path));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn list_files_returns_sorted_stems() {
        let (store, temp_dir) = test_store();
        let dir = temp_dir.path().join("assets");
        for id in ["zeta", "alpha", "mid"] {
            store
                .write_json(
                    dir.join(format!("{id}.json")),
                    &Doc {
                        id: id.into(),
                        count: 1,
                    },
                )
                .unwrap();
        }
        // Non-JSON files are ignored
        std::fs::write(dir.join("notes.txt"), b"ignore me").unwrap();

        let ids = store.list_files(&dir, "json").unwrap();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn list_files_on_missing_dir_is_empty() {
        let (store, temp_dir) = test_store();
        let ids = store
            .list_files(temp_dir.path().join("nowhere"), "json")
            .unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn health_check_passes_on_writable_root() {
        let (store, _temp_dir) = test_store();
        store.health_check().unwrap();
    }
}
