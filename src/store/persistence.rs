//! Engine persistence layer
//!
//! Provides save/load functionality for the whole engine state.

use crate::engine::Engine;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub engine_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".quorumsig_data"),
            engine_file: "engine.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Engine state storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the engine file path
    fn engine_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.engine_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.engine_file, index))
    }

    /// Save the engine to disk
    pub fn save(&self, engine: &Engine) -> Result<(), StorageError> {
        let path = self.engine_path();

        if self.config.backup_enabled && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first, then atomic rename
        let temp_path = self.config.data_dir.join("engine.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, engine)?;

        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the engine from disk
    pub fn load(&self) -> Result<Engine, StorageError> {
        let path = self.engine_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Engine file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        Ok(serde_json::from_reader(reader)?)
    }

    /// Check if a saved engine exists
    pub fn exists(&self) -> bool {
        self.engine_path().exists()
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random_principal;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let storage = Storage::new(config).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, storage) = temp_storage();

        let owners: Vec<String> = (0..3).map(|_| random_principal()).collect();
        let mut engine = Engine::new();
        let group = engine.create_group(owners, 2, vec![1; 16]).unwrap();

        assert!(!storage.exists());
        storage.save(&engine).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.group_count(), 1);
        let reloaded = loaded.group(&group.id).unwrap();
        assert_eq!(reloaded.owners, group.owners);
        assert_eq!(reloaded.version, 0);
    }

    #[test]
    fn test_backups_rotate_on_save() {
        let (_dir, storage) = temp_storage();

        let engine = Engine::new();
        storage.save(&engine).unwrap();
        storage.save(&engine).unwrap();

        assert!(storage.backup_path(0).exists());
        assert!(!storage.backup_path(1).exists());
    }

    #[test]
    fn test_load_missing_file() {
        let (_dir, storage) = temp_storage();
        assert!(matches!(
            storage.load(),
            Err(StorageError::InvalidData(_))
        ));
    }
}
