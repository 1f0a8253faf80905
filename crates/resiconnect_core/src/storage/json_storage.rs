//! JSON file storage for the directory aggregate.
//!
//! # Responsibility
//! - Read the data file into a validated `Directory`.
//! - Write the whole directory atomically.
//!
//! # Invariants
//! - A missing data file is not an error; callers get `Ok(None)`.
//! - Saves go to a temporary file in the target directory, then rename over
//!   the data file. A failed save leaves the previous file intact.

use super::record::DirectoryDocument;
use super::StorageResult;
use crate::model::directory::Directory;
use log::{error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Directory persisted as a single pretty-printed JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDirectoryStorage {
    path: PathBuf,
}

impl JsonDirectoryStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the directory, or `None` when no data file exists yet.
    ///
    /// # Errors
    /// - Returns `StorageError::Json` when the file is not a valid document.
    /// - Returns `StorageError::InvalidRecord` for the first record that
    ///   fails validation; nothing is partially loaded.
    /// - Returns `StorageError::DuplicateEntries` when a stored collection
    ///   repeats an identity.
    pub fn read_directory(&self) -> StorageResult<Option<Directory>> {
        let started_at = Instant::now();
        if !self.path.exists() {
            info!("event=storage_read module=storage status=ok found=false");
            return Ok(None);
        }

        match self.load() {
            Ok(directory) => {
                info!(
                    "event=storage_read module=storage status=ok found=true duration_ms={} students={} staff={} external_parties={} events={}",
                    started_at.elapsed().as_millis(),
                    directory.students().len(),
                    directory.staff().len(),
                    directory.external_parties().len(),
                    directory.events().len()
                );
                Ok(Some(directory))
            }
            Err(err) => {
                error!(
                    "event=storage_read module=storage status=error duration_ms={} error_code={}",
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                Err(err)
            }
        }
    }

    fn load(&self) -> StorageResult<Directory> {
        let raw = fs::read_to_string(&self.path)?;
        let document: DirectoryDocument = serde_json::from_str(&raw)?;
        let snapshot = document.to_snapshot()?;
        Ok(Directory::from_snapshot(snapshot)?)
    }

    /// Replaces the data file with the current directory contents.
    ///
    /// # Side effects
    /// - Creates the parent directory when missing.
    pub fn save_directory(&self, directory: &Directory) -> StorageResult<()> {
        let started_at = Instant::now();
        match self.write(directory) {
            Ok(()) => {
                info!(
                    "event=storage_save module=storage status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=storage_save module=storage status=error duration_ms={} error_code={}",
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                Err(err)
            }
        }
    }

    fn write(&self, directory: &Directory) -> StorageResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let document = DirectoryDocument::from_directory(directory);
        let mut temp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(&mut temp, &document)?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}
