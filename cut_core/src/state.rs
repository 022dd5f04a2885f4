//! Application state persistence with file locking.
//!
//! The whole `{profile, logs, foods, templates}` structure lives in one
//! JSON file. Reads take a shared lock; saves write a temp file in the
//! same directory and rename it over the original.

use crate::catalog::seeded_state;
use crate::{AppState, Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl AppState {
    /// Load state from a file with shared locking
    ///
    /// Returns the seeded default state if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns the seeded
    /// default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state file found, using seeded defaults");
            return Ok(seeded_state());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(seeded_state());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(seeded_state());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(seeded_state());
        }

        file.unlock()?;

        match serde_json::from_str::<AppState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded state from {:?}", path);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(seeded_state())
            }
        }
    }

    /// Save state to a file with exclusive locking
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old state file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved state to {:?}", path);
        Ok(())
    }
}
