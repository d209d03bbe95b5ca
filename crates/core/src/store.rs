//! JSON file record store.
//!
//! All patients live in a single JSON object on disk, keyed by patient id:
//!
//! ```text
//! {
//!   "P001": { "name": "...", "city": "...", "age": 30, "gender": "male", "height": 1.75, "weight": 70.0 },
//!   ...
//! }
//! ```
//!
//! The file is read once when the service starts and rewritten in full after every change.
//! Key order is preserved in both directions.

use crate::error::{PatientError, PatientResult};
use crate::patient::{PatientDraft, PatientRecord};
use indexmap::IndexMap;
use patient_types::PatientId;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored record without validating it.
    ///
    /// A missing file, or one holding only whitespace, is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - the file exists but cannot be read
    /// - the contents are not a JSON object of patient records
    pub fn load(&self) -> PatientResult<IndexMap<String, PatientDraft>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "patient file {} not found, starting empty",
                    self.path.display()
                );
                return Ok(IndexMap::new());
            }
            Err(e) => return Err(PatientError::FileRead(e)),
        };

        if contents.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        serde_json::from_str(&contents).map_err(PatientError::Deserialization)
    }

    /// Replaces the file with the full contents of `patients`.
    ///
    /// The new contents are written to a temporary file in the same directory, synced, and
    /// renamed over the old file, so a crash mid-write never leaves a truncated store. An
    /// existing file keeps its permissions.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - the parent directory cannot be created
    /// - serialisation fails
    /// - the temporary file cannot be written, synced or renamed
    pub fn save(&self, patients: &IndexMap<PatientId, PatientRecord>) -> PatientResult<()> {
        let mut json =
            serde_json::to_string_pretty(patients).map_err(PatientError::Serialization)?;
        json.push('\n');

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(PatientError::StorageDirCreation)?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(PatientError::FileWrite)?;
        tmp.write_all(json.as_bytes())
            .map_err(PatientError::FileWrite)?;
        tmp.flush().map_err(PatientError::FileWrite)?;
        tmp.as_file().sync_all().map_err(PatientError::FileWrite)?;
        // The temp file is created owner-only; keep the mode of the file it replaces.
        if let Ok(existing) = fs::metadata(&self.path) {
            if existing.is_file() {
                tmp.as_file()
                    .set_permissions(existing.permissions())
                    .map_err(PatientError::FileWrite)?;
            }
        }
        tmp.persist(&self.path)
            .map_err(|e| PatientError::FilePersist(e.error))?;

        tracing::debug!(
            "wrote {} patients to {}",
            patients.len(),
            self.path.display()
        );
        Ok(())
    }
}
