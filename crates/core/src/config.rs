//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::DEFAULT_PATIENT_DATA_FILE;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The data file need not exist yet; it is created on the first write. It must not name
    /// an existing directory.
    pub fn new(patient_data_file: PathBuf) -> PatientResult<Self> {
        if patient_data_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidArgument(
                "patient data file path cannot be empty".into(),
            ));
        }

        if patient_data_file.is_dir() {
            return Err(PatientError::InvalidArgument(format!(
                "patient data file is a directory: {}",
                patient_data_file.display()
            )));
        }

        Ok(Self { patient_data_file })
    }

    pub fn patient_data_file(&self) -> &Path {
        &self.patient_data_file
    }
}

/// Resolve the patient data file from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PATIENT_DATA_FILE`].
pub fn patient_data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATIENT_DATA_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_value_falls_back_to_default() {
        assert_eq!(
            patient_data_file_from_env_value(None),
            PathBuf::from(DEFAULT_PATIENT_DATA_FILE)
        );
        assert_eq!(
            patient_data_file_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_PATIENT_DATA_FILE)
        );
        assert_eq!(
            patient_data_file_from_env_value(Some(" /data/patients.json ".into())),
            PathBuf::from("/data/patients.json")
        );
    }

    #[test]
    fn test_new_rejects_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let err = CoreConfig::new(temp_dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, PatientError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_accepts_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("patients.json");

        let cfg = CoreConfig::new(path.clone()).expect("config should be valid");
        assert_eq!(cfg.patient_data_file(), path.as_path());
    }
}
