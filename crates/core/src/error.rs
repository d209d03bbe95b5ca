use crate::validation::ValidationErrors;

/// The broad category of a [`PatientError`].
///
/// Callers that talk to the outside world (the REST API, the CLI) decide how to present an
/// error from its kind alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A supplied field value breaks the patient model's rules.
    Validation,
    /// No patient exists with the requested id.
    NotFound,
    /// A patient with the same id (ignoring case) already exists.
    Conflict,
    /// A query or configuration argument is outside its allowed set.
    InvalidArgument,
    /// The backing file could not be read, parsed or written.
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid patient: {0}")]
    Validation(ValidationErrors),
    #[error("patient not found: {0}")]
    NotFound(String),
    #[error("patient ID already exists: {0}")]
    Conflict(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read patient file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to replace patient file: {0}")]
    FilePersist(std::io::Error),
    #[error("failed to serialize patients: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patients: {0}")]
    Deserialization(serde_json::Error),
    #[error("stored patient {id} is invalid: {errors}")]
    InvalidStoredRecord {
        id: String,
        errors: ValidationErrors,
    },
    #[error("stored patient IDs {first} and {second} differ only by case")]
    DuplicateStoredId { first: String, second: String },
    #[error("patient store lock poisoned")]
    LockPoisoned,
}

impl PatientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatientError::Validation(_) => ErrorKind::Validation,
            PatientError::NotFound(_) => ErrorKind::NotFound,
            PatientError::Conflict(_) => ErrorKind::Conflict,
            PatientError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PatientError::StorageDirCreation(_)
            | PatientError::FileRead(_)
            | PatientError::FileWrite(_)
            | PatientError::FilePersist(_)
            | PatientError::Serialization(_)
            | PatientError::Deserialization(_)
            | PatientError::InvalidStoredRecord { .. }
            | PatientError::DuplicateStoredId { .. }
            | PatientError::LockPoisoned => ErrorKind::Storage,
        }
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
