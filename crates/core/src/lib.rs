//! # Patient Core
//!
//! Core business logic for the patient records service.
//!
//! This crate contains pure data operations over a single JSON file:
//! - Patient model validation and derived BMI/verdict
//! - Loading and atomically saving the record store
//! - Listing, lookup, create, update, delete and sort over the in-memory mapping
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod service;
pub mod sort;
pub mod store;
pub mod validation;

pub use config::{patient_data_file_from_env_value, CoreConfig};
pub use error::{ErrorKind, PatientError, PatientResult};
pub use patient::{compute_derived, Gender, PatientDraft, PatientRecord, Verdict};
pub use patient_types::{PatientId, TextError};
pub use service::{PatientMap, PatientService};
pub use sort::{SortField, SortOrder};
pub use store::JsonFileStore;
pub use validation::{FieldViolation, ValidationErrors};
