//! # API Shared
//!
//! Shared wire types for the patient records APIs.
//!
//! Contains:
//! - Request and response bodies (`types` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `patient-core` to build responses and by `api-rest` to decode requests.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
