//! # API REST
//!
//! REST API implementation for the patient records service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation
//! - REST-specific concerns (JSON (de)serialisation, status codes)
//!
//! All business rules live in `patient-core`; handlers only translate between HTTP and
//! [`PatientService`] calls.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use patient_core::PatientService;
use std::sync::Arc;
use utoipa::OpenApi;

pub use error::ApiError;

/// Application state shared across REST API handlers
///
/// Holds the single [`PatientService`] that owns the in-memory patient mapping.
#[derive(Clone)]
pub struct AppState {
    pub patients: Arc<PatientService>,
}

impl AppState {
    pub fn new(patients: Arc<PatientService>) -> Self {
        Self { patients }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Patient Management System", version = "1.0"),
    paths(
        handlers::root,
        handlers::about,
        handlers::health,
        handlers::view_patients,
        handlers::view_patient,
        handlers::create_patient,
        handlers::update_patient,
        handlers::delete_patient,
        handlers::sort_patients,
    ),
    components(schemas(
        api_shared::Patient,
        api_shared::CreatePatientReq,
        api_shared::UpdatePatientReq,
        api_shared::MessageRes,
        api_shared::PatientMessageRes,
        api_shared::HealthRes,
        api_shared::FieldError,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the patient records router.
///
/// `/create` and `/sort` are also served without their trailing slash.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/about", get(handlers::about))
        .route("/health", get(handlers::health))
        .route("/view", get(handlers::view_patients))
        .route("/patient/:id", get(handlers::view_patient))
        .route("/create/", post(handlers::create_patient))
        .route("/create", post(handlers::create_patient))
        .route("/edit/:id", put(handlers::update_patient))
        .route("/delete/:id", delete(handlers::delete_patient))
        .route("/sort/", get(handlers::sort_patients))
        .route("/sort", get(handlers::sort_patients))
        .with_state(state)
}
