//! REST endpoint handlers.

use crate::{ApiError, AppState};
use api_shared::{
    CreatePatientReq, HealthRes, HealthService, MessageRes, Patient, PatientMessageRes, SortQuery,
    UpdatePatientReq,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use patient_core::{PatientMap, SortField, SortOrder};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name", body = MessageRes)
    )
)]
/// Liveness check and entry point.
#[axum::debug_handler]
pub async fn root() -> Json<MessageRes> {
    Json(MessageRes {
        message: "Patient Management System".into(),
    })
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "Service description", body = MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn about() -> Json<MessageRes> {
    Json(MessageRes {
        message: "A simple, file-backed Patient Management System".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports that the service is alive and how many patients it currently holds.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthRes>, ApiError> {
    let patients = state.patients.count()?;
    Ok(Json(HealthService::check_health(patients)))
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All patients keyed by id, in insertion order"),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// List all patients
///
/// Returns an object mapping each patient id to its record, including the derived BMI and
/// verdict.
#[axum::debug_handler]
pub async fn view_patients(State(state): State<AppState>) -> Result<Json<PatientMap>, ApiError> {
    Ok(Json(state.patients.list_all()?))
}

#[utoipa::path(
    get,
    path = "/patient/{id}",
    params(
        ("id" = String, Path, description = "The ID of the patient to retrieve", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 404, description = "Patient not found", body = api_shared::ErrorRes)
    )
)]
/// Get a single patient by id
///
/// The id is matched without regard to case or surrounding whitespace.
#[axum::debug_handler]
pub async fn view_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.patients.get(&id)?))
}

#[utoipa::path(
    post,
    path = "/create/",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = PatientMessageRes),
        (status = 400, description = "Invalid patient data", body = api_shared::ErrorRes),
        (status = 409, description = "Patient ID already exists", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// Create a new patient record
///
/// # Errors
/// Returns `409 Conflict` if a patient with the same id exists (ignoring case), and
/// `400 Bad Request` if the body is malformed or any field is invalid.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientMessageRes>), ApiError> {
    let Json(req) = payload?;
    let patient = state.patients.create(req)?;
    Ok((
        StatusCode::CREATED,
        Json(PatientMessageRes {
            message: "Patient created successfully".into(),
            patient,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(
        ("id" = String, Path, description = "The ID of the patient to update", example = "P001")
    ),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = PatientMessageRes),
        (status = 400, description = "Invalid patient data", body = api_shared::ErrorRes),
        (status = 404, description = "Patient not found", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// Update an existing patient
///
/// Only the fields present in the body are changed; the merged record is validated as a
/// whole before it is stored.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePatientReq>, JsonRejection>,
) -> Result<Json<PatientMessageRes>, ApiError> {
    let Json(update) = payload?;
    let patient = state.patients.update(&id, update)?;
    Ok(Json(PatientMessageRes {
        message: "Patient updated successfully".into(),
        patient,
    }))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(
        ("id" = String, Path, description = "The ID of the patient to delete", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    state.patients.delete(&id)?;
    Ok(Json(MessageRes {
        message: "Patient deleted successfully".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/sort/",
    params(SortQuery),
    responses(
        (status = 200, description = "Patients ordered by the requested field", body = [Patient]),
        (status = 400, description = "Invalid sort field or order", body = api_shared::ErrorRes)
    )
)]
/// Sort patients by a numeric field
///
/// `sort_by` must be one of `bmi`, `height` or `weight`; `order` is `asc` (default) or
/// `desc`. Patients with equal values keep their insertion order.
#[axum::debug_handler]
pub async fn sort_patients(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let field: SortField = query.sort_by.as_deref().unwrap_or_default().parse()?;
    let order = SortOrder::parse_or_default(query.order.as_deref())?;
    Ok(Json(state.patients.sort(field, order)?))
}
