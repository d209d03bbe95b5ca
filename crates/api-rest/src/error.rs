//! Translation of core errors into HTTP responses.
//!
//! This is the only place where a [`PatientError`] becomes a status code. Storage failures
//! are logged in full and reported to the client as a generic internal error.

use api_shared::{ErrorRes, FieldError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use patient_core::{ErrorKind, PatientError};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
    errors: Vec<FieldError>,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        let status = match err.kind() {
            ErrorKind::Validation | ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match err {
            PatientError::Validation(violations) => Self {
                status,
                detail: "Invalid patient data".into(),
                errors: violations
                    .violations()
                    .iter()
                    .map(|v| FieldError {
                        field: v.field.to_string(),
                        message: v.message.clone(),
                    })
                    .collect(),
            },
            PatientError::NotFound(_) => Self {
                status,
                detail: "Patient not found".into(),
                errors: Vec::new(),
            },
            PatientError::Conflict(_) => Self {
                status,
                detail: "Patient ID already exists".into(),
                errors: Vec::new(),
            },
            PatientError::InvalidArgument(message) => Self {
                status,
                detail: message,
                errors: Vec::new(),
            },
            other => {
                tracing::error!("Patient store error: {:?}", other);
                Self {
                    status,
                    detail: "Internal error".into(),
                    errors: Vec::new(),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorRes {
            detail: self.detail,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}
