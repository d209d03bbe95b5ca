//! Request and response bodies shared by the patient records APIs.
//!
//! Request types keep every field optional so that missing values are reported by the
//! patient model as validation failures alongside any other problems, rather than being
//! rejected one at a time by the JSON decoder.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A patient record as returned by the API, including the derived BMI and verdict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "New York")]
    pub city: String,
    #[schema(example = 30)]
    pub age: u32,
    #[schema(example = "male")]
    pub gender: String,
    /// Height in meters
    #[schema(example = 1.75)]
    pub height: f64,
    /// Weight in kilograms
    #[schema(example = 70.0)]
    pub weight: f64,
    /// Body Mass Index, rounded to two decimals
    #[schema(example = 22.86)]
    pub bmi: f64,
    #[schema(example = "Normal")]
    pub verdict: String,
}

/// Body of `POST /create/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    #[schema(example = "P031")]
    pub id: Option<String>,
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "New York")]
    pub city: Option<String>,
    #[schema(example = 30)]
    pub age: Option<i64>,
    #[schema(example = "male")]
    pub gender: Option<String>,
    #[schema(example = 1.75)]
    pub height: Option<f64>,
    #[schema(example = 70.0)]
    pub weight: Option<f64>,
}

/// Body of `PUT /edit/{id}`. Only the supplied fields are changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// Query string of `GET /sort/`.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// Field to sort by: `bmi`, `height` or `weight`
    #[param(example = "bmi")]
    pub sort_by: Option<String>,
    /// Sort order: `asc` (default) or `desc`
    #[param(example = "asc")]
    pub order: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientMessageRes {
    pub message: String,
    pub patient: Patient,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Number of records currently held by the service
    pub patients: u64,
}

/// A single rejected field in a validation failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "age")]
    pub field: String,
    #[schema(example = "must be greater than 0")]
    pub message: String,
}

/// Error body returned for every non-2xx response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_leaves_absent_fields_unset() {
        let req: UpdatePatientReq = serde_json::from_str(r#"{"age": 25}"#).unwrap();
        assert_eq!(req.age, Some(25));
        assert_eq!(req.name, None);
        assert_eq!(req.height, None);
    }

    #[test]
    fn test_error_body_omits_empty_field_list() {
        let body = ErrorRes {
            detail: "Patient not found".into(),
            errors: vec![],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "detail": "Patient not found" }));
    }
}
