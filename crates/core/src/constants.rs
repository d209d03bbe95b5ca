//! Constants used throughout the patient core crate.
//!
//! Field bounds and BMI thresholds live here so that validation, derived values and
//! documentation agree.

/// Default backing file when no explicit path is configured.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "patients.json";

/// Inclusive bounds on the length of a patient name, in characters.
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

/// Inclusive bounds on the length of a city, in characters.
pub const CITY_MIN_CHARS: usize = 2;
pub const CITY_MAX_CHARS: usize = 100;

/// BMI below this value is underweight.
pub const BMI_NORMAL_FROM: f64 = 18.5;

/// BMI at or above this value is overweight.
pub const BMI_OVERWEIGHT_FROM: f64 = 25.0;

/// BMI at or above this value is obese.
pub const BMI_OBESE_FROM: f64 = 30.0;
