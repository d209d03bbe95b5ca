//! Patient model.
//!
//! A [`PatientDraft`] holds unvalidated fields as they arrive from a request body or the
//! data file. [`PatientDraft::validate`] turns it into a [`PatientRecord`], the only form
//! that is ever stored. BMI and verdict are never stored; they are computed from height and
//! weight whenever a record is read.

use crate::constants::{
    BMI_NORMAL_FROM, BMI_OBESE_FROM, BMI_OVERWEIGHT_FROM, CITY_MAX_CHARS, CITY_MIN_CHARS,
    NAME_MAX_CHARS, NAME_MIN_CHARS,
};
use crate::validation::{self, ValidationErrors};
use api_shared::{CreatePatientReq, UpdatePatientReq};
use patient_types::PatientId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    /// Parses a gender, ignoring ASCII case. `others` is accepted for `other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" | "others" => Ok(Gender::Other),
            _ => Err("must be one of: male, female, other".into()),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health verdict derived from a BMI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_NORMAL_FROM {
            Verdict::Underweight
        } else if bmi < BMI_OVERWEIGHT_FROM {
            Verdict::Normal
        } else if bmi < BMI_OBESE_FROM {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body Mass Index for a height in meters and a weight in kilograms, rounded to two
/// decimals.
pub fn bmi(height: f64, weight: f64) -> f64 {
    let raw = weight / (height * height);
    (raw * 100.0).round() / 100.0
}

/// Computes the derived BMI and verdict. The verdict is taken from the rounded BMI.
pub fn compute_derived(height: f64, weight: f64) -> (f64, Verdict) {
    let bmi = bmi(height, weight);
    (bmi, Verdict::from_bmi(bmi))
}

/// A validated patient record, in the shape written to the data file.
///
/// The id is the key of the stored mapping and is not repeated here. Fields are private so
/// that every `PatientRecord` has passed [`PatientDraft::validate`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientRecord {
    name: String,
    city: String,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
}

impl PatientRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Verdict {
        compute_derived(self.height, self.weight).1
    }

    /// Builds the API representation of this record, including derived fields.
    pub fn to_view(&self, id: &PatientId) -> api_shared::Patient {
        let (bmi, verdict) = compute_derived(self.height, self.weight);
        api_shared::Patient {
            id: id.to_string(),
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender.to_string(),
            height: self.height,
            weight: self.weight,
            bmi,
            verdict: verdict.to_string(),
        }
    }

    /// Returns an unvalidated copy of this record, ready to have an update merged onto it.
    pub fn to_draft(&self, id: &PatientId) -> PatientDraft {
        PatientDraft {
            id: Some(id.to_string()),
            name: Some(self.name.clone()),
            city: Some(self.city.clone()),
            age: Some(i64::from(self.age)),
            gender: Some(self.gender.to_string()),
            height: Some(self.height),
            weight: Some(self.weight),
        }
    }
}

/// Unvalidated patient fields.
///
/// Records in the data file deserialize directly into drafts; the id is the mapping key
/// and is filled in by the caller.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PatientDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientDraft {
    /// Overlays the fields supplied in `update`, leaving the others untouched.
    pub fn merge(&mut self, update: UpdatePatientReq) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(city) = update.city {
            self.city = Some(city);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
    }

    /// Validates every field and normalises the text fields.
    ///
    /// # Errors
    ///
    /// Returns every violation found, not only the first.
    pub fn validate(self) -> Result<(PatientId, PatientRecord), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let id = validation::require(&mut errors, "id", self.id).and_then(|raw| {
            PatientId::new(raw)
                .map_err(|e| errors.push("id", e.to_string()))
                .ok()
        });
        let name = validation::bounded_text(
            &mut errors,
            "name",
            self.name,
            NAME_MIN_CHARS,
            NAME_MAX_CHARS,
        );
        let city = validation::bounded_text(
            &mut errors,
            "city",
            self.city,
            CITY_MIN_CHARS,
            CITY_MAX_CHARS,
        );
        let age = validation::positive_int(&mut errors, "age", self.age);
        let gender = validation::require(&mut errors, "gender", self.gender).and_then(|raw| {
            raw.parse::<Gender>()
                .map_err(|message| errors.push("gender", message))
                .ok()
        });
        let height = validation::positive_float(&mut errors, "height", self.height);
        let weight = validation::positive_float(&mut errors, "weight", self.weight);
        if let (Some(height), Some(weight)) = (height, weight) {
            if !bmi(height, weight).is_finite() {
                errors.push("height", "height and weight give a non-finite BMI");
            }
        }

        match (id, name, city, age, gender, height, weight) {
            (Some(id), Some(name), Some(city), Some(age), Some(gender), Some(height), Some(weight))
                if errors.is_empty() =>
            {
                Ok((
                    id,
                    PatientRecord {
                        name,
                        city,
                        age,
                        gender,
                        height,
                        weight,
                    },
                ))
            }
            _ => Err(errors),
        }
    }
}

impl From<CreatePatientReq> for PatientDraft {
    fn from(req: CreatePatientReq) -> Self {
        Self {
            id: req.id,
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender,
            height: req.height,
            weight: req.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john_doe() -> PatientDraft {
        PatientDraft {
            id: Some("P031".into()),
            name: Some("John Doe".into()),
            city: Some("New York".into()),
            age: Some(30),
            gender: Some("male".into()),
            height: Some(1.75),
            weight: Some(70.0),
        }
    }

    #[test]
    fn test_validate_accepts_example_record() {
        let (id, record) = john_doe().validate().expect("record should be valid");

        assert_eq!(id.as_str(), "P031");
        assert_eq!(record.name(), "John Doe");
        assert_eq!(record.gender(), Gender::Male);
        assert_eq!(record.bmi(), 22.86);
        assert_eq!(record.verdict(), Verdict::Normal);
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let draft = PatientDraft {
            id: Some("P100".into()),
            name: Some("J".into()),
            city: None,
            age: Some(0),
            gender: Some("unknown".into()),
            height: Some(-1.0),
            weight: Some(70.0),
        };

        let errors = draft.validate().expect_err("draft should be rejected");

        for field in ["name", "city", "age", "gender", "height"] {
            assert!(errors.has_field(field), "expected a violation for {field}");
        }
        assert!(!errors.has_field("weight"));
        assert_eq!(errors.violations().len(), 5);
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let mut draft = john_doe();
        draft.id = Some("   ".into());

        let errors = draft.validate().expect_err("blank id should be rejected");
        assert!(errors.has_field("id"));
    }

    #[test]
    fn test_validate_trims_text_and_normalises_gender() {
        let mut draft = john_doe();
        draft.name = Some("  Jane Roe ".into());
        draft.gender = Some("Others".into());

        let (_, record) = draft.validate().unwrap();
        assert_eq!(record.name(), "Jane Roe");
        assert_eq!(record.gender(), Gender::Other);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gender"], "other");
        assert!(json.get("bmi").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_validate_rejects_non_finite_bmi() {
        let mut draft = john_doe();
        draft.height = Some(1e-200);
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.violations().len(), 1);
        assert_eq!(errors.violations()[0].field, "height");

        let mut draft = john_doe();
        draft.height = Some(0.001);
        draft.weight = Some(f64::MAX);
        assert!(draft.validate().unwrap_err().has_field("height"));
    }

    #[test]
    fn test_compute_derived_is_deterministic() {
        let first = compute_derived(1.62, 58.3);
        for _ in 0..10 {
            assert_eq!(compute_derived(1.62, 58.3), first);
        }
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_bmi(18.49), Verdict::Underweight);
        assert_eq!(Verdict::from_bmi(18.5), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(24.95), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(25.0), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(29.99), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(30.0), Verdict::Obese);
    }

    #[test]
    fn test_merge_changes_only_supplied_fields() {
        let (id, record) = john_doe().validate().unwrap();
        let mut draft = record.to_draft(&id);

        draft.merge(UpdatePatientReq {
            age: Some(25),
            ..Default::default()
        });

        let (merged_id, merged) = draft.validate().unwrap();
        assert_eq!(merged_id, id);
        assert_eq!(merged.age(), 25);
        assert_eq!(merged.name(), record.name());
        assert_eq!(merged.height(), record.height());
        assert_eq!(merged.bmi(), record.bmi());
    }

    #[test]
    fn test_to_view_includes_derived_fields() {
        let (id, record) = john_doe().validate().unwrap();
        let view = record.to_view(&id);

        assert_eq!(view.id, "P031");
        assert_eq!(view.gender, "male");
        assert_eq!(view.bmi, 22.86);
        assert_eq!(view.verdict, "Normal");
    }
}
