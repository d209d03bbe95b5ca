//! Sorting patients by a numeric field.

use crate::error::PatientError;
use crate::patient::PatientRecord;
use patient_types::PatientId;
use std::cmp::Ordering;

/// Fields a patient list may be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Bmi,
    Height,
    Weight,
}

impl SortField {
    fn key(&self, record: &PatientRecord) -> f64 {
        match self {
            SortField::Bmi => record.bmi(),
            SortField::Height => record.height(),
            SortField::Weight => record.weight(),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bmi" => Ok(SortField::Bmi),
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            _ => Err(PatientError::InvalidArgument(
                "Invalid sort field. Must be one of: bmi, height, weight".into(),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses an optional order, defaulting to ascending when none is given.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, PatientError> {
        value.map_or(Ok(SortOrder::Asc), str::parse)
    }
}

impl std::str::FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PatientError::InvalidArgument(
                "Invalid order. Must be 'asc' or 'desc'".into(),
            )),
        }
    }
}

/// Sorts `entries` in place by `field`.
///
/// The sort is stable in both directions: patients with equal keys keep their relative
/// order.
pub(crate) fn sort_entries(
    entries: &mut [(&PatientId, &PatientRecord)],
    field: SortField,
    order: SortOrder,
) {
    entries.sort_by(|(_, a), (_, b)| {
        let ordering: Ordering = field.key(a).total_cmp(&field.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
