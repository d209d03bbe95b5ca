/// Errors that can occur when creating validated identifier types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A patient identifier such as `P001`.
///
/// The input is trimmed of leading and trailing whitespace during construction and must
/// contain at least one character. The original spelling is preserved so that stored
/// files round-trip unchanged, but identifiers are compared without regard to ASCII case:
/// `p001` and `P001` name the same patient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new `PatientId` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(PatientId)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as it was spelled on input.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `other` names the same patient, ignoring surrounding whitespace and
    /// ASCII case.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    /// Returns true if both identifiers name the same patient.
    pub fn same_patient(&self, other: &PatientId) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PatientId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_keeps_spelling() {
        let id = PatientId::new("  p001 ").unwrap();
        assert_eq!(id.as_str(), "p001");
        assert_eq!(id.to_string(), "p001");
    }

    #[test]
    fn test_new_rejects_blank_input() {
        assert_eq!(PatientId::new("").unwrap_err(), TextError::Empty);
        assert_eq!(PatientId::new("   \t").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn test_matches_ignores_case() {
        let id = PatientId::new("P001").unwrap();
        assert!(id.matches("p001"));
        assert!(id.matches(" P001 "));
        assert!(!id.matches("P002"));
        assert!(id.same_patient(&PatientId::new("p001").unwrap()));
    }

    #[test]
    fn test_deserialize_rejects_empty_id() {
        let err = serde_json::from_str::<PatientId>("\"  \"").unwrap_err();
        assert!(err.to_string().contains("Text cannot be empty"));

        let id: PatientId = serde_json::from_str("\"P010\"").unwrap();
        assert_eq!(id.as_str(), "P010");
    }
}
