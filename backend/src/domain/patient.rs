//! Patient entity and validated construction inputs.
//!
//! `PatientId` and `NewPatient` guard their invariants at construction so the
//! repository port only ever sees well-formed values. Format or length policy
//! beyond non-emptiness belongs to callers, not this layer.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique patient identifier, a string-encoded UUID v4.
///
/// Generated server-side when a patient is created and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientId(String);

/// Validation errors emitted by [`PatientId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientIdValidationError {
    /// The identifier was empty or whitespace-only.
    Empty,
}

impl fmt::Display for PatientIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "patient id must not be empty"),
        }
    }
}

impl std::error::Error for PatientIdValidationError {}

impl PatientId {
    /// Wrap an identifier supplied by a caller.
    ///
    /// Only non-emptiness is checked; no UUID format validation happens here.
    pub fn new(value: impl Into<String>) -> Result<Self, PatientIdValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PatientIdValidationError::Empty);
        }
        Ok(Self(value))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One patient record.
///
/// `created_at` is set once from the injected clock at creation time and is
/// never updated; records are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub surname: String,
    pub passport_number: String,
    pub created_at: DateTime<Utc>,
}

/// Validation errors emitted by [`NewPatient::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewPatientValidationError {
    EmptyName,
    EmptySurname,
    EmptyPassportNumber,
}

impl fmt::Display for NewPatientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptySurname => write!(f, "surname must not be empty"),
            Self::EmptyPassportNumber => write!(f, "passport number must not be empty"),
        }
    }
}

impl std::error::Error for NewPatientValidationError {}

/// Validated input for creating a patient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    name: String,
    surname: String,
    passport_number: String,
}

impl NewPatient {
    /// Validate the three required fields.
    ///
    /// Whitespace-only values are rejected; the stored values keep their
    /// original spelling.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        passport_number: impl Into<String>,
    ) -> Result<Self, NewPatientValidationError> {
        let name = name.into();
        let surname = surname.into();
        let passport_number = passport_number.into();

        if name.trim().is_empty() {
            return Err(NewPatientValidationError::EmptyName);
        }
        if surname.trim().is_empty() {
            return Err(NewPatientValidationError::EmptySurname);
        }
        if passport_number.trim().is_empty() {
            return Err(NewPatientValidationError::EmptyPassportNumber);
        }

        Ok(Self {
            name,
            surname,
            passport_number,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }

    pub fn passport_number(&self) -> &str {
        self.passport_number.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn patient_id_rejects_blank_values(#[case] value: &str) {
        assert_eq!(PatientId::new(value), Err(PatientIdValidationError::Empty));
    }

    #[rstest]
    fn patient_id_keeps_supplied_value() {
        let id = PatientId::new("abc-123").expect("non-empty id is valid");
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[rstest]
    fn random_ids_are_distinct_uuids() {
        let first = PatientId::random();
        let second = PatientId::random();

        assert_ne!(first, second);
        uuid::Uuid::parse_str(first.as_str()).expect("random id is a valid UUID");
    }

    #[rstest]
    #[case("", "Lovelace", "P123", NewPatientValidationError::EmptyName)]
    #[case("Ada", " ", "P123", NewPatientValidationError::EmptySurname)]
    #[case("Ada", "Lovelace", "", NewPatientValidationError::EmptyPassportNumber)]
    fn new_patient_rejects_blank_fields(
        #[case] name: &str,
        #[case] surname: &str,
        #[case] passport_number: &str,
        #[case] expected: NewPatientValidationError,
    ) {
        assert_eq!(
            NewPatient::new(name, surname, passport_number),
            Err(expected)
        );
    }

    #[rstest]
    fn new_patient_preserves_original_spelling() {
        let new_patient = NewPatient::new("Ada ", "Lovelace", "P123").expect("valid patient input");

        assert_eq!(new_patient.name(), "Ada ");
        assert_eq!(new_patient.surname(), "Lovelace");
        assert_eq!(new_patient.passport_number(), "P123");
    }
}
