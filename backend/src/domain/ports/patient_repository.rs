//! Port abstraction for patient persistence adapters and their errors.
//!
//! The [`PatientRepository`] trait is the single boundary between the
//! application layer and the relational store. Both operations complete
//! asynchronously with exactly one value or one error; nothing is retried or
//! swallowed here.

use async_trait::async_trait;

use crate::domain::{NewPatient, Patient, PatientId};

/// Persistence errors raised by patient repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientRepositoryError {
    /// A record already holds the requested passport number. Recoverable;
    /// callers surface it as a conflict.
    #[error("existing passport number {passport_number}")]
    ExistingPassportNumber { passport_number: String },

    /// More than one record matched a supposedly-unique identifier. This is a
    /// data-integrity anomaly, never a normal "not found".
    #[error("{count} patients found for id {id}")]
    TooManyPatients { id: String, count: usize },

    /// Any other storage failure (connectivity, driver, constraint), opaque
    /// to this layer.
    #[error("unexpected patient repository error: {message}")]
    Unexpected { message: String },
}

impl PatientRepositoryError {
    /// Build an [`Self::ExistingPassportNumber`] error.
    pub fn existing_passport_number(passport_number: impl Into<String>) -> Self {
        Self::ExistingPassportNumber {
            passport_number: passport_number.into(),
        }
    }

    /// Build a [`Self::TooManyPatients`] error.
    pub fn too_many_patients(id: impl Into<String>, count: usize) -> Self {
        Self::TooManyPatients {
            id: id.into(),
            count,
        }
    }

    /// Build an [`Self::Unexpected`] error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

/// Port for patient storage and retrieval.
///
/// # Uniqueness contract
///
/// `create_patient` must execute its passport-number existence check and the
/// subsequent insert within one transaction scope, so a failure leaves no
/// partial write. The store carries no structural unique constraint on the
/// passport number; this check is the only enforcement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Fetch a patient by identifier.
    ///
    /// Returns `Ok(None)` when no record matches. Observing two or more rows
    /// for one identifier fails with
    /// [`PatientRepositoryError::TooManyPatients`].
    async fn find_patient(
        &self,
        id: &PatientId,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Atomically create a patient, enforcing passport-number uniqueness.
    ///
    /// On success the returned record carries the generated identifier and
    /// the creation timestamp read from the adapter's clock.
    async fn create_patient(
        &self,
        new_patient: &NewPatient,
    ) -> Result<Patient, PatientRepositoryError>;
}

/// Fixture implementation for wiring tests without a real database.
///
/// Lookups always miss and creations echo the input with a random id and the
/// current wall-clock time. Use it where patient persistence is not under
/// test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientRepository;

#[async_trait]
impl PatientRepository for FixturePatientRepository {
    async fn find_patient(
        &self,
        _id: &PatientId,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(None)
    }

    async fn create_patient(
        &self,
        new_patient: &NewPatient,
    ) -> Result<Patient, PatientRepositoryError> {
        Ok(Patient {
            id: PatientId::random(),
            name: new_patient.name().to_owned(),
            surname: new_patient.surname().to_owned(),
            passport_number: new_patient.passport_number().to_owned(),
            created_at: chrono::Utc::now(),
        })
    }
}
