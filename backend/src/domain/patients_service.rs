//! Application service fronting the patient repository port.
//!
//! Translates the port's error taxonomy into the transport-agnostic domain
//! [`Error`] so inbound adapters never match on persistence variants.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{Error, NewPatient, Patient, PatientId};

/// Use-case surface consumed by inbound adapters.
#[derive(Clone)]
pub struct PatientsService {
    repository: Arc<dyn PatientRepository>,
}

impl PatientsService {
    /// Create a service backed by the given repository adapter.
    pub fn new(repository: Arc<dyn PatientRepository>) -> Self {
        Self { repository }
    }

    /// Create a patient record, rejecting duplicate passport numbers.
    pub async fn create_patient(&self, new_patient: &NewPatient) -> Result<Patient, Error> {
        self.repository
            .create_patient(new_patient)
            .await
            .map_err(map_repository_error)
    }

    /// Look up a patient by identifier. Absence is `Ok(None)`, not an error.
    pub async fn find_patient(&self, id: &PatientId) -> Result<Option<Patient>, Error> {
        self.repository
            .find_patient(id)
            .await
            .map_err(map_repository_error)
    }
}

fn map_repository_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::ExistingPassportNumber { passport_number } => {
            Error::conflict(format!("existing passport number {passport_number}"))
                .with_details(json!({ "passportNumber": passport_number }))
        }
        PatientRepositoryError::TooManyPatients { id, count } => {
            Error::internal(format!("{count} patients found for id {id}"))
        }
        PatientRepositoryError::Unexpected { message } => {
            Error::internal(format!("patient repository failure: {message}"))
        }
    }
}
