//! Shared doubles for integration tests: a deterministic clock and an
//! in-memory repository that honours the port's transactional contract.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use patient_service::domain::ports::{PatientRepository, PatientRepositoryError};
use patient_service::domain::{NewPatient, Patient, PatientId};

/// Fixed instant used across the suite so `created_at` assertions are exact.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock pinned to a single instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// In-memory `PatientRepository` double.
///
/// The passport-number check and the insert happen under one mutex guard,
/// matching the single-transaction scope the real adapter provides.
pub struct InMemoryPatientRepository {
    rows: Mutex<Vec<Patient>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPatientRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Insert a row without any checks, to fabricate integrity anomalies.
    pub fn insert_raw(&self, patient: Patient) {
        self.lock_rows().push(patient);
    }

    /// Snapshot of all stored rows.
    pub fn snapshot(&self) -> Vec<Patient> {
        self.lock_rows().clone()
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, Vec<Patient>> {
        self.rows.lock().expect("repository mutex")
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn find_patient(
        &self,
        id: &PatientId,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let rows = self.lock_rows();
        let matching: Vec<Patient> = rows.iter().filter(|p| p.id == *id).cloned().collect();

        match matching.len() {
            0 => Ok(None),
            1 => Ok(matching.into_iter().next()),
            count => Err(PatientRepositoryError::too_many_patients(id.as_str(), count)),
        }
    }

    async fn create_patient(
        &self,
        new_patient: &NewPatient,
    ) -> Result<Patient, PatientRepositoryError> {
        let mut rows = self.lock_rows();

        if rows
            .iter()
            .any(|p| p.passport_number == new_patient.passport_number())
        {
            return Err(PatientRepositoryError::existing_passport_number(
                new_patient.passport_number(),
            ));
        }

        let patient = Patient {
            id: PatientId::random(),
            name: new_patient.name().to_owned(),
            surname: new_patient.surname().to_owned(),
            passport_number: new_patient.passport_number().to_owned(),
            created_at: self.clock.utc(),
        };
        rows.push(patient.clone());
        Ok(patient)
    }
}
