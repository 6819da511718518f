//! PostgreSQL-backed `PatientRepository` implementation using Diesel.
//!
//! This adapter implements the domain's `PatientRepository` port. Creation
//! runs the passport-number existence check and the insert in a single
//! transaction, so a duplicate number rolls back without a partial write.
//! Timestamps come from the injected clock, not the database server.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{NewPatient, Patient, PatientId};

use super::models::{NewPatientRow, PatientRow};
use super::pool::{DbPool, PoolError};
use super::schema::patients;

/// Diesel-backed implementation of the `PatientRepository` port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool and clock.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

/// Map pool errors to the port's opaque error variant.
fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PatientRepositoryError::unexpected(message)
        }
    }
}

impl From<diesel::result::Error> for PatientRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::Error as DieselError;

        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(error = %error, "diesel operation failed"),
        }

        Self::unexpected(error.to_string())
    }
}

/// Convert a database row to a domain patient.
fn row_to_patient(row: PatientRow) -> Result<Patient, PatientRepositoryError> {
    let id = PatientId::new(row.id)
        .map_err(|err| PatientRepositoryError::unexpected(format!("invalid stored id: {err}")))?;

    Ok(Patient {
        id,
        name: row.name,
        surname: row.surname,
        passport_number: row.passport_number,
        created_at: row.created_at.and_utc(),
    })
}

/// Interpret the result set of an id lookup.
///
/// The id column is the primary key, so any result set larger than one row is
/// a data-integrity violation and surfaces as `TooManyPatients` rather than a
/// "not found".
fn interpret_lookup(
    id: &PatientId,
    rows: Vec<PatientRow>,
) -> Result<Option<Patient>, PatientRepositoryError> {
    match rows.len() {
        0 => Ok(None),
        1 => rows.into_iter().next().map(row_to_patient).transpose(),
        count => Err(PatientRepositoryError::too_many_patients(id.as_str(), count)),
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn find_patient(
        &self,
        id: &PatientId,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatientRow> = patients::table
            .filter(patients::id.eq(id.as_str()))
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await?;

        interpret_lookup(id, rows)
    }

    async fn create_patient(
        &self,
        new_patient: &NewPatient,
    ) -> Result<Patient, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = PatientId::random();
        let created_at = self.clock.utc();

        conn.transaction::<Patient, PatientRepositoryError, _>(|conn| {
            async move {
                let existing: Vec<String> = patients::table
                    .filter(patients::passport_number.eq(new_patient.passport_number()))
                    .select(patients::id)
                    .load(conn)
                    .await?;

                if !existing.is_empty() {
                    return Err(PatientRepositoryError::existing_passport_number(
                        new_patient.passport_number(),
                    ));
                }

                let row = NewPatientRow {
                    id: id.as_str(),
                    created_at: created_at.naive_utc(),
                    name: new_patient.name(),
                    surname: new_patient.surname(),
                    passport_number: new_patient.passport_number(),
                };

                diesel::insert_into(patients::table)
                    .values(&row)
                    .execute(conn)
                    .await?;

                Ok(Patient {
                    id,
                    name: new_patient.name().to_owned(),
                    surname: new_patient.surname().to_owned(),
                    passport_number: new_patient.passport_number().to_owned(),
                    created_at,
                })
            }
            .scope_boxed()
        })
        .await
    }
}
