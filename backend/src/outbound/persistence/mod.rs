//! PostgreSQL persistence adapter for the patient repository port.

mod diesel_patient_repository;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_patient_repository::DieselPatientRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying embedded schema migrations.
#[derive(Debug, thiserror::Error)]
#[error("failed to run database migrations: {message}")]
pub struct MigrationError {
    message: String,
}

impl MigrationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Apply pending embedded migrations against the given database.
///
/// Runs on a blocking thread because the migration harness drives a
/// synchronous connection wrapper around `AsyncPgConnection`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection cannot be established or a
/// migration fails to apply.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    use diesel::Connection as _;
    use diesel_async::AsyncPgConnection;
    use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;

    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)
            .map_err(|err| MigrationError::new(err.to_string()))?;

        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| MigrationError::new(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::new(format!("migration task panicked: {err}")))?
}
