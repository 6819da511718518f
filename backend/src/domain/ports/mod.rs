//! Driven ports: contracts the domain expects adapters to satisfy.

mod patient_repository;

pub use patient_repository::{FixturePatientRepository, PatientRepository, PatientRepositoryError};

#[cfg(test)]
pub use patient_repository::MockPatientRepository;
