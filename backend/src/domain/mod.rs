//! Domain model: entities, errors, ports, and the application service.

pub mod error;
pub mod patient;
pub mod ports;

mod patients_service;

pub use error::{Error, ErrorCode};
pub use patient::{
    NewPatient, NewPatientValidationError, Patient, PatientId, PatientIdValidationError,
};
pub use patients_service::PatientsService;
