//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the application service and remain testable without I/O.

use crate::domain::PatientsService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub patients: PatientsService,
}

impl HttpState {
    /// Bundle the patients service for handler injection.
    pub fn new(patients: PatientsService) -> Self {
        Self { patients }
    }
}
