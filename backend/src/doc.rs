//! OpenAPI document describing the HTTP surface.

use utoipa::OpenApi;

/// Public OpenAPI surface for tooling and client generation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Patient Service API",
        description = "Create patient records and look them up by identifier."
    ),
    paths(
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::find_patient,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        crate::inbound::http::patients::NewPatientRequest,
        crate::inbound::http::patients::PatientResponse,
        crate::domain::Error,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "patients", description = "Patient record management"),
        (name = "health", description = "Probe endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_lists_patient_paths() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("openapi serializes");

        assert!(json["paths"].get("/api/v1/patients").is_some());
        assert!(json["paths"].get("/api/v1/patients/{id}").is_some());
        assert!(json["paths"].get("/health/ready").is_some());
    }
}
