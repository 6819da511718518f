//! Patients API handlers.
//!
//! ```text
//! POST /api/v1/patients {"name":"Ada","surname":"Lovelace","passportNumber":"P123"}
//! GET /api/v1/patients/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, NewPatient, NewPatientValidationError, Patient, PatientId, PatientIdValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/patients`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatientRequest {
    pub name: String,
    pub surname: String,
    pub passport_number: String,
}

impl TryFrom<NewPatientRequest> for NewPatient {
    type Error = NewPatientValidationError;

    fn try_from(value: NewPatientRequest) -> Result<Self, Self::Error> {
        Self::new(value.name, value.surname, value.passport_number)
    }
}

/// Patient record as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub passport_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.name,
            surname: patient.surname,
            passport_number: patient.passport_number,
            created_at: patient.created_at,
        }
    }
}

fn map_new_patient_validation_error(err: NewPatientValidationError) -> Error {
    match err {
        NewPatientValidationError::EmptyName => Error::invalid_request("name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })),
        NewPatientValidationError::EmptySurname => {
            Error::invalid_request("surname must not be empty")
                .with_details(json!({ "field": "surname", "code": "empty_surname" }))
        }
        NewPatientValidationError::EmptyPassportNumber => {
            Error::invalid_request("passport number must not be empty")
                .with_details(json!({ "field": "passportNumber", "code": "empty_passport_number" }))
        }
    }
}

fn map_patient_id_validation_error(err: PatientIdValidationError) -> Error {
    match err {
        PatientIdValidationError::Empty => Error::invalid_request("patient id must not be empty")
            .with_details(json!({ "field": "id", "code": "empty_id" })),
    }
}

/// Create a patient record.
///
/// The passport number must not already be registered; a duplicate yields a
/// conflict and leaves the store untouched.
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = NewPatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Passport number already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/patients")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    payload: web::Json<NewPatientRequest>,
) -> ApiResult<HttpResponse> {
    let new_patient =
        NewPatient::try_from(payload.into_inner()).map_err(map_new_patient_validation_error)?;
    let patient = state.patients.create_patient(&new_patient).await?;
    Ok(HttpResponse::Created().json(PatientResponse::from(patient)))
}

/// Fetch a patient by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Patient found", body = PatientResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No patient with this identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["patients"],
    operation_id = "findPatient"
)]
#[get("/patients/{id}")]
pub async fn find_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatientResponse>> {
    let id = PatientId::new(path.into_inner()).map_err(map_patient_id_validation_error)?;
    let patient = state
        .patients
        .find_patient(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("no patient found for id {id}")))?;
    Ok(web::Json(PatientResponse::from(patient)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use super::*;
    use crate::domain::PatientsService;
    use crate::domain::ports::{MockPatientRepository, PatientRepositoryError};

    fn test_state(repo: MockPatientRepository) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(PatientsService::new(Arc::new(repo))))
    }

    async fn post_patient(
        state: web::Data<HttpState>,
        body: Value,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/v1").service(create_patient).service(find_patient)),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/patients")
            .set_json(&body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn empty_name_is_rejected_before_the_repository() {
        let repo = MockPatientRepository::new();
        let (status, body) = post_patient(
            test_state(repo),
            serde_json::json!({ "name": "", "surname": "Lovelace", "passportNumber": "P123" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "name");
    }

    #[actix_web::test]
    async fn duplicate_passport_number_maps_to_conflict_response() {
        let mut repo = MockPatientRepository::new();
        repo.expect_create_patient()
            .times(1)
            .return_once(|_| Err(PatientRepositoryError::existing_passport_number("P123")));

        let (status, body) = post_patient(
            test_state(repo),
            serde_json::json!({ "name": "Grace", "surname": "Hopper", "passportNumber": "P123" }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["details"]["passportNumber"], "P123");
    }

    #[actix_web::test]
    async fn missing_patient_maps_to_not_found() {
        let mut repo = MockPatientRepository::new();
        repo.expect_find_patient().times(1).return_once(|_| Ok(None));

        let app = actix_test::init_service(
            App::new()
                .app_data(test_state(repo))
                .service(web::scope("/api/v1").service(find_patient)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/patients/does-not-exist")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "not_found");
    }

    #[actix_web::test]
    async fn repository_anomaly_is_redacted_as_internal_error() {
        let mut repo = MockPatientRepository::new();
        repo.expect_find_patient()
            .times(1)
            .return_once(|_| Err(PatientRepositoryError::too_many_patients("abc", 2)));

        let app = actix_test::init_service(
            App::new()
                .app_data(test_state(repo))
                .service(web::scope("/api/v1").service(find_patient)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/patients/abc")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "internal_error");
        assert_eq!(body["message"], "Internal server error");
    }
}
