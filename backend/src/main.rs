//! Service entry point: configuration, persistence wiring, and the HTTP
//! server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use patient_service::domain::PatientsService;
use patient_service::inbound::http::health::{HealthState, live, ready};
use patient_service::inbound::http::patients::{create_patient, find_patient};
use patient_service::inbound::http::state::HttpState;
use patient_service::outbound::persistence::{
    DbPool, DieselPatientRepository, PoolConfig, run_migrations,
};
use patient_service::server::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    run_migrations(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(
        PoolConfig::new(config.database_url.as_str()).with_max_size(config.pool_max_size),
    )
    .await
    .map_err(std::io::Error::other)?;

    let repository = DieselPatientRepository::new(pool, Arc::new(DefaultClock));
    let state = web::Data::new(HttpState::new(PatientsService::new(Arc::new(repository))));

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let server_state = state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health_state.clone())
            .app_data(server_state.clone())
            .service(live)
            .service(ready)
            .service(
                web::scope("/api/v1")
                    .service(create_patient)
                    .service(find_patient),
            )
    })
    .bind(config.bind_addr.as_str())?;

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr, "patient service listening");
    server.run().await
}
