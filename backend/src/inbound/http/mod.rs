//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod patients;
pub mod state;

pub use error::ApiResult;
