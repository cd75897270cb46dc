//! HTTP API module for the calculator, health, and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiDoc, AppState, CalculateRequest, CalculateResponse};
pub use routes::create_router;
