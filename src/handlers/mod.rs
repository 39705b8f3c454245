mod contact;
mod health;
mod metrics;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::state::AppState;

pub use contact::{ContactError, client_key, contact_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/contact", post(contact_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
