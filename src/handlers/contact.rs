use axum::{
    Extension, Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::clock::SystemClock;
use crate::error::{GateError, SUBMIT_FAILURE_TEXT, SubmitError};
use crate::gatekeeper::Gatekeeper;
use crate::metrics::{CONTACT_ACCEPTED, CONTACT_REJECTED, CONTACT_REQUESTS, TRACKED_CLIENTS};
use crate::models::{Feedback, FormFields, SUCCESS_TEXT};
use crate::state::AppState;

const FALLBACK_CLIENT: &str = "global";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Rejected(GateError),

    #[error("rate limited for {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("delivery failed: {0}")]
    Delivery(#[from] SubmitError),
}

impl ContactError {
    fn reason(&self) -> &'static str {
        match self {
            ContactError::Rejected(e) => e.reason(),
            ContactError::RateLimited { .. } => GateError::RateLimited.reason(),
            ContactError::Delivery(_) => "delivery",
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        match self {
            ContactError::Rejected(e) => {
                (StatusCode::BAD_REQUEST, Json(Feedback::error(e.to_string()))).into_response()
            }
            ContactError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(Feedback::error(GateError::RateLimited.to_string())),
            )
                .into_response(),
            ContactError::Delivery(e) => {
                error!("contact delivery failed: {}", e);
                (StatusCode::BAD_GATEWAY, Json(Feedback::error(SUBMIT_FAILURE_TEXT))).into_response()
            }
        }
    }
}

/// Who is asking: the first `X-Forwarded-For` hop, else the peer IP of the
/// connection. Only when neither is known do requests share one bucket.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| FALLBACK_CLIENT.to_string())
}

fn whole_seconds(ms: i64) -> u64 {
    let secs = (ms.max(0) as u64).div_ceil(1000);
    secs.max(1)
}

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    peer: Option<Extension<ConnectInfo<SocketAddr>>>,
    headers: HeaderMap,
    Json(fields): Json<FormFields>,
) -> Result<Json<Feedback>, ContactError> {
    CONTACT_REQUESTS.inc();
    let key = client_key(&headers, peer.map(|Extension(ConnectInfo(addr))| addr));

    // The map guard must not live across the delivery await
    let admitted = {
        let mut gate = state
            .gatekeepers
            .entry(key.clone())
            .or_insert_with(|| Gatekeeper::new(state.limits, SystemClock));
        gate.admit(&fields).map_err(|err| match err {
            GateError::RateLimited => ContactError::RateLimited {
                retry_after_secs: whole_seconds(gate.limiter().remaining_ms()),
            },
            other => ContactError::Rejected(other),
        })
    };
    TRACKED_CLIENTS.set(state.gatekeepers.len() as f64);

    let message = match admitted {
        Ok(message) => message,
        Err(e) => {
            CONTACT_REJECTED.with_label_values(&[e.reason()]).inc();
            return Err(e);
        }
    };

    state.delivery.submit(&message.escaped()).await?;

    CONTACT_ACCEPTED.inc();
    info!(client = %key, "contact message delivered");
    Ok(Json(Feedback::success(SUCCESS_TEXT)))
}
