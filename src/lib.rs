pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod shop;
pub mod signature;
pub mod types;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use client::ReplySender;
use config::Config;
use signature::{verify_signature, SIGNATURE_HEADER};
use types::WebhookRequest;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub replier: Arc<dyn ReplySender>,
}

impl AppState {
    pub fn new(config: Config, replier: impl ReplySender + 'static) -> Self {
        AppState {
            config: Arc::new(config),
            replier: Arc::new(replier),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/webhook", post(webhook_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> StatusCode {
    // An unreadable body is verified as empty, which fails the check.
    let body = body.unwrap_or_else(|e| {
        warn!("Failed to read webhook body: {}", e);
        Bytes::new()
    });

    let signature_valid = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|sig| verify_signature(&body, sig, &state.config.channel_secret))
        .unwrap_or(false);

    if !signature_valid {
        warn!("Invalid or missing signature");
        return StatusCode::FORBIDDEN;
    }

    let webhook_request: WebhookRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse webhook request: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    let report = dispatch::dispatch_events(state.replier.as_ref(), &webhook_request.events).await;
    info!(
        "Processed {} events (replied: {}, failed: {}, skipped: {})",
        webhook_request.events.len(),
        report.replied,
        report.failed,
        report.skipped
    );

    StatusCode::OK
}
