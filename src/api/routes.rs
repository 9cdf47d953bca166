use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::observability::trace_http_requests;
use crate::remediation::{PolicyGate, RemediationEngine};

use super::{
    error::{ErrorBody, INTERNAL_ERROR_MESSAGE},
    handlers::{credential_rotation_handler, health_handler},
};

/// Path of the remediation trigger.
pub const CREDENTIAL_ROTATION_PATH: &str = "/api/credential-rotation";

#[derive(Clone)]
pub struct ApiState {
    pub gate: PolicyGate,
    pub engine: Arc<RemediationEngine>,
}

impl ApiState {
    pub fn new(gate: PolicyGate, engine: Arc<RemediationEngine>) -> Self {
        Self { gate, engine }
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route(CREDENTIAL_ROTATION_PATH, post(credential_rotation_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(trace_http_requests))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: INTERNAL_ERROR_MESSAGE.to_string() }),
    )
        .into_response()
}
