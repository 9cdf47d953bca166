//! Remediation trigger endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::api::dto::{RemediationRequestDto, RemediationResponse};
use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::observability::metrics;
use crate::remediation::RemediationRequest;

/// `POST /api/credential-rotation`
///
/// The policy gate runs first; the engine is only reached on `Proceed`. A run
/// that ends `failed` is still a 200.
#[instrument(skip(state, payload))]
pub async fn credential_rotation_handler(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RemediationResponse>, ApiError> {
    let dto = decode_body(payload)?;

    let request = RemediationRequest::try_from(dto).map_err(|e| {
        warn!(error = %e, "Rejected remediation request");
        ApiError::from(e)
    })?;

    let decision = state.gate.decide(request.threat_score());
    metrics::record_policy_decision(decision.kind());
    info!(
        user_id = %request.user_id(),
        incident_id = ?request.incident_id(),
        threat_score = request.threat_score(),
        threshold = state.gate.threshold(),
        decision = decision.kind(),
        "Policy decision"
    );

    if let Some(response) = RemediationResponse::from_decision(decision) {
        return Ok(Json(response));
    }

    let result = state.engine.execute(request.user_id(), request.incident_id()).await;
    Ok(Json(result.into()))
}

/// Only a JSON object with well-typed fields is accepted.
fn decode_body(payload: Result<Json<Value>, JsonRejection>) -> Result<RemediationRequestDto, ApiError> {
    let Json(value) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected malformed remediation request");
        ApiError::invalid_format()
    })?;

    if !value.is_object() {
        warn!("Rejected remediation request: body is not a JSON object");
        return Err(ApiError::invalid_format());
    }

    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Rejected remediation request with mistyped fields");
        ApiError::invalid_format()
    })
}
