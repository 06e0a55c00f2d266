//! Axum handlers: translate HTTP requests into core inputs and back.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::echo::{echo_headers, echo_request, EchoRequest, EchoResponse, HeadersResponse};
use crate::health::{ServingStatus, OVERALL_SERVICE};
use crate::http::request::{canonical_header_name, RequestId};
use crate::http::server::AppState;
use crate::simulate::{DelayResponse, SimulatedStatus, SimulationError};

/// Registry-backed readiness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ServingStatus,
    pub services: BTreeMap<String, ServingStatus>,
}

/// Path and query exactly as received.
fn request_uri(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Header list in arrival order, names in canonical case. Non-UTF-8 values
/// are decoded lossily.
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                canonical_header_name(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// `GET /get`, `POST /post`, `PUT /put`, `PATCH /patch`, `DELETE /delete`.
pub async fn echo(
    Extension(request_id): Extension<RequestId>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<EchoResponse> {
    let request = EchoRequest::new(method.as_str(), request_uri(&uri))
        .with_headers(header_pairs(&headers))
        .with_body(body.to_vec());

    tracing::debug!(
        request_id = %request_id.as_str(),
        method = %method,
        uri = %request.uri,
        body_bytes = request.body.len(),
        "Echoing request"
    );

    Json(echo_request(&request))
}

/// `GET /headers`.
pub async fn headers(headers: HeaderMap) -> Json<HeadersResponse> {
    Json(echo_headers(&header_pairs(&headers)))
}

/// `GET /status/{code}`: respond with the requested code.
///
/// A 1xx code cannot end an HTTP/1.1 exchange, so it is answered with the
/// 200 that follows an informational response.
pub async fn status(Path(code): Path<String>) -> Result<StatusCode, SimulationError> {
    let status = code.parse::<SimulatedStatus>()?;
    if status.is_informational() {
        tracing::debug!(code = status.code(), "Informational status answered with 200");
        return Ok(StatusCode::OK);
    }
    StatusCode::from_u16(status.code()).map_err(|_| SimulationError::InvalidStatus { input: code })
}

/// `GET /delay/{seconds}`: wait, then confirm.
pub async fn delay(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Path(seconds): Path<String>,
) -> Result<Json<DelayResponse>, SimulationError> {
    let response = state
        .delay
        .delay(&seconds, method.as_str(), &request_uri(&uri))
        .await?;
    Ok(Json(response))
}

/// `GET /health`: static liveness, independent of the registry.
pub async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /ready`: 200 while the overall entry is SERVING, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let services = state.registry.snapshot();
    let status = services
        .get(OVERALL_SERVICE)
        .copied()
        .unwrap_or(ServingStatus::Unknown);
    let code = if status == ServingStatus::Serving {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(ReadinessResponse { status, services }))
}
