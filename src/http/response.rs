//! Response mapping for core errors.
//!
//! # Design Decisions
//! - Invalid simulator input is a client error: 400 with a short text body
//! - Soft decode failures never reach this layer; they are not errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::simulate::SimulationError;

impl IntoResponse for SimulationError {
    fn into_response(self) -> Response {
        tracing::warn!(input = %self.input(), error = %self, "Rejected simulation input");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
