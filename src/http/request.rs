//! Request identification and header naming.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the client did not send one
//! - Expose the ID to handlers and the trace span for log correlation
//! - Restore canonical header name casing for echoed headers
//!
//! # Design Decisions
//! - A generated ID is stamped on the response only; the request headers
//!   stay exactly as the client sent them
//! - A client-supplied `x-request-id` is kept and echoed back unchanged

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// ID of the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outermost middleware: attach a [`RequestId`] to the request and the
/// `x-request-id` header to the response.
pub async fn stamp_request_id(mut request: Request, next: Next) -> Response {
    let (id, header) = match request.headers().get(X_REQUEST_ID) {
        Some(value) => (
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
            Some(value.clone()),
        ),
        None => {
            let id = Uuid::new_v4().to_string();
            let header = HeaderValue::from_str(&id).ok();
            (id, header)
        }
    };
    request.extensions_mut().insert(RequestId(id));

    let mut response = next.run(request).await;
    if let Some(header) = header {
        response.headers_mut().insert(X_REQUEST_ID, header);
    }
    response
}

/// Trace span for one request, tagged with its ID.
pub fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(RequestId::as_str)
        .unwrap_or("unknown");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// `content-type` → `Content-Type`, `x-request-id` → `X-Request-Id`.
///
/// Uppercases the first letter and every letter following a hyphen,
/// lowercases the rest.
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_name("ACCEPT-LANGUAGE"), "Accept-Language");
        assert_eq!(canonical_header_name("accept"), "Accept");
        assert_eq!(canonical_header_name("x--double"), "X--Double");
        assert_eq!(canonical_header_name(""), "");
    }

    #[test]
    fn request_id_reads_back() {
        assert_eq!(RequestId("abc-123".into()).as_str(), "abc-123");
    }
}
