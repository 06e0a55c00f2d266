//! Content-type aware body interpretation.
//!
//! # Rules
//! - `application/json` → parsed JSON tree, or nothing if the body is not JSON
//! - `application/x-www-form-urlencoded` → first value per key, or nothing if
//!   the body is not a well-formed form
//! - anything else → nothing (the raw text is echoed by the caller)
//!
//! Content-type matching is a case-insensitive substring test, so parameters
//! such as `; charset=utf-8` are accepted.

use std::collections::BTreeMap;

use serde_json::Value;
use url::form_urlencoded;

use super::echoer::first_values;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Outcome of interpreting a body. Exactly one variant per body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Body parsed as JSON.
    Json(Value),
    /// Body parsed as a URL-encoded form.
    Form(BTreeMap<String, String>),
    /// No structured interpretation: unsupported type or a soft decode failure.
    Raw,
}

/// Interpret `body` according to its declared content type.
///
/// Never fails: a body that does not match its declared type yields
/// [`Decoded::Raw`].
pub fn decode(body: &[u8], content_type: Option<&str>) -> Decoded {
    let Some(content_type) = content_type else {
        return Decoded::Raw;
    };
    let content_type = content_type.to_ascii_lowercase();

    if content_type.contains(JSON_CONTENT_TYPE) {
        match serde_json::from_slice(body) {
            Ok(value) => Decoded::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, "Body declared as JSON did not parse");
                Decoded::Raw
            }
        }
    } else if content_type.contains(FORM_CONTENT_TYPE) {
        match parse_form(body) {
            Some(form) => Decoded::Form(form),
            None => {
                tracing::debug!("Body declared as form did not parse");
                Decoded::Raw
            }
        }
    } else {
        Decoded::Raw
    }
}

/// Whether a method is expected to carry a meaningful body.
///
/// Retrieval and deletion methods are echoed without their body.
pub fn method_carries_body(method: &str) -> bool {
    !matches!(method, "GET" | "HEAD" | "DELETE")
}

fn parse_form(body: &[u8]) -> Option<BTreeMap<String, String>> {
    if !is_well_formed_form(body) {
        return None;
    }
    Some(first_values(form_urlencoded::parse(body)))
}

/// Rejects `;` separators and `%` not followed by two hex digits.
pub(crate) fn is_well_formed_form(body: &[u8]) -> bool {
    body.iter().enumerate().all(|(i, byte)| match byte {
        b';' => false,
        b'%' => body
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)),
        _ => true,
    })
}
