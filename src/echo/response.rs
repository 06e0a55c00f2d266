//! Echo response shapes, serialized as JSON by the transport adapters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured reflection of one request.
///
/// `json` and `form` are never both present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoResponse {
    pub method: String,
    pub url: String,
    pub args: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<BTreeMap<String, String>>,
}

/// Body of the headers-only echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadersResponse {
    pub headers: BTreeMap<String, String>,
}
