//! Request echo subsystem.
//!
//! # Data Flow
//! ```text
//! Transport adapter (HTTP handler)
//!     → request.rs (EchoRequest: method, URI, headers, query, body)
//!     → echoer.rs (flatten args/headers, decide whether a body is expected)
//!     → decoder.rs (JSON / form / raw interpretation of the body)
//!     → response.rs (EchoResponse, serialized by the adapter)
//! ```
//!
//! # Design Decisions
//! - Pure functions: no shared state, safe to call from any number of tasks
//! - Decoding failures degrade to the raw body, they never fail the request
//! - Repeated keys keep their first value (query args, headers, form fields)

pub mod decoder;
pub mod echoer;
pub mod request;
pub mod response;

pub use decoder::{decode, method_carries_body, Decoded};
pub use echoer::{echo_headers, echo_request};
pub use request::EchoRequest;
pub use response::{EchoResponse, HeadersResponse};
