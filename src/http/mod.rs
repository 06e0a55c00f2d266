//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, body limit)
//!     → handlers.rs (extract method/URI/headers/body into core inputs)
//!     → echo / simulate / health (transport-neutral core)
//!     → response.rs (error → status code mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{canonical_header_name, stamp_request_id, RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
