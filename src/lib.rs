//! # jhttp
//!
//! A lightweight HTTP / WebSocket client: default headers, cookies,
//! per-request timeouts, and a fixed-count retry policy wrapped around
//! outbound GET/POST requests and WebSocket dial calls.
//!
//! ## Features
//!
//! - **Fixed-delay retry**: `retry + 1` attempts with a constant 500 ms
//!   pause between them
//! - **Default headers and cookies**: configured once, applied to every
//!   request; last-applied header value wins
//! - **Payload variants**: raw bytes, strings, multipart form data, or
//!   any serializable value as JSON
//! - **Cancellation**: a caller-supplied token aborts the in-flight call
//! - **WebSocket dial**: single handshake attempt carrying the
//!   configured headers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jhttp::{Client, ClientConfig, Param, Payload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(
//!         ClientConfig::builder()
//!             .header("X-Api-Key", "secret")
//!             .retry(2)
//!             .build(),
//!     );
//!
//!     let response = client
//!         .get(
//!             "https://api.example.com/users",
//!             Payload::default(),
//!             &[Param::new("page", "1")],
//!         )
//!         .await?;
//!
//!     println!("body: {}", response.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Posting a form
//!
//! ```rust,no_run
//! use jhttp::{Client, ClientConfig, FormData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::default());
//!
//!     let form = FormData::new()
//!         .text("name", "widget")
//!         .part("file", "data.bin", "application/octet-stream", vec![1, 2, 3]);
//!
//!     let response = client
//!         .post("https://api.example.com/upload", form.into(), &[])
//!         .await?;
//!
//!     assert!(response.is_success());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod payload;
mod request;
mod response;
mod websocket;

pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, Cookie};
pub use error::{ClientError, Result};
pub use payload::{FormData, Payload};
pub use request::Param;
pub use response::Response;
pub use websocket::WsStream;

// Re-export common types
pub use http::{HeaderMap, HeaderValue, Method, StatusCode};
pub use tokio_util::sync::CancellationToken;
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use jhttp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::config::{ClientConfig, ClientConfigBuilder, Cookie};
    pub use crate::error::{ClientError, Result};
    pub use crate::payload::{FormData, Payload};
    pub use crate::request::Param;
    pub use crate::response::Response;
    pub use crate::websocket::WsStream;
    pub use http::{HeaderMap, HeaderValue, Method, StatusCode};
}
