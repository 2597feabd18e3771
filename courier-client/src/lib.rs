//! # Courier Client
//!
//! Builds and sends a single HTTP request described by a declarative
//! configuration, with path-addressed patching of the body before sending.
//!
//! ## Features
//!
//! - **One path API, three body shapes**: JSON-like trees, SOAP envelopes and
//!   URL-encoded forms are all written with `set_body("a.b.c", value)`
//! - **Content negotiation**: explicit `Content-Type`, then `SOAPAction`,
//!   then the body shape decide the wire format
//! - **Byte-exact SOAP edits**: only the addressed element's content changes
//! - **Cancellation**: `cancel()` from any task unblocks an in-flight request
//! - **Snapshots**: the body is frozen when `execute()` starts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier_client::RequestManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = RequestManager::from_source(
//!         r#"{"Method": "POST", "URL": "https://api.example.com/orders", "Body": {"item": "widget"}}"#,
//!     )?;
//!
//!     manager.set_header("Authorization", "Bearer token123");
//!     manager.set_body("quantity", 5)?;
//!     manager.set_body("shipping.address.city", "Lisbon")?;
//!
//!     let response = manager.execute().await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Cancelling From Another Task
//!
//! ```rust,no_run
//! use courier_client::{CourierError, RequestManager};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = Arc::new(RequestManager::from_source("./request.json")?);
//!
//!     let worker = {
//!         let manager = Arc::clone(&manager);
//!         tokio::spawn(async move { manager.execute().await })
//!     };
//!
//!     tokio::time::sleep(Duration::from_secs(1)).await;
//!     manager.cancel();
//!
//!     match worker.await? {
//!         Err(CourierError::Cancelled) => println!("cancelled"),
//!         other => println!("{:?}", other.map(|r| r.status())),
//!     }
//!     Ok(())
//! }
//! ```

mod body;
mod config;
mod error;
mod executor;
mod form;
mod headers;
mod manager;
mod negotiate;
mod path;
mod request;
mod response;
mod soap;
mod store;

pub use body::{Body, FormMap, stringify};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{CourierError, Result};
pub use executor::{ExecutionState, Executor};
pub use form::FormMutator;
pub use headers::{CONTENT_TYPE, HeaderSet, SOAP_ACTION};
pub use manager::RequestManager;
pub use negotiate::{
    APPLICATION_JSON, APPLICATION_XML, ContentNegotiator, FORM_URLENCODED, Negotiated, WireFormat,
};
pub use path::{MAX_SEQUENCE_GROWTH, Path, PathMutator};
pub use request::PreparedRequest;
pub use response::Response;
pub use soap::SoapMutator;
pub use store::{BodyStore, MutationMode};

// Re-export common types
pub use bytes::Bytes;
pub use courier_config::{ConfigError, RequestConfig};
pub use http::{HeaderMap, Method, StatusCode};
pub use serde_json::{Value, json};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use courier_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::error::{CourierError, Result};
    pub use crate::executor::ExecutionState;
    pub use crate::manager::RequestManager;
    pub use crate::request::PreparedRequest;
    pub use crate::response::Response;
    pub use crate::store::MutationMode;
    pub use courier_config::RequestConfig;
    pub use serde_json::json;
}
