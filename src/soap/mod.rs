//! SOAP plumbing for the FootPrints external API.
//!
//! The requester talks to the service only through the [`SoapTransport`]
//! trait. [`HttpSoapTransport`] is the production implementation; tests
//! substitute their own.
//!
//! - [`description`] - service description (WSDL) parsing
//! - [`cache`] - optional on-disk cache of fetched descriptions
//! - [`envelope`] - request envelope encoding and response decoding
//! - [`transport`] - HTTP transport with basic authentication

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::Params;

pub mod cache;
pub mod description;
pub mod envelope;
pub mod transport;

pub use cache::DescriptionCache;
pub use description::ServiceDescription;
pub use envelope::{build_request, decode_response};
pub use transport::HttpSoapTransport;

/// Invokes one SOAP operation and returns its decoded result.
///
/// `params` arrive already keyed in the service's naming convention.
/// Implementations report failures as raw [`TransportError`]s; classifying
/// them is the caller's job.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Calls `operation` (its wire name) with `params`.
    async fn call(&self, operation: &str, params: &Params) -> Result<Value, TransportError>;
}
