//! # Footprints
//!
//! A client for the BMC FootPrints (formerly Numara) ticketing SOAP API.
//!
//! It turns ordinary method calls into SOAP requests, converts parameter
//! keys between snake_case and the service's `_camelCase` convention, maps
//! failures onto a small typed error taxonomy and wraps ticket and item
//! payloads in convenience types.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration, in code or from environment variables
//! - [`error`] - The error taxonomy and transport failure classification
//! - [`keys`] - Key case conversion
//! - [`args`] - Argument cleanup and required-field checks
//! - [`attributes`] - Field descriptor extraction
//! - [`operation`] - The table of supported SOAP operations
//! - [`soap`] - Service description loading, envelope codec, HTTP transport
//! - [`requester`] - Validated dispatch with a bounded response history
//! - [`inputs`] - Typed parameters for each operation
//! - [`models`] - `Ticket` and `Item` wrappers
//! - [`client`] - The [`Footprints`] client
//!
//! ## Configuration
//!
//! [`Config::from_env`] reads:
//!
//! - `FOOTPRINTS_BASE_URL`: URL of the service description (WSDL)
//! - `FOOTPRINTS_CLIENT_ID`: username for basic authentication
//! - `FOOTPRINTS_CLIENT_SECRET`: password for basic authentication
//!
//! Optional:
//! - `FOOTPRINTS_STORAGE_URL`: directory for the service description cache
//! - `FOOTPRINTS_CACHE_TIMEOUT`: cache lifetime in seconds (default 60)
//!
//! ## Security Considerations
//!
//! The client secret is stored only in memory and is:
//! - Never logged at any log level
//! - Redacted from `Debug` output and from error messages
//!
//! ## Example
//!
//! ```ignore
//! use footprints::inputs::{GetTicketInput, TicketUpdate};
//! use footprints::{Config, Footprints};
//! use serde_json::json;
//!
//! async fn example() -> Result<(), footprints::FootprintsError> {
//!     let config = Config::from_env()?;
//!     let client = Footprints::connect(&config).await?;
//!
//!     // A textual id is looked up as the ticket's item number.
//!     let ticket = client.get_ticket(GetTicketInput::new(76, "SR-1042")).await?;
//!     println!("{}", ticket);
//!
//!     ticket
//!         .update(TicketUpdate::new(json!({"itemFields": [
//!             {"fieldName": "Status", "fieldValue": {"value": "Resolved"}}
//!         ]})))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod args;
pub mod attributes;
pub mod client;
pub mod config;
pub mod error;
pub mod inputs;
pub mod keys;
pub mod models;
pub mod operation;
pub mod requester;
pub mod soap;

pub use client::Footprints;
pub use config::{Config, Settings};
pub use error::{ErrorOrigin, FootprintsError, ServiceError, ServiceErrorKind};
pub use models::{Item, Ticket};
pub use operation::Operation;
pub use requester::Requester;

/// An ordered mapping of parameter names to values.
pub type Params = serde_json::Map<String, serde_json::Value>;
