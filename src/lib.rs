/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # SAP Business One Service Layer client
//!
//! An async client for the session-based Service Layer REST API. It:
//!
//! - logs in and keeps the `B1SESSION` cookie attached to every request
//! - transparently logs in again when the session is about to expire
//! - follows `@odata.nextLink` continuation links to collect whole result sets
//! - returns routine API failures as values instead of raising them
//!
//! ## Example
//!
//! ```ignore
//! use sap_b1_client::prelude::*;
//!
//! let client = Client::new(Config::from_env());
//! client.create_session(ConfigOverride::default()).await?;
//!
//! let items = client.find("Items?$select=ItemCode", &RequestOptions::default()).await?;
//! match client.get("BusinessPartners('C20000')", &RequestOptions::default()).await? {
//!     Ok(partner) => println!("{partner}"),
//!     Err(e) => eprintln!("{}", e.message),
//! }
//! ```

/// Session management, request facade and configuration
pub mod application;
/// Library-wide constants
pub mod constants;
/// Error types and the error normalizer
pub mod error;
/// Wire models and the HTTP transport
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// Environment and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
