/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # Prelude
//!
//! The commonly used types in one import.
//!
//! ```rust
//! use sap_b1_client::prelude::*;
//!
//! let config = Config::default();
//! let client = Client::new(config);
//! ```

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Client configuration and per-session overrides
pub use crate::application::config::{Config, ConfigOverride};

/// Per-call request options
pub use crate::model::requests::RequestOptions;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// CLIENT AND SESSION
// ============================================================================

/// Request facade
pub use crate::application::client::Client;

/// Session manager and session snapshot
pub use crate::application::auth::{Session, SessionManager};

/// Time sources
pub use crate::application::clock::{Clock, MockClock, SystemClock};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Raised and normalized error types
pub use crate::error::{ApiError, ApiErrorKind, ApiResult, AppError};

// ============================================================================
// TRANSPORT AND WIRE MODELS
// ============================================================================

/// Transport seam and its reqwest implementation
pub use crate::model::http::{
    HttpTransport, HttpTransportFactory, Transport, TransportError, TransportFactory,
    TransportSettings,
};

/// Paged list response
pub use crate::model::responses::Page;

// ============================================================================
// UTILITIES
// ============================================================================

/// Logger setup
pub use crate::utils::logger::setup_logger;
