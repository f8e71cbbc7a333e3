/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error types
//!
//! Two families live here:
//! - [`AppError`] is raised: failed logins, calls made before any session
//!   exists, and failures of the raw `query`/`find` paths.
//! - [`ApiError`] is returned as a value by `get`, `put`, `patch`, `post`
//!   and `delete`, so routine API failures never need `?` handling.

use crate::constants::NO_RESPONSE_MESSAGE;
use crate::model::http::{TransportError, parse_body};
use serde_json::{Value, json};
use std::fmt;
use tracing::error;

/// Outcome of a normalized request: the response body or a tagged failure
pub type ApiResult = Result<Value, ApiError>;

/// Category of a normalized request failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server answered with a status outside 200-299 and 405
    Server {
        /// HTTP status returned by the server
        status: u16,
    },
    /// The request was sent but no response arrived
    Network,
    /// The request could not be built, so it was never sent
    RequestSetup,
}

/// A failure converted into a value by the error normalizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// What went wrong
    pub kind: ApiErrorKind,
    /// Server body text for [`ApiErrorKind::Server`], `"ERROR REQUEST"` for
    /// [`ApiErrorKind::Network`], the underlying message otherwise
    pub message: String,
    /// `message` decoded the way response bodies are: JSON when it parses,
    /// a string otherwise
    pub body: Value,
}

impl ApiError {
    /// Builds a request-setup failure from any displayable cause
    pub fn request_setup(cause: impl fmt::Display) -> Self {
        Self::new(ApiErrorKind::RequestSetup, cause.to_string())
    }

    /// Builds a failure of `kind`, decoding `message` into [`ApiError::body`]
    pub fn new(kind: ApiErrorKind, message: String) -> Self {
        let body = parse_body(&message);
        Self {
            kind,
            message,
            body,
        }
    }

    /// Always `true`; mirrors the `error` flag of the JSON shape
    #[must_use]
    pub fn is_error(&self) -> bool {
        true
    }

    /// HTTP status of a server failure
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Server { status } => Some(status),
            _ => None,
        }
    }

    /// Renders the failure as `{"error": true, "message": ...}`
    ///
    /// A JSON server body is embedded as an object, not as escaped text.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({ "error": true, "message": self.body })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiErrorKind::Server { status } => write!(f, "server error {status}: {}", self.message),
            ApiErrorKind::Network => write!(f, "network error: {}", self.message),
            ApiErrorKind::RequestSetup => write!(f, "request setup error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    /// Normalizes a transport failure, logging the diagnostic detail
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status {
                status,
                path,
                headers,
                body,
            } => {
                error!(
                    status = status.as_u16(),
                    path = %path,
                    headers = ?headers,
                    "Service Layer answered with an error: {}",
                    body
                );
                ApiError::new(
                    ApiErrorKind::Server {
                        status: status.as_u16(),
                    },
                    body,
                )
            }
            TransportError::Network(cause) => {
                error!("No response from Service Layer: {}", cause);
                ApiError::new(ApiErrorKind::Network, NO_RESPONSE_MESSAGE.to_string())
            }
            TransportError::Setup(cause) => {
                error!("Request could not be built: {}", cause);
                ApiError::request_setup(cause)
            }
        }
    }
}

/// Errors raised by the client
#[derive(Debug)]
pub enum AppError {
    /// The login call failed or returned an unusable body
    Authentication(String),
    /// An operation was attempted before any session was created
    NotAuthenticated,
    /// A raw query or logout failed; carries the normalized failure
    Api(ApiError),
    /// Building the HTTP client failed
    Network(reqwest::Error),
    /// JSON (de)serialization failed
    Json(serde_json::Error),
    /// I/O failure
    Io(std::io::Error),
    /// Caller-supplied data was rejected
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Authentication(msg) => write!(f, "authentication error: {msg}"),
            AppError::NotAuthenticated => write!(f, "not authenticated"),
            AppError::Api(e) => write!(f, "api error: {e}"),
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        AppError::Api(ApiError::from(err))
    }
}
