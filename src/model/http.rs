/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HTTP transport
//!
//! [`Transport`] is the seam between the session manager and the network.
//! [`HttpTransport`] is the reqwest implementation: it carries the base URL,
//! the default headers and, once logged in, the session cookie.

use crate::application::config::Config;
use crate::constants::{JSON_CONTENT_TYPE, USER_AGENT};
use crate::error::AppError;
use crate::model::requests::RequestOptions;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Settings a transport is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    /// Scheme, host and port, e.g. `https://sap:50000`
    pub origin: String,
    /// Service Layer root, e.g. `https://sap:50000/b1s/v2/`
    pub base_url: String,
    /// Skip TLS certificate validation
    pub accept_invalid_certs: bool,
    /// Headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl TransportSettings {
    /// Settings for a Service Layer described by `config`
    ///
    /// Certificate validation is disabled: Service Layer installs commonly run
    /// on internal hosts with self-signed certificates.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            origin: config.origin(),
            base_url: config.base_url(),
            accept_invalid_certs: true,
            default_headers: vec![(
                CONTENT_TYPE.as_str().to_string(),
                JSON_CONTENT_TYPE.to_string(),
            )],
        }
    }
}

/// A failed transport call
#[derive(Debug, Clone)]
pub enum TransportError {
    /// The server answered outside the accepted status range
    Status {
        /// Response status
        status: StatusCode,
        /// Requested URL
        path: String,
        /// Response headers
        headers: HeaderMap,
        /// Response body as text
        body: String,
    },
    /// The request was sent but no response arrived
    Network(String),
    /// The request could not be built
    Setup(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status {
                status, path, body, ..
            } => write!(f, "{status} from {path}: {body}"),
            TransportError::Network(msg) => write!(f, "no response: {msg}"),
            TransportError::Setup(msg) => write!(f, "request not sent: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::Setup(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Performs HTTP calls against the Service Layer
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request to `target`, resolved against the base URL, and
    /// returns the decoded body
    async fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Value, TransportError>;

    /// Attaches the session cookie to every later request of this transport
    async fn attach_cookie(&self, cookie: String);
}

/// Builds a fresh transport for each login
pub trait TransportFactory: Send + Sync {
    /// Creates a transport for `settings`
    fn build(&self, settings: TransportSettings) -> Result<Arc<dyn Transport>, AppError>;
}

/// Statuses the Service Layer treats as success: 200-299 and 405
#[must_use]
pub fn is_accepted_status(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::METHOD_NOT_ALLOWED
}

/// Resolves a request target against the Service Layer root
///
/// Absolute URLs are used verbatim, server-absolute paths (`/b1s/...`) are
/// joined to the origin, and anything else is relative to the base URL.
#[must_use]
pub fn resolve_url(origin: &str, base_url: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else if target.starts_with("/b1s/") {
        format!("{}{}", origin.trim_end_matches('/'), target)
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    }
}

/// Decodes a response body: empty is `Null`, non-JSON text is a string
#[must_use]
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// reqwest-backed [`Transport`]
pub struct HttpTransport {
    client: Client,
    origin: String,
    base_url: String,
    cookie: RwLock<Option<String>>,
}

impl HttpTransport {
    /// Creates a transport from `settings`
    ///
    /// # Returns
    /// * `Ok(HttpTransport)` - Ready to send requests
    /// * `Err(AppError)` - If a default header is invalid or the client cannot be built
    pub fn new(settings: &TransportSettings) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &settings.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::InvalidInput(format!("header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AppError::InvalidInput(format!("header value {value}: {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            origin: settings.origin.clone(),
            base_url: settings.base_url.clone(),
            cookie: RwLock::new(None),
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        let url = resolve_url(&self.origin, &self.base_url, target);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);

        if let Some(cookie) = self.cookie.read().await.as_deref() {
            request = request.header(COOKIE, cookie);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !is_accepted_status(status) {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_else(|e| {
                warn!("Failed to read error body from {}: {}", url, e);
                String::new()
            });
            return Err(TransportError::Status {
                status,
                path: url,
                headers,
                body,
            });
        }

        let text = response.text().await?;
        Ok(parse_body(&text))
    }

    async fn attach_cookie(&self, cookie: String) {
        *self.cookie.write().await = Some(cookie);
    }
}

/// Builds [`HttpTransport`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransportFactory;

impl TransportFactory for HttpTransportFactory {
    fn build(&self, settings: TransportSettings) -> Result<Arc<dyn Transport>, AppError> {
        Ok(Arc::new(HttpTransport::new(&settings)?))
    }
}
