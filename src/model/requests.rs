/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use std::time::Duration;

/// Per-call options forwarded to the transport
///
/// Each field has one effect:
/// - `headers` are added to the request, after the defaults and the session cookie
/// - `timeout` bounds the whole call
/// - `query` pairs are appended to the URL query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Call-level deadline
    pub timeout: Option<Duration>,
    /// Extra query parameters
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Creates empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the call-level timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a query parameter
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Same options without query parameters, used when following continuation links
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            headers: self.headers.clone(),
            timeout: self.timeout,
            query: Vec::new(),
        }
    }
}
