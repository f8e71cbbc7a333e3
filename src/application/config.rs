/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_VERSION, SERVICE_ROOT};
use crate::utils::config::{get_env_flag, get_env_or_default};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Connection and credential settings for one Service Layer session
pub struct Config {
    /// Scheme and host, without trailing slash (e.g. `https://sap.local`)
    pub host: String,
    /// Service Layer port
    pub port: u16,
    /// API version path segment (`v1` or `v2`)
    pub version: String,
    /// Company database to log into
    pub company: String,
    /// Service Layer user name
    pub username: String,
    /// Service Layer password; never serialized, so `{:?}` and `{}` omit it
    #[serde(skip_serializing)]
    pub password: String,
    /// Enables verbose session-lifecycle logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            version: DEFAULT_VERSION.to_string(),
            company: String::new(),
            username: String::new(),
            password: String::new(),
            debug: false,
        }
    }
}

impl Config {
    /// Creates a configuration from environment variables and an optional `.env` file
    ///
    /// Recognized variables: `SAP_HOST`, `SAP_PORT`, `SAP_VERSION`,
    /// `SAP_COMPANY`, `SAP_USERNAME`, `SAP_PASSWORD`, `SAP_DEBUG`.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let company = get_env_or_default("SAP_COMPANY", String::new());
        let username = get_env_or_default("SAP_USERNAME", String::new());
        let password = get_env_or_default("SAP_PASSWORD", String::new());

        if company.is_empty() {
            error!("SAP_COMPANY not found in environment variables or .env file");
        }
        if username.is_empty() {
            error!("SAP_USERNAME not found in environment variables or .env file");
        }
        if password.is_empty() {
            error!("SAP_PASSWORD not found in environment variables or .env file");
        }

        Config {
            host: get_env_or_default("SAP_HOST", DEFAULT_HOST.to_string()),
            port: get_env_or_default("SAP_PORT", DEFAULT_PORT),
            version: get_env_or_default("SAP_VERSION", DEFAULT_VERSION.to_string()),
            company,
            username,
            password,
            debug: get_env_flag("SAP_DEBUG"),
        }
    }

    /// Applies `overrides` on top of this configuration; set fields win
    #[must_use]
    pub fn merge(mut self, overrides: ConfigOverride) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(version) = overrides.version {
            self.version = version;
        }
        if let Some(company) = overrides.company {
            self.company = company;
        }
        if let Some(username) = overrides.username {
            self.username = username;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        if let Some(debug) = overrides.debug {
            self.debug = debug;
        }
        self
    }

    /// Removes exactly one trailing `/` from the host, if present
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let Some(stripped) = self.host.strip_suffix('/') {
            self.host = stripped.to_string();
        }
        self
    }

    /// `{host}:{port}`
    #[must_use]
    pub fn origin(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `{host}:{port}/b1s/{version}/`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}/{}/", self.origin(), SERVICE_ROOT, self.version)
    }

    /// Configuration summary safe to log: everything except the password
    #[must_use]
    pub fn redacted(&self) -> String {
        format!(
            "host={} port={} version={} company={} username={} debug={}",
            self.host, self.port, self.version, self.company, self.username, self.debug
        )
    }
}

/// Fields to override when creating a session; `None` keeps the stored value
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverride {
    /// New host
    pub host: Option<String>,
    /// New port
    pub port: Option<u16>,
    /// New API version
    pub version: Option<String>,
    /// New company database
    pub company: Option<String>,
    /// New user name
    pub username: Option<String>,
    /// New password
    pub password: Option<String>,
    /// New debug flag
    pub debug: Option<bool>,
}

impl fmt::Debug for ConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverride")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("version", &self.version)
            .field("company", &self.company)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("debug", &self.debug)
            .finish()
    }
}

impl ConfigOverride {
    /// Overrides the host
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Overrides the port
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Overrides the API version
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Overrides the company database
    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Overrides the user name
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Overrides the password
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Overrides the debug flag
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}
