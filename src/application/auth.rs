/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Session lifecycle for the Service Layer
//!
//! This module provides the session manager that:
//! - Logs in with `POST Login` and attaches the `B1SESSION` cookie
//! - Tracks expiry with a one-minute safety margin
//! - Logs in again, with the stored configuration, once the session expired
//!
//! The Service Layer has no refresh token, so renewal is always a full login.
//! Session state is only locked for reads and writes, never across the login
//! round-trip: concurrent calls near the expiry boundary may each log in.

use crate::application::clock::{Clock, SystemClock};
use crate::application::config::{Config, ConfigOverride};
use crate::constants::{LOGIN_PATH, LOGOUT_PATH, SESSION_COOKIE, SESSION_SAFETY_MARGIN_MINUTES};
use crate::error::AppError;
use crate::model::auth::{LoginRequest, LoginResponse};
use crate::model::http::{HttpTransportFactory, Transport, TransportFactory, TransportSettings};
use crate::model::requests::RequestOptions;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// A live Service Layer session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Server-issued session id
    pub token: String,
    /// Company database the session is bound to
    pub company_db: String,
    /// When the login succeeded
    pub created_at: DateTime<Utc>,
    /// When the client stops using the session
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session from a login at `created_at`
    ///
    /// `expires_at` is `created_at + (timeout_minutes - 1)` minutes.
    ///
    /// # Returns
    /// * `Some(Session)` - For a timeout of at least one minute
    /// * `None` - If the timeout is below one minute or the expiry is not representable
    #[must_use]
    pub fn new(
        token: String,
        company_db: String,
        created_at: DateTime<Utc>,
        timeout_minutes: i64,
    ) -> Option<Self> {
        if timeout_minutes < 1 {
            return None;
        }
        let lifetime =
            Duration::try_minutes(timeout_minutes.checked_sub(SESSION_SAFETY_MARGIN_MINUTES)?)?;
        let expires_at = created_at.checked_add_signed(lifetime)?;
        Some(Self {
            token,
            company_db,
            created_at,
            expires_at,
        })
    }

    /// Whether `now` is at or past the expiry instant
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// `B1SESSION=<id>;CompanyDB=<company>`
    #[must_use]
    pub fn cookie(&self) -> String {
        format!(
            "{}={};CompanyDB={}",
            SESSION_COOKIE, self.token, self.company_db
        )
    }
}

struct ActiveSession {
    session: Session,
    transport: Arc<dyn Transport>,
}

/// Owns the configuration and the current session of one client
pub struct SessionManager {
    config: RwLock<Config>,
    state: RwLock<Option<ActiveSession>>,
    clock: Arc<dyn Clock>,
    factory: Arc<dyn TransportFactory>,
}

impl SessionManager {
    /// Creates a manager using wall time and the reqwest transport
    ///
    /// No login happens until [`SessionManager::create_session`].
    pub fn new(config: Config) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), Arc::new(HttpTransportFactory))
    }

    /// Creates a manager with an explicit clock and transport factory
    pub fn with_parts(
        config: Config,
        clock: Arc<dyn Clock>,
        factory: Arc<dyn TransportFactory>,
    ) -> Self {
        Self {
            config: RwLock::new(config),
            state: RwLock::new(None),
            clock,
            factory,
        }
    }

    /// Merges `overrides` into the stored configuration and logs in
    ///
    /// # Returns
    /// * `Ok(Session)` - The new session, also stored in the manager
    /// * `Err(AppError::Authentication)` - If the login call fails
    pub async fn create_session(&self, overrides: ConfigOverride) -> Result<Session, AppError> {
        let config = {
            let mut stored = self.config.write().await;
            *stored = stored.clone().merge(overrides).normalized();
            stored.clone()
        };
        self.login(&config).await
    }

    /// Returns the transport of a valid session, logging in again if expired
    ///
    /// A no-op while the session is still valid.
    ///
    /// # Returns
    /// * `Ok(transport)` - Transport carrying a valid session cookie
    /// * `Err(AppError::NotAuthenticated)` - If no session was ever created
    /// * `Err(AppError::Authentication)` - If the renewal login fails
    pub async fn ensure_valid_session(&self) -> Result<Arc<dyn Transport>, AppError> {
        let now = self.clock.now();
        {
            let state = self.state.read().await;
            let Some(active) = state.as_ref() else {
                warn!("No session created yet");
                return Err(AppError::NotAuthenticated);
            };
            if !active.session.is_expired(now) {
                return Ok(active.transport.clone());
            }
            info!(
                "Session expired at {}, logging in again",
                active.session.expires_at
            );
        }

        let config = self.config.read().await.clone();
        self.login(&config).await?;

        let state = self.state.read().await;
        state
            .as_ref()
            .map(|active| active.transport.clone())
            .ok_or(AppError::NotAuthenticated)
    }

    /// Ends the current session with `POST Logout` and forgets it
    ///
    /// The session is dropped even when the logout call fails.
    pub async fn logout(&self) -> Result<(), AppError> {
        let Some(active) = self.state.write().await.take() else {
            debug!("No session to log out");
            return Ok(());
        };

        info!("Logging out");
        active
            .transport
            .send(Method::POST, LOGOUT_PATH, None, &RequestOptions::default())
            .await
            .map_err(|e| {
                warn!("Logout request failed: {}", e);
                AppError::from(e)
            })?;
        info!("✓ Logged out successfully");
        Ok(())
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Option<Session> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|active| active.session.clone())
    }

    /// Snapshot of the stored configuration
    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }

    /// Whether a session exists, expired or not
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    async fn login(&self, config: &Config) -> Result<Session, AppError> {
        if config.debug {
            debug!("Creating session with config: {}", config.redacted());
        }

        let settings = TransportSettings::from_config(config);
        info!("Logging in to {} as {}", settings.base_url, config.username);
        let transport = self.factory.build(settings)?;

        let body = serde_json::to_value(LoginRequest::from(config))?;
        let value = transport
            .send(
                Method::POST,
                LOGIN_PATH,
                Some(&body),
                &RequestOptions::default(),
            )
            .await
            .map_err(|e| {
                error!("Login failed: {}", e);
                AppError::Authentication(e.to_string())
            })?;

        let response: LoginResponse = serde_json::from_value(value).map_err(|e| {
            error!("Unexpected login response: {}", e);
            AppError::Authentication(format!("invalid login response: {e}"))
        })?;

        let timeout = response.session_timeout;
        let session = Session::new(
            response.session_id,
            config.company.clone(),
            self.clock.now(),
            timeout,
        )
        .ok_or_else(|| {
            error!("Unusable session timeout: {}", timeout);
            AppError::Authentication(format!("invalid session timeout: {timeout} minutes"))
        })?;
        let cookie = session.cookie();
        if config.debug {
            debug!("Session cookie: {}", cookie);
            debug!(
                "Session created at {}, expires at {}",
                session.created_at, session.expires_at
            );
        }
        transport.attach_cookie(cookie).await;

        *self.state.write().await = Some(ActiveSession {
            session: session.clone(),
            transport,
        });

        info!("✓ Login successful, company: {}", session.company_db);
        Ok(session)
    }
}
