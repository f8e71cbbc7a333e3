/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Request facade for the Service Layer
//!
//! Every call first asks the [`SessionManager`] for a valid session, then
//! delegates to the transport. `get`, `put`, `patch`, `post` and `delete`
//! return transport failures as [`ApiError`] values; `query` and `find`
//! raise them.
//!
//! # Example
//! ```ignore
//! let client = Client::new(Config::from_env());
//! client.create_session(ConfigOverride::default()).await?;
//!
//! let orders = client.find("Orders?$filter=DocTotal gt 100", &RequestOptions::default()).await?;
//! ```

use crate::application::auth::{Session, SessionManager};
use crate::application::clock::Clock;
use crate::application::config::{Config, ConfigOverride};
use crate::error::{ApiError, ApiResult, AppError};
use crate::model::http::{HttpTransportFactory, TransportFactory};
use crate::model::requests::RequestOptions;
use crate::model::responses::Page;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Service Layer client with automatic session renewal
pub struct Client {
    sessions: SessionManager,
}

impl Client {
    /// Creates a client without logging in
    pub fn new(config: Config) -> Self {
        Self {
            sessions: SessionManager::new(config),
        }
    }

    /// Creates a client that reads time from `clock`
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self::with_parts(config, clock, Arc::new(HttpTransportFactory))
    }

    /// Creates a client with an explicit clock and transport factory
    pub fn with_parts(
        config: Config,
        clock: Arc<dyn Clock>,
        factory: Arc<dyn TransportFactory>,
    ) -> Self {
        Self {
            sessions: SessionManager::with_parts(config, clock, factory),
        }
    }

    /// Creates a client and logs in with `config`
    ///
    /// # Returns
    /// * `Ok(Client)` - Authenticated client ready to use
    /// * `Err(AppError)` - If authentication fails
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        let client = Self::new(config);
        client.create_session(ConfigOverride::default()).await?;
        Ok(client)
    }

    /// Merges `overrides` into the stored configuration and logs in
    pub async fn create_session(&self, overrides: ConfigOverride) -> Result<(), AppError> {
        self.sessions.create_session(overrides).await?;
        Ok(())
    }

    /// Raw GET passthrough returning the response body
    ///
    /// Unlike [`Client::get`], transport failures are raised as [`AppError::Api`].
    pub async fn query(&self, query: &str, options: &RequestOptions) -> Result<Value, AppError> {
        let transport = self.sessions.ensure_valid_session().await?;
        Ok(transport.send(Method::GET, query, None, options).await?)
    }

    /// Runs a list query and follows `@odata.nextLink` until the last page
    ///
    /// Pages are concatenated in server order. Headers and timeout apply to
    /// every page; query parameters only to the first request, because a
    /// continuation link already carries the complete query.
    pub async fn find(&self, query: &str, options: &RequestOptions) -> Result<Vec<Value>, AppError> {
        let follow_options = options.without_query();
        let mut items = Vec::new();
        let mut page: Page = serde_json::from_value(self.query(query, options).await?)?;
        let mut pages = 1;

        loop {
            items.append(&mut page.value);
            let Some(next_link) = page.next_link.take() else {
                break;
            };
            debug!("Following continuation link {}", next_link);
            page = serde_json::from_value(self.query(&next_link, &follow_options).await?)?;
            pages += 1;
        }

        debug!("Collected {} records from {} pages", items.len(), pages);
        Ok(items)
    }

    /// GET `resource`
    pub async fn get(&self, resource: &str, options: &RequestOptions) -> Result<ApiResult, AppError> {
        self.request(Method::GET, resource, None, options).await
    }

    /// POST `body` to `resource`
    pub async fn post<B: Serialize>(
        &self,
        resource: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResult, AppError> {
        self.request_with_body(Method::POST, resource, body, options)
            .await
    }

    /// PUT `body` to `resource`
    pub async fn put<B: Serialize>(
        &self,
        resource: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResult, AppError> {
        self.request_with_body(Method::PUT, resource, body, options)
            .await
    }

    /// PATCH `resource` with `body`
    pub async fn patch<B: Serialize>(
        &self,
        resource: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResult, AppError> {
        self.request_with_body(Method::PATCH, resource, body, options)
            .await
    }

    /// DELETE `resource`
    pub async fn delete(
        &self,
        resource: &str,
        options: &RequestOptions,
    ) -> Result<ApiResult, AppError> {
        self.request(Method::DELETE, resource, None, options).await
    }

    /// Ends the session on the server and forgets it locally
    pub async fn logout(&self) -> Result<(), AppError> {
        self.sessions.logout().await
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Option<Session> {
        self.sessions.session().await
    }

    /// Whether a session has been created
    pub async fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated().await
    }

    /// Gets the session manager
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    async fn request_with_body<B: Serialize>(
        &self,
        method: Method,
        resource: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResult, AppError> {
        match serde_json::to_value(body) {
            Ok(value) => self.request(method, resource, Some(value), options).await,
            Err(e) => {
                self.sessions.ensure_valid_session().await?;
                Ok(Err(ApiError::request_setup(e)))
            }
        }
    }

    async fn request(
        &self,
        method: Method,
        resource: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<ApiResult, AppError> {
        let transport = self.sessions.ensure_valid_session().await?;
        Ok(transport
            .send(method, resource, body.as_ref(), options)
            .await
            .map_err(ApiError::from))
    }
}
