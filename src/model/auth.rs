/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use crate::application::config::Config;
use serde::{Deserialize, Serialize};

/// Body of `POST Login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Company database to open
    #[serde(rename = "CompanyDB")]
    pub company_db: String,
    /// User password
    #[serde(rename = "Password")]
    pub password: String,
    /// User name
    #[serde(rename = "UserName")]
    pub user_name: String,
}

impl From<&Config> for LoginRequest {
    fn from(config: &Config) -> Self {
        Self {
            company_db: config.company.clone(),
            password: config.password.clone(),
            user_name: config.username.clone(),
        }
    }
}

/// Successful `POST Login` response
///
/// Extra fields returned by the server (`odata.metadata`, `Version`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session id to send back in the `B1SESSION` cookie
    #[serde(rename = "SessionId")]
    pub session_id: String,
    /// Server-side session lifetime in minutes
    #[serde(rename = "SessionTimeout")]
    pub session_timeout: i64,
}
