/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
/// Session lifecycle management
pub mod auth;
/// Request facade and pagination
pub mod client;
/// Time source for session expiry
pub mod clock;
/// Client configuration
pub mod config;
