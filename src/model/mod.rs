/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
/// Login request and response bodies
pub mod auth;
/// HTTP transport with the Service Layer success range
pub mod http;
/// Per-call request options
pub mod requests;
/// Paged list responses
pub mod responses;
