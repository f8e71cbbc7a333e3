/// Default Service Layer host when none is configured
pub const DEFAULT_HOST: &str = "http://localhost";
/// Default Service Layer port
pub const DEFAULT_PORT: u16 = 80;
/// Default Service Layer API version segment
pub const DEFAULT_VERSION: &str = "v2";
/// Path segment between the host and the version in every Service Layer URL
pub const SERVICE_ROOT: &str = "b1s";
/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "Login";
/// Logout endpoint, relative to the base URL
pub const LOGOUT_PATH: &str = "Logout";
/// Name of the session cookie issued by the Service Layer
pub const SESSION_COOKIE: &str = "B1SESSION";
/// Minutes subtracted from the server-declared session timeout
pub const SESSION_SAFETY_MARGIN_MINUTES: i64 = 1;
/// Message returned when a request was sent but no response arrived
pub const NO_RESPONSE_MESSAGE: &str = "ERROR REQUEST";
/// Content type sent with every request
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = concat!("sap-b1-client/", env!("CARGO_PKG_VERSION"));
