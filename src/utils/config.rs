/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// Reads and parses `env_var`, falling back to `default` when it is unset or invalid
///
/// Empty values count as unset. Parse failures are logged.
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => val.trim().parse::<T>().unwrap_or_else(|e| {
            error!("Failed to parse {}={}: {:?}, using default", env_var, val, e);
            default
        }),
        _ => default,
    }
}

/// Reads a boolean switch: `1`, `true`, `yes` and `on` are `true`, case-insensitively
///
/// Anything else, including an unset variable, is `false`.
#[must_use]
pub fn get_env_flag(env_var: &str) -> bool {
    env::var(env_var)
        .map(|val| parse_flag(&val))
        .unwrap_or(false)
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
