//! Request handlers

pub mod claims;
pub mod customers;
pub mod health;
pub mod pool;
pub mod repairs;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path segment into an identifier
pub(crate) fn parse_path<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| ApiError::BadRequest(format!("invalid identifier '{raw}': {e}")))
}
