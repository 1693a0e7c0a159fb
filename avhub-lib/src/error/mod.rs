//! Error types

mod api;
mod auth;
mod config;

pub use api::*;
pub use auth::*;
pub use config::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Admin authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` if repeating the request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            _ => false,
        }
    }
}
