//! Configuration error types

/// Errors in user-supplied configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A resource name matched none of the known kinds.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A `key=value` argument without the `=`.
    #[error("Expected key=value, got {0:?}")]
    InvalidPair(String),

    /// A record payload that is not a JSON object.
    #[error("Invalid record payload: {0}")]
    InvalidPayload(String),
}
