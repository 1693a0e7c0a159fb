//! Authentication error types

/// Errors raised by admin operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// An admin operation was attempted while signed out.
    #[error("Not signed in")]
    NotSignedIn,

    /// The server rejected the admin credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,
}
