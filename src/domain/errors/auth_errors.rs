use thiserror::Error;

/// Errors raised by the identity provider or the auth gateway
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// Shown to the user for every sign-in failure, whatever the cause
    #[error("Email ou senha incorretos.")]
    InvalidCredentials,

    #[error("Session is missing or expired")]
    SessionExpired,

    #[error("Identity provider rejected the request: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Identity provider unreachable: {message}")]
    Transport { message: String },
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
