use thiserror::Error;

/// Errors raised while establishing who the caller is and what they may do
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("requires role {0}")]
    Forbidden(&'static str),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::InvalidToken(_) => 1002,
            AuthError::Forbidden(_) => 1003,
            AuthError::TokenError(_) => 1102,
        }
    }
}
