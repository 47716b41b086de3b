//! Token and credential primitives shared by the Discover services.
//!
//! - `jwt`: HS256 access token issuance and validation
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("token encoding failed: {0}")]
    Encoding(String),

    #[error("token validation failed: {0}")]
    InvalidToken(String),

    #[error("password hashing failed")]
    Hash,

    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("password does not match")]
    PasswordMismatch,
}

pub type CryptoResult<T> = Result<T, CryptoError>;

pub use jwt::{Claims, JwtKeys};
