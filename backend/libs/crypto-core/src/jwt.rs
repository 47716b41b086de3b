/// JWT issuance and validation for Discover services
///
/// Tokens are signed with HS256 using a secret loaded from configuration.
/// A `JwtKeys` value is built once at startup and shared (e.g. through
/// `web::Data`) with every component that issues or checks tokens.
///
/// ```rust
/// use crypto_core::jwt::JwtKeys;
/// use uuid::Uuid;
///
/// let keys = JwtKeys::from_secret("change-me", 3600).unwrap();
/// let user_id = Uuid::new_v4();
/// let token = keys.issue_access_token(user_id, "ada@example.com").unwrap();
/// assert_eq!(keys.user_id_from_token(&token).unwrap(), user_id);
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CryptoError, CryptoResult};

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type, always "access" for now
    pub token_type: String,
    /// Email address at issuance time
    pub email: String,
}

/// Signing and verification keys plus token lifetime
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("access_ttl_secs", &self.access_ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

impl JwtKeys {
    /// Build keys from a shared secret.
    pub fn from_secret(secret: &str, access_ttl_secs: i64) -> CryptoResult<Self> {
        if secret.is_empty() {
            return Err(CryptoError::EmptySecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(access_ttl_secs),
        })
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Issue an access token for `user_id`.
    pub fn issue_access_token(&self, user_id: Uuid, email: &str) -> CryptoResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            email: email.to_string(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| CryptoError::Encoding(e.to_string()))
    }

    /// Validate signature, expiry and token type, returning the claims.
    pub fn validate_token(&self, token: &str) -> CryptoResult<Claims> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| CryptoError::InvalidToken(e.to_string()))?;

        if data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(CryptoError::InvalidToken(format!(
                "unexpected token type '{}'",
                data.claims.token_type
            )));
        }

        Ok(data.claims)
    }

    /// Validate the token and parse its subject as a user id.
    pub fn user_id_from_token(&self, token: &str) -> CryptoResult<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|e| CryptoError::InvalidToken(format!("malformed subject: {e}")))
    }
}
