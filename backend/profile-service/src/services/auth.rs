use crypto_core::{password, CryptoError, JwtKeys};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account creation and credential checks. Issues access tokens on success.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: Arc<JwtKeys>) -> Self {
        Self { users, keys }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse> {
        req.validate()?;

        let email = normalize_email(&req.email);
        let password_hash = password::hash_password(&req.password)
            .map_err(|_| AppError::internal("Error creating account"))?;

        let user = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                name: req.name.trim().to_string(),
            })
            .await
            .map_err(|e| AppError::store("Error creating account", e))?
            .ok_or_else(|| AppError::Conflict("Email is already registered".to_string()))?;

        info!(user_id = %user.id, "account created");
        self.issue(user)
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        req.validate()?;

        let email = normalize_email(&req.email);
        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| AppError::store("Error logging in", e))?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        match password::verify_password(&req.password, &user.password_hash) {
            Ok(()) => {}
            Err(CryptoError::PasswordMismatch) => {
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
            Err(e) => {
                warn!(user_id = %user.id, "stored password hash unusable: {}", e);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        }

        info!(user_id = %user.id, "login succeeded");
        self.issue(user)
    }

    fn issue(&self, user: User) -> Result<AuthResponse> {
        let token = self
            .keys
            .issue_access_token(user.id, &user.email)
            .map_err(|e| {
                tracing::error!("failed to issue access token: {}", e);
                AppError::internal("Error issuing token")
            })?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
