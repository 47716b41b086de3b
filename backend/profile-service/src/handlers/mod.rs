pub mod auth;
pub mod feed;
pub mod health;
pub mod profile;
pub mod relationships;

use uuid::Uuid;

use crate::error::{AppError, Result};

/// Path ids that do not parse can never match a user, so they are a 404.
pub(crate) fn parse_user_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("User not found".to_string()))
}
