use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{OwnProfile, ProfileSummary, UpdateProfileRequest};

/// Owner-scoped profile reads and writes, plus the public profile view.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get_own(&self, user_id: Uuid) -> Result<OwnProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::store("Error fetching profile", e))?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
        Ok(user.into())
    }

    pub async fn get_public(&self, profile_id: Uuid) -> Result<ProfileSummary> {
        let user = self
            .users
            .find_by_id(profile_id)
            .await
            .map_err(|e| AppError::store("Error fetching profile", e))?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
        Ok(user.into())
    }

    /// Validate every field, then replace the editable profile fields.
    pub async fn update(&self, user_id: Uuid, req: UpdateProfileRequest) -> Result<OwnProfile> {
        req.validate()?;

        let user = self
            .users
            .update_profile(user_id, req.into_update())
            .await
            .map_err(|e| AppError::store("Error updating profile", e))?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        info!(user_id = %user_id, "profile updated");
        Ok(user.into())
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        let deleted = self
            .users
            .delete_user(user_id)
            .await
            .map_err(|e| AppError::store("Error deleting profile", e))?;

        if !deleted {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }
        info!(user_id = %user_id, "account deleted");
        Ok(())
    }
}
