use actix_web::{web, HttpResponse};
use actix_middleware::UserId;

use super::parse_user_id;
use crate::app_state::AppState;
use crate::error::Result;
use crate::models::UpdateProfileRequest;

/// GET /api/profile/me
pub async fn get_me(state: web::Data<AppState>, user: UserId) -> Result<HttpResponse> {
    let profile = state.profiles.get_own(user.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/profile/me
pub async fn update_me(
    state: web::Data<AppState>,
    user: UserId,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let profile = state.profiles.update(user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/profile/me
pub async fn delete_me(state: web::Data<AppState>, user: UserId) -> Result<HttpResponse> {
    state.profiles.delete(user.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Public profile view, no token required
/// GET /api/profile/{id}
pub async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let profile_id = parse_user_id(&path.into_inner())?;
    let profile = state.profiles.get_public(profile_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
