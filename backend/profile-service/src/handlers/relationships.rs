use actix_web::{web, HttpResponse};
use actix_middleware::UserId;

use super::parse_user_id;
use crate::app_state::AppState;
use crate::error::Result;
use crate::models::{EdgeKind, FollowStatusResponse, LikeStatusResponse, MessageResponse};

// ============================================
// Follow
// ============================================

/// POST /api/profile/{id}/follow
pub async fn follow(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let target = parse_user_id(&path.into_inner())?;
    state.relationships.create(EdgeKind::Follow, user.0, target).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully followed user")))
}

/// DELETE /api/profile/{id}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let target = parse_user_id(&path.into_inner())?;
    state.relationships.remove(EdgeKind::Follow, user.0, target).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully unfollowed user")))
}

/// GET /api/profile/{id}/follow
pub async fn follow_status(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    // an id that cannot exist simply has no edge
    let is_following = match uuid::Uuid::parse_str(&path.into_inner()) {
        Ok(target) => state.relationships.status(EdgeKind::Follow, user.0, target).await?,
        Err(_) => false,
    };
    Ok(HttpResponse::Ok().json(FollowStatusResponse { is_following }))
}

// ============================================
// Like
// ============================================

/// POST /api/profile/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let target = parse_user_id(&path.into_inner())?;
    state.relationships.create(EdgeKind::Like, user.0, target).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully liked user")))
}

/// DELETE /api/profile/{id}/like
pub async fn unlike(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let target = parse_user_id(&path.into_inner())?;
    state.relationships.remove(EdgeKind::Like, user.0, target).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully unliked user")))
}

/// GET /api/profile/{id}/like
pub async fn like_status(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let is_liked = match uuid::Uuid::parse_str(&path.into_inner()) {
        Ok(target) => state.relationships.status(EdgeKind::Like, user.0, target).await?,
        Err(_) => false,
    };
    Ok(HttpResponse::Ok().json(LikeStatusResponse { is_liked }))
}
