use actix_web::{web, HttpResponse};

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::{LoginRequest, RegisterRequest};

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let response = state.auth.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let response = state.auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
