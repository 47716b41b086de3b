use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Liveness: the process is up
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness: the store answers
pub async fn readiness_check(state: web::Data<AppState>) -> impl Responder {
    match state.users.health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "ready",
            version: env!("CARGO_PKG_VERSION"),
        }),
        Err(e) => {
            tracing::warn!("readiness check failed: {:#}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unavailable",
                version: env!("CARGO_PKG_VERSION"),
            })
        }
    }
}
