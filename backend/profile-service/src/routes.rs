//! Route configuration
//!
//! Every authenticated resource is wrapped individually so that the public
//! profile view can share the `/api/profile` scope with owner-only routes.

use actix_middleware::JwtAuthMiddleware;
use actix_web::web;

use crate::handlers;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health_check))
        .route("/ready", web::get().to(handlers::health::readiness_check))
        .service(
            web::scope("/api")
                .configure(auth)
                .configure(feed)
                .configure(profile),
        );
}

fn auth(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(handlers::auth::signup))
            .route("/login", web::post().to(handlers::auth::login)),
    );
}

fn feed(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/feed")
            .wrap(JwtAuthMiddleware)
            .route("", web::get().to(handlers::feed::get_feed))
            .route("/filter", web::get().to(handlers::feed::filter_feed)),
    );
}

fn profile(cfg: &mut web::ServiceConfig) {
    use crate::handlers::{profile, relationships};

    cfg.service(
        web::scope("/profile")
            // "/me" must be registered before "/{id}"
            .service(
                web::resource("/me")
                    .wrap(JwtAuthMiddleware)
                    .route(web::get().to(profile::get_me))
                    .route(web::put().to(profile::update_me))
                    .route(web::delete().to(profile::delete_me)),
            )
            .service(
                web::resource("/{id}/follow")
                    .wrap(JwtAuthMiddleware)
                    .route(web::post().to(relationships::follow))
                    .route(web::delete().to(relationships::unfollow))
                    .route(web::get().to(relationships::follow_status)),
            )
            .service(
                web::resource("/{id}/like")
                    .wrap(JwtAuthMiddleware)
                    .route(web::post().to(relationships::like))
                    .route(web::delete().to(relationships::unlike))
                    .route(web::get().to(relationships::like_status)),
            )
            .service(web::resource("/{id}").route(web::get().to(profile::get_profile))),
    );
}
