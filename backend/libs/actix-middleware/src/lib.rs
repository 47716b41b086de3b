//! # Actix Middleware Library
//!
//! Shared middleware components for Discover Actix services
//!
//! ## Modules
//! - `jwt_auth`: Bearer token authentication producing a `UserId` principal

pub mod jwt_auth;

pub use jwt_auth::{JwtAuthMiddleware, UserId};
