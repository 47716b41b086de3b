//! Profile service: discovery feed, user profiles, follow/like edges and
//! account sign-up/login behind a JSON REST API.

pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

pub use app_state::AppState;
pub use error::{AppError, Result};
