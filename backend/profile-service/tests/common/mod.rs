//! Shared fixtures for the HTTP tests: an in-memory store, signing keys
//! and helpers that seed users directly through the repositories.
#![allow(dead_code)]

use actix_web::web;
use crypto_core::JwtKeys;
use profile_service::db::{MemoryStore, UserRepository};
use profile_service::models::{NewUser, ProfileUpdate};
use profile_service::AppState;
use std::sync::Arc;
use uuid::Uuid;

pub const SECRET: &str = "profile-service-test-secret";

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub keys: Arc<JwtKeys>,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let keys = Arc::new(JwtKeys::from_secret(SECRET, 3600).unwrap());
        let state = web::Data::new(AppState::new(store.clone(), store.clone(), keys.clone()));
        Self { store, keys, state }
    }

    pub fn keys_data(&self) -> web::Data<JwtKeys> {
        web::Data::from(self.keys.clone())
    }

    /// Insert a user with the given interests and return (id, bearer header value)
    pub async fn seed_user(&self, email: &str, interests: &[&str]) -> (Uuid, String) {
        let user = self
            .store
            .create_user(NewUser {
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
                name: email.split('@').next().unwrap().to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        self.store
            .update_profile(
                user.id,
                ProfileUpdate {
                    name: user.name.clone(),
                    bio: Some(format!("bio of {}", user.name)),
                    headline: None,
                    photo_url: None,
                    interests: interests.iter().map(|s| s.to_string()).collect(),
                },
            )
            .await
            .unwrap();

        let token = self.keys.issue_access_token(user.id, email).unwrap();
        (user.id, format!("Bearer {}", token))
    }
}

/// Build the full application around a `TestContext`
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .app_data($ctx.keys_data())
                .app_data(profile_service::validators::json_config())
                .configure(profile_service::routes::configure_routes),
        )
        .await
    };
}
