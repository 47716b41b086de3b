//! Central application state
//!
//! Handlers only ever see `web::Data<AppState>`; stores are reached
//! through the services grouped here.

use crypto_core::JwtKeys;
use std::sync::Arc;

use crate::db::{EdgeRepository, UserRepository};
use crate::services::{AuthService, FeedService, ProfileService, RelationshipService};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jwt_keys: Arc<JwtKeys>,
    pub feed: FeedService,
    pub profiles: ProfileService,
    pub relationships: RelationshipService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        edges: Arc<dyn EdgeRepository>,
        jwt_keys: Arc<JwtKeys>,
    ) -> Self {
        Self {
            feed: FeedService::new(users.clone()),
            profiles: ProfileService::new(users.clone()),
            relationships: RelationshipService::new(users.clone(), edges),
            auth: AuthService::new(users.clone(), jwt_keys.clone()),
            users,
            jwt_keys,
        }
    }
}
