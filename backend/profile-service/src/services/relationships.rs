use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::{EdgeRepository, UserRepository};
use crate::error::{AppError, FieldError, Result};
use crate::models::EdgeKind;

/// Follow and like edges between users.
///
/// Create and remove are idempotent. Status checks never fail on an
/// unknown target; they simply report no edge.
#[derive(Clone)]
pub struct RelationshipService {
    users: Arc<dyn UserRepository>,
    edges: Arc<dyn EdgeRepository>,
}

impl RelationshipService {
    pub fn new(users: Arc<dyn UserRepository>, edges: Arc<dyn EdgeRepository>) -> Self {
        Self { users, edges }
    }

    pub async fn create(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<()> {
        if from == to {
            return Err(AppError::Validation(vec![FieldError::new(
                "id",
                "self-relationship not permitted",
            )]));
        }
        self.ensure_target(kind, to, true).await?;

        let created = self
            .edges
            .create_edge(kind, from, to)
            .await
            .map_err(|e| AppError::store(failure_message(kind, true), e))?;

        if created {
            info!(edge = kind.as_str(), from = %from, to = %to, "edge created");
        }
        Ok(())
    }

    pub async fn remove(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<()> {
        self.ensure_target(kind, to, false).await?;

        let removed = self
            .edges
            .delete_edge(kind, from, to)
            .await
            .map_err(|e| AppError::store(failure_message(kind, false), e))?;

        if removed {
            info!(edge = kind.as_str(), from = %from, to = %to, "edge removed");
        }
        Ok(())
    }

    pub async fn status(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        self.edges
            .edge_exists(kind, from, to)
            .await
            .map_err(|e| AppError::store("Error checking relationship status", e))
    }

    async fn ensure_target(&self, kind: EdgeKind, to: Uuid, create: bool) -> Result<()> {
        let exists = self
            .users
            .exists(to)
            .await
            .map_err(|e| AppError::store(failure_message(kind, create), e))?;

        if !exists {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}

fn failure_message(kind: EdgeKind, create: bool) -> &'static str {
    match (kind, create) {
        (EdgeKind::Follow, true) => "Error following user",
        (EdgeKind::Follow, false) => "Error unfollowing user",
        (EdgeKind::Like, true) => "Error liking user",
        (EdgeKind::Like, false) => "Error unliking user",
    }
}
