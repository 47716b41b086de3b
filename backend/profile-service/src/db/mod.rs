pub mod memory;
pub mod postgres;

use anyhow::Result;
use uuid::Uuid;

use crate::models::{EdgeKind, InterestFilter, NewUser, ProfileUpdate, User};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage contract for user records.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Returns `None` when the email is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Replace the editable profile fields. Returns `None` if the user is gone.
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>>;

    /// Delete a user together with every edge touching it.
    /// Returns false when there was nothing to delete.
    async fn delete_user(&self, id: Uuid) -> Result<bool>;

    /// Users other than `requester`, newest first, matching `filter`.
    async fn list_feed(
        &self,
        requester: Uuid,
        filter: &InterestFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>>;

    /// Count under the same predicate as `list_feed`
    async fn count_feed(&self, requester: Uuid, filter: &InterestFilter) -> Result<i64>;

    async fn health_check(&self) -> Result<()>;
}

/// Storage contract for directed follow/like edges.
#[async_trait::async_trait]
pub trait EdgeRepository: Send + Sync {
    /// Returns true if a new edge was written, false if it already existed.
    async fn create_edge(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool>;

    /// Returns true if an edge was removed.
    async fn delete_edge(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool>;

    async fn edge_exists(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool>;
}
