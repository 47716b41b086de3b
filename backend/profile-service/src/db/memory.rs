use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EdgeRepository, UserRepository};
use crate::models::{EdgeKind, InterestFilter, NewUser, ProfileUpdate, User};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    edges: HashSet<(EdgeKind, Uuid, Uuid)>,
    last_created: Option<DateTime<Utc>>,
}

impl Inner {
    /// Creation timestamps are kept strictly increasing so newest-first
    /// ordering is total even when inserts land in the same clock tick.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(ts);
        ts
    }

    fn feed_candidates<'a>(
        &'a self,
        requester: Uuid,
        filter: &'a InterestFilter,
    ) -> impl Iterator<Item = &'a User> + 'a {
        self.users
            .values()
            .filter(move |u| u.id != requester && filter.matches(&u.interests))
    }
}

/// In-process store used by tests and `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, as an unreachable database would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("memory store marked unavailable");
        }
        Ok(())
    }

    pub async fn edge_count(&self) -> usize {
        self.inner.read().await.edges.len()
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<Option<User>> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Ok(None);
        }

        let created_at = inner.next_created_at();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            bio: None,
            headline: None,
            photo_url: None,
            interests: Vec::new(),
            created_at,
            updated_at: created_at,
        };
        inner.users.insert(user.id, user.clone());
        Ok(Some(user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.check_available()?;
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = update.name;
        user.bio = update.bio;
        user.headline = update.headline;
        user.photo_url = update.photo_url;
        user.interests = update.interests;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        if inner.users.remove(&id).is_none() {
            return Ok(false);
        }
        inner.edges.retain(|(_, from, to)| *from != id && *to != id);
        Ok(true)
    }

    async fn list_feed(
        &self,
        requester: Uuid,
        filter: &InterestFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>> {
        self.check_available()?;
        let inner = self.inner.read().await;

        let mut users: Vec<&User> = inner.feed_candidates(requester, filter).collect();
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(users
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_feed(&self, requester: Uuid, filter: &InterestFilter) -> Result<i64> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.feed_candidates(requester, filter).count() as i64)
    }

    async fn health_check(&self) -> Result<()> {
        self.check_available()
    }
}

#[async_trait::async_trait]
impl EdgeRepository for MemoryStore {
    async fn create_edge(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&from) || !inner.users.contains_key(&to) {
            bail!("edge endpoint does not exist");
        }
        Ok(inner.edges.insert((kind, from, to)))
    }

    async fn delete_edge(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        self.check_available()?;
        Ok(self.inner.write().await.edges.remove(&(kind, from, to)))
    }

    async fn edge_exists(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        self.check_available()?;
        Ok(self.inner.read().await.edges.contains(&(kind, from, to)))
    }
}
