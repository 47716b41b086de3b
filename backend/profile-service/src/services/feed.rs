//! Discovery feed: other users, newest first, optionally filtered by
//! interest-tag intersection, with total-count page metadata.
//!
//! The listing and the count are two independent store reads issued
//! concurrently. Under concurrent writes they may observe different
//! snapshots, so `pagination.pages` can briefly disagree with what the
//! listing actually returned. That inconsistency is accepted.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{FeedPage, InterestFilter, Pagination, ProfileSummary};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// A sanitised feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub page: i64,
    pub per_page: i64,
    pub filter: InterestFilter,
}

impl FeedQuery {
    /// Build a query from raw query-string values. Anything that is not a
    /// positive integer falls back to the default.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, interests: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            per_page: positive_or(limit, DEFAULT_PER_PAGE),
            filter: interests.map(InterestFilter::from_csv).unwrap_or_default(),
        }
    }

    fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

#[derive(Clone)]
pub struct FeedService {
    users: Arc<dyn UserRepository>,
}

impl FeedService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get_feed(&self, requester: Uuid, query: &FeedQuery) -> Result<FeedPage> {
        let failure = if query.filter.is_empty() {
            "Error fetching profiles"
        } else {
            "Error filtering profiles"
        };

        let (users, total) = tokio::try_join!(
            self.users
                .list_feed(requester, &query.filter, query.per_page, query.offset()),
            self.users.count_feed(requester, &query.filter),
        )
        .map_err(|e| AppError::store(failure, e))?;

        debug!(
            user_id = %requester,
            page = query.page,
            returned = users.len(),
            total,
            "feed page served"
        );

        Ok(FeedPage {
            profiles: users.into_iter().map(ProfileSummary::from).collect(),
            pagination: Pagination::new(total, query.page, query.per_page),
        })
    }
}
