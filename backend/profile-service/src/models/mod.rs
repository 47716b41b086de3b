use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validators;

// ============================================
// Stored records
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub bio: Option<String>,
    pub headline: Option<String>,
    pub photo_url: Option<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Normalised profile replacement, produced from `UpdateProfileRequest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: Option<String>,
    pub headline: Option<String>,
    pub photo_url: Option<String>,
    pub interests: Vec<String>,
}

/// Directed edge kinds between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Follow,
    Like,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Follow => "follow",
            EdgeKind::Like => "like",
        }
    }
}

// ============================================
// Feed
// ============================================

/// Tag-intersection filter; empty means "no filter"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestFilter(Vec<String>);

impl InterestFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(normalize_interests(tags))
    }

    /// Parse a comma separated list, e.g. `music, art,,travel`
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// True when the filter is empty or shares at least one tag with `interests`.
    pub fn matches(&self, interests: &[String]) -> bool {
        self.0.is_empty() || interests.iter().any(|tag| self.0.contains(tag))
    }
}

/// Trim, drop empties and de-duplicate while keeping first-seen order.
pub fn normalize_interests<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Public projection of a user as shown in the feed and on profile pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub headline: Option<String>,
    pub photo_url: Option<String>,
    pub interests: Vec<String>,
}

impl From<User> for ProfileSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            bio: user.bio,
            headline: user.headline,
            photo_url: user.photo_url,
            interests: user.interests,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(total: i64, current_page: i64, per_page: i64) -> Self {
        let pages = if total <= 0 {
            0
        } else {
            total / per_page + i64::from(total % per_page != 0)
        };
        Self {
            total,
            pages,
            current_page,
            per_page,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub profiles: Vec<ProfileSummary>,
    pub pagination: Pagination,
}

// ============================================
// Profile
// ============================================

/// The caller's own profile, including email
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: Option<String>,
    pub headline: Option<String>,
    pub photo_url: Option<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for OwnProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            bio: user.bio,
            headline: user.headline,
            photo_url: user.photo_url,
            interests: user.interests,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validators::not_blank", message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,
    #[validate(length(max = 255, message = "Headline must be at most 255 characters"))]
    pub headline: Option<String>,
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UpdateProfileRequest {
    /// Trim text fields and normalise interests. Blank optionals become `None`.
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.trim().to_string(),
            bio: trimmed(self.bio),
            headline: trimmed(self.headline),
            photo_url: trimmed(self.photo_url),
            interests: normalize_interests(&self.interests),
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================
// Relationships
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    pub is_following: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusResponse {
    pub is_liked: bool,
}

// ============================================
// Auth
// ============================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email must be a valid address"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[serde(default)]
    pub password: String,
    #[validate(custom(function = "validators::not_blank", message = "Name is required"))]
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: OwnProfile,
}
