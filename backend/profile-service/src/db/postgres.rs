use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{EdgeRepository, UserRepository};
use crate::models::{EdgeKind, InterestFilter, NewUser, ProfileUpdate, User};

const USER_COLUMNS: &str =
    "id, email, password_hash, name, bio, headline, photo_url, interests, created_at, updated_at";

/// PostgreSQL-backed store (source of truth in production)
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct EdgeTable {
    table: &'static str,
    from_col: &'static str,
    to_col: &'static str,
}

fn edge_table(kind: EdgeKind) -> EdgeTable {
    match kind {
        EdgeKind::Follow => EdgeTable {
            table: "follows",
            from_col: "follower_id",
            to_col: "followee_id",
        },
        EdgeKind::Like => EdgeTable {
            table: "likes",
            from_col: "liker_id",
            to_col: "liked_id",
        },
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresStore {
    async fn create_user(&self, new_user: NewUser) -> Result<Option<User>> {
        let sql = format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to insert user")?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by id")?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by email")?;
        Ok(user)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check user existence")?;
        Ok(exists)
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = $2, bio = $3, headline = $4, photo_url = $5, interests = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.bio)
            .bind(&update.headline)
            .bind(&update.photo_url)
            .bind(&update.interests)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to update profile")?;

        debug!("Updated profile in PostgreSQL: {}", id);
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        // follows/likes rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;

        debug!("Deleted user in PostgreSQL: {}", id);
        Ok(result.rows_affected() > 0)
    }

    async fn list_feed(
        &self,
        requester: Uuid,
        filter: &InterestFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id <> $1
              AND (cardinality($2::text[]) = 0 OR interests && $2::text[])
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(requester)
            .bind(filter.tags())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list feed")?;

        Ok(users)
    }

    async fn count_feed(&self, requester: Uuid, filter: &InterestFilter) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE id <> $1
              AND (cardinality($2::text[]) = 0 OR interests && $2::text[])
            "#,
        )
        .bind(requester)
        .bind(filter.tags())
        .fetch_one(&self.pool)
        .await
        .context("Failed to count feed")?;

        Ok(total)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("PostgreSQL health check failed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl EdgeRepository for PostgresStore {
    async fn create_edge(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        let t = edge_table(kind);
        let sql = format!(
            "INSERT INTO {} ({}, {}, created_at) VALUES ($1, $2, NOW()) ON CONFLICT DO NOTHING",
            t.table, t.from_col, t.to_col
        );

        let result = sqlx::query(&sql)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create {} edge", kind.as_str()))?;

        debug!("Created {} edge in PostgreSQL: {} -> {}", kind.as_str(), from, to);
        Ok(result.rows_affected() > 0)
    }

    async fn delete_edge(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        let t = edge_table(kind);
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1 AND {} = $2",
            t.table, t.from_col, t.to_col
        );

        let result = sqlx::query(&sql)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete {} edge", kind.as_str()))?;

        debug!("Deleted {} edge in PostgreSQL: {} -> {}", kind.as_str(), from, to);
        Ok(result.rows_affected() > 0)
    }

    async fn edge_exists(&self, kind: EdgeKind, from: Uuid, to: Uuid) -> Result<bool> {
        let t = edge_table(kind);
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND {} = $2)",
            t.table, t.from_col, t.to_col
        );

        let exists: bool = sqlx::query_scalar(&sql)
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to check {} edge", kind.as_str()))?;

        Ok(exists)
    }
}
