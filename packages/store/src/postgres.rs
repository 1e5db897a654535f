//! # PostgreSQL backend
//!
//! Users live in one `users` table. The embedded lists are stored as a single
//! `JSONB` column so a user keeps the shape of one document: every save rewrites
//! the whole `lists` value together with a version bump.
//!
//! Saves are conditional (`WHERE version = $n`). When no row is updated the
//! backend checks whether the user still exists to tell
//! [`StoreError::Conflict`] apart from [`StoreError::UserNotFound`].

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{TodoList, User, UserId};
use crate::repo::UserStore;

const USER_COLUMNS: &str = "id, username, password_hash, lists, version, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    lists: Json<Vec<TodoList>>,
    version: i64,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from(row.id),
            username: row.username,
            password_hash: row.password_hash,
            lists: row.lists.0,
            version: row.version,
            created_at: row.created_at,
        }
    }
}

/// UserStore backed by a PostgreSQL connection pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of up to 5 connections to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UserStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = User::new(username, password_hash);
        let query = format!(
            "INSERT INTO users (id, username, password_hash, lists, version, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );
        let row: UserRow = sqlx::query_as(&query)
            .bind(*user.id.as_uuid())
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(Json(&user.lists))
            .bind(user.version)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::UsernameTaken {
                        username: username.to_string(),
                    }
                }
                _ => StoreError::from(err),
            })?;
        Ok(row.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn load(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let query = format!(
            "UPDATE users SET lists = $1, version = version + 1, updated_at = NOW() \
             WHERE id = $2 AND version = $3 RETURNING {USER_COLUMNS}"
        );
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(Json(&user.lists))
            .bind(*user.id.as_uuid())
            .bind(user.version)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                let exists: Option<(i64,)> =
                    sqlx::query_as("SELECT version FROM users WHERE id = $1")
                        .bind(*user.id.as_uuid())
                        .fetch_optional(&self.pool)
                        .await?;
                Err(match exists {
                    Some(_) => StoreError::Conflict { user_id: user.id },
                    None => StoreError::UserNotFound { user_id: user.id },
                })
            }
        }
    }
}
