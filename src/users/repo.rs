use anyhow::anyhow;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate key: email already exists")]
    DuplicateKey,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey,
            _ => StoreError::Backend(e.into()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user with empty `profile` and `description`.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    /// Writes every mutable field of `user` back and returns the stored row.
    async fn save(&self, user: &User) -> Result<User, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, profile, description)
            VALUES ($1, $2, $3, '', '')
            RETURNING id, name, email, password, profile, description
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, profile, description
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, profile, description
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, profile, description
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4, profile = $5, description = $6
            WHERE id = $1
            RETURNING id, name, email, password, profile, description
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.profile)
        .bind(&user.description)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| StoreError::Backend(anyhow!("user {} vanished before save", user.id)))
    }
}
