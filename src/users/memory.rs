use anyhow::anyhow;
use axum::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::repo::{StoreError, UserStore};
use crate::users::repo_types::{NewUser, User};

/// Process-local store. Same uniqueness rules as the database table.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateKey);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password_hash,
            profile: String::new(),
            description: String::new(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(StoreError::DuplicateKey);
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::Backend(anyhow!("user {} vanished before save", user.id)))?;
        *slot = user.clone();
        Ok(slot.clone())
    }
}
