use async_trait::async_trait;
use axum_helpers::TokenPair;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Number of users registered with `email`
    async fn count_by_email(&self, email: &str) -> UserResult<u64>;

    /// Number of users registered with `phone`
    async fn count_by_phone(&self, phone: &str) -> UserResult<u64>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn insert(&self, user: &User) -> UserResult<()>;

    /// Overwrite the stored token pair and `updated_at` of the user keyed by `user_id`
    async fn update_tokens(
        &self,
        user_id: &str,
        tokens: &TokenPair,
        updated_at: DateTime<Utc>,
    ) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn count_by_email(&self, email: &str) -> UserResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.email == email).count() as u64)
    }

    async fn count_by_phone(&self, phone: &str) -> UserResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.phone == phone).count() as u64)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> UserResult<()> {
        let mut users = self.users.write().await;

        // Mirrors the unique indexes on the MongoDB collection
        let taken = users
            .values()
            .any(|u| u.id == user.id || u.email == user.email || u.phone == user.phone);
        if taken {
            return Err(UserError::Database(format!(
                "duplicate key for user {}",
                user.user_id
            )));
        }

        users.insert(user.id, user.clone());
        tracing::info!(user_id = %user.id, "Created user");
        Ok(())
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        tokens: &TokenPair,
        updated_at: DateTime<Utc>,
    ) -> UserResult<()> {
        let mut users = self.users.write().await;

        match users.values_mut().find(|u| u.user_id == user_id) {
            Some(user) => {
                user.token = tokens.token.clone();
                user.refresh_token = tokens.refresh_token.clone();
                user.updated_at = updated_at;
                Ok(())
            }
            None => {
                tracing::warn!(user_id, "Token update matched no user");
                Err(UserError::Database(format!(
                    "no user with user_id {user_id} to store tokens on"
                )))
            }
        }
    }
}
