//! Token issuance and persistence for users

use axum_helpers::{TokenIssuer, TokenPair, TokenSubject};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::now_seconds;
use crate::repository::UserRepository;

/// Issues access/refresh pairs and writes rotated pairs back to the user record
pub struct TokenService<R: UserRepository> {
    issuer: TokenIssuer,
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for TokenService<R> {
    fn clone(&self) -> Self {
        Self {
            issuer: self.issuer.clone(),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> TokenService<R> {
    pub fn new(issuer: TokenIssuer, repository: Arc<R>) -> Self {
        Self { issuer, repository }
    }

    /// Sign a new pair carrying the user's id, email and names as claims
    pub fn generate(
        &self,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> UserResult<TokenPair> {
        self.issuer
            .issue(TokenSubject {
                user_id,
                email,
                first_name,
                last_name,
            })
            .map_err(|e| UserError::Token(e.to_string()))
    }

    /// Store `tokens` on the user keyed by `user_id`, returning the new `updated_at`
    #[instrument(skip(self, tokens))]
    pub async fn update_all_tokens(
        &self,
        user_id: &str,
        tokens: &TokenPair,
    ) -> UserResult<DateTime<Utc>> {
        let updated_at = now_seconds();
        self.repository
            .update_tokens(user_id, tokens, updated_at)
            .await?;

        tracing::debug!(user_id, "Tokens rotated");
        Ok(updated_at)
    }
}
