//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use axum_helpers::TokenPair;
use chrono::{DateTime, Utc};
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB-backed user store over the `users` collection
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// ```ignore
    /// let client = database::mongodb::connect_from_config(&config).await?;
    /// let repo = MongoUserRepository::new(client.database("ecommerce"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Create unique indexes on `email`, `phone` and `user_id`.
    ///
    /// Concurrent signups that both pass the count checks fail on insert.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let unique = |field: &str| {
            let mut keys = Document::new();
            keys.insert(field, 1);

            IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(format!("{field}_unique"))
                        .build(),
                )
                .build()
        };

        self.collection
            .create_indexes([unique("email"), unique("phone"), unique("user_id")])
            .await?;

        tracing::info!("User indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn count_by_email(&self, email: &str) -> UserResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "email": email })
            .await?)
    }

    #[instrument(skip(self))]
    async fn count_by_phone(&self, phone: &str) -> UserResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "phone": phone })
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    async fn insert(&self, user: &User) -> UserResult<()> {
        self.collection.insert_one(user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(())
    }

    #[instrument(skip(self, tokens))]
    async fn update_tokens(
        &self,
        user_id: &str,
        tokens: &TokenPair,
        updated_at: DateTime<Utc>,
    ) -> UserResult<()> {
        let update = doc! {
            "$set": {
                "token": tokens.token.as_str(),
                "refresh_token": tokens.refresh_token.as_str(),
                "updated_at": to_bson(&updated_at)?,
            }
        };

        let result = self
            .collection
            .update_one(doc! { "user_id": user_id }, update)
            .await?;

        if result.matched_count == 0 {
            tracing::warn!(user_id, "Token update matched no user");
            return Err(UserError::Database(format!(
                "no user with user_id {user_id} to store tokens on"
            )));
        }

        Ok(())
    }
}
