//! User Service - signup and login

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, NewUser, SignupRequest, User, UserResponse};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;
use crate::tokens::TokenService;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    tokens: TokenService<R>,
    request_timeout: Duration,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            tokens: self.tokens.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>, tokens: TokenService<R>) -> Self {
        Self {
            repository,
            tokens,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bound every repository sequence by `timeout`
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Register a new user.
    ///
    /// Gates, in order: field validation, unused email, unused phone. Nothing
    /// is written unless all pass.
    #[instrument(skip(self, input))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<User> {
        self.within(self.register(input)).await
    }

    /// Verify credentials, rotate the token pair and return the user.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<UserResponse> {
        self.within(self.authenticate(input)).await
    }

    async fn register(&self, input: SignupRequest) -> UserResult<User> {
        let input = NewUser::try_from(input)?;

        if self.repository.count_by_email(&input.email).await? > 0 {
            return Err(UserError::DuplicateEmail);
        }

        if self.repository.count_by_phone(&input.phone).await? > 0 {
            return Err(UserError::DuplicatePhone);
        }

        let password_hash = hash_password(&input.password)?;

        let id = Uuid::now_v7();
        let tokens = self.tokens.generate(
            &id.to_string(),
            &input.email,
            &input.first_name,
            &input.last_name,
        )?;

        let user = User::new(input, password_hash, id, tokens);

        self.repository
            .insert(&user)
            .await
            .map_err(|e| UserError::NotCreated(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    async fn authenticate(&self, input: LoginRequest) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        verify_password(&input.password, &user.password)?;

        let tokens = self.tokens.generate(
            &user.user_id,
            &user.email,
            &user.first_name,
            &user.last_name,
        )?;
        let updated_at = self.tokens.update_all_tokens(&user.user_id, &tokens).await?;

        user.token = tokens.token;
        user.refresh_token = tokens.refresh_token;
        user.updated_at = updated_at;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user.into())
    }

    async fn within<T>(&self, operation: impl Future<Output = UserResult<T>>) -> UserResult<T> {
        tokio::time::timeout(self.request_timeout, operation)
            .await
            .map_err(|_| UserError::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum_helpers::{JwtConfig, TokenIssuer};

    fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
        let repo = Arc::new(repo);
        let issuer = TokenIssuer::new(&JwtConfig::new("test-secret-key-that-is-long-enough-123"));
        UserService::new(repo.clone(), TokenService::new(issuer, repo))
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            first_name: Some("Jo".into()),
            last_name: Some("Doe".into()),
            password: Some("secret1".into()),
            email: Some("a@b.com".into()),
            phone: Some("555".into()),
        }
    }

    fn stored_user(password: &str) -> User {
        let id = Uuid::now_v7();
        User::new(
            NewUser::try_from(SignupRequest {
                password: Some(password.into()),
                ..signup_request()
            })
            .unwrap(),
            hash_password(password).unwrap(),
            id,
            axum_helpers::TokenPair {
                token: "old-access".into(),
                refresh_token: "old-refresh".into(),
            },
        )
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_count_by_email().returning(|_| Ok(0));
        repo.expect_count_by_phone().returning(|_| Ok(0));
        repo.expect_insert()
            .withf(|user| user.email == "a@b.com" && user.password.starts_with("$argon2"))
            .times(1)
            .returning(|_| Ok(()));

        let user = service(repo).signup(signup_request()).await.unwrap();
        assert_eq!(user.user_id, user.id.to_string());
        assert!(!user.token.is_empty());
        assert!(!user.refresh_token.is_empty());
        assert_ne!(user.token, user.refresh_token);
    }

    #[tokio::test]
    async fn test_signup_invalid_body_touches_nothing() {
        let repo = MockUserRepository::new();

        let result = service(repo)
            .signup(SignupRequest {
                email: Some("nope".into()),
                ..signup_request()
            })
            .await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_stops_before_phone_check() {
        let mut repo = MockUserRepository::new();
        repo.expect_count_by_email().returning(|_| Ok(1));
        repo.expect_count_by_phone().never();
        repo.expect_insert().never();

        let result = service(repo).signup(signup_request()).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_signup_duplicate_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_count_by_email().returning(|_| Ok(0));
        repo.expect_count_by_phone().returning(|_| Ok(1));
        repo.expect_insert().never();

        let result = service(repo).signup(signup_request()).await;
        assert!(matches!(result, Err(UserError::DuplicatePhone)));
    }

    #[tokio::test]
    async fn test_signup_insert_failure_is_not_created() {
        let mut repo = MockUserRepository::new();
        repo.expect_count_by_email().returning(|_| Ok(0));
        repo.expect_count_by_phone().returning(|_| Ok(0));
        repo.expect_insert()
            .returning(|_| Err(UserError::Database("E11000 duplicate key".into())));

        let result = service(repo).signup(signup_request()).await;
        assert!(matches!(result, Err(UserError::NotCreated(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update_tokens().never();

        let result = service(repo)
            .login(LoginRequest {
                email: "x@b.com".into(),
                password: "secret1".into(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_does_not_rotate() {
        let user = stored_user("secret1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update_tokens().never();

        let err = service(repo)
            .login(LoginRequest {
                email: "a@b.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "login or password incorrect");
    }

    #[tokio::test]
    async fn test_login_rotates_tokens() {
        let user = stored_user("secret1");
        let user_id = user.user_id.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update_tokens()
            .withf(move |id, tokens, _| {
                id.to_string() == user_id && tokens.token != "old-access"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let response = service(repo)
            .login(LoginRequest {
                email: "a@b.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_ne!(response.token, "old-access");
        assert_ne!(response.refresh_token, "old-refresh");
    }

    #[tokio::test]
    async fn test_login_fails_when_tokens_are_not_stored() {
        let user = stored_user("secret1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update_tokens()
            .times(1)
            .returning(|_, _, _| Err(UserError::Database("no user with user_id".into())));

        let result = service(repo)
            .login(LoginRequest {
                email: "a@b.com".into(),
                password: "secret1".into(),
            })
            .await;
        assert!(matches!(result, Err(UserError::Database(_))));
    }

    struct StalledRepository;

    #[async_trait::async_trait]
    impl UserRepository for StalledRepository {
        async fn count_by_email(&self, _: &str) -> UserResult<u64> {
            std::future::pending().await
        }
        async fn count_by_phone(&self, _: &str) -> UserResult<u64> {
            std::future::pending().await
        }
        async fn find_by_email(&self, _: &str) -> UserResult<Option<User>> {
            std::future::pending().await
        }
        async fn insert(&self, _: &User) -> UserResult<()> {
            std::future::pending().await
        }
        async fn update_tokens(
            &self,
            _: &str,
            _: &axum_helpers::TokenPair,
            _: chrono::DateTime<chrono::Utc>,
        ) -> UserResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_store_times_out() {
        let repo = Arc::new(StalledRepository);
        let issuer = TokenIssuer::new(&JwtConfig::new("test-secret-key-that-is-long-enough-123"));
        let service = UserService::new(repo.clone(), TokenService::new(issuer, repo))
            .with_request_timeout(Duration::from_millis(20));

        let result = service.signup(signup_request()).await;
        assert!(matches!(result, Err(UserError::Timeout)));
    }
}
