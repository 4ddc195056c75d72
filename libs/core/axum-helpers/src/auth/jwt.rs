use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by both access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String, // Unique per token, so re-issuing in the same second still rotates
}

/// Identity the tokens are issued for
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// An access token and its companion refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Stateless HS256 token signer/verifier
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            access_ttl_secs = config.access_ttl_secs,
            refresh_ttl_secs = config.refresh_ttl_secs,
            "JWT token issuer initialized"
        );
        Self {
            secret: config.secret.clone(),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    /// Issue a fresh access + refresh pair for `subject`.
    pub fn issue(&self, subject: TokenSubject<'_>) -> eyre::Result<TokenPair> {
        Ok(TokenPair {
            token: self.create_access_token(subject)?,
            refresh_token: self.create_refresh_token(subject)?,
        })
    }

    pub fn create_access_token(&self, subject: TokenSubject<'_>) -> eyre::Result<String> {
        self.create_token(subject, self.access_ttl_secs)
    }

    pub fn create_refresh_token(&self, subject: TokenSubject<'_>) -> eyre::Result<String> {
        self.create_token(subject, self.refresh_ttl_secs)
    }

    fn create_token(&self, subject: TokenSubject<'_>, ttl_seconds: i64) -> eyre::Result<String> {
        let now = Utc::now();

        let claims = JwtClaims {
            sub: subject.user_id.to_string(),
            email: subject.email.to_string(),
            first_name: subject.first_name.to_string(),
            last_name: subject.last_name.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify the signature and expiry, returning the decoded claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&JwtConfig::new("test-secret-key-that-is-long-enough-123"))
    }

    fn subject() -> TokenSubject<'static> {
        TokenSubject {
            user_id: "0191c3a2-7d2e-7000-8000-000000000001",
            email: "a@b.com",
            first_name: "Jo",
            last_name: "Doe",
        }
    }

    #[test]
    fn test_issue_and_verify_claims() {
        let issuer = issuer();
        let pair = issuer.issue(subject()).unwrap();
        assert!(!pair.token.is_empty());
        assert!(!pair.refresh_token.is_empty());

        let claims = issuer.verify_token(&pair.token).unwrap();
        assert_eq!(claims.sub, subject().user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.first_name, "Jo");
        assert_eq!(claims.last_name, "Doe");
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let issuer = issuer();
        let pair = issuer.issue(subject()).unwrap();

        let access = issuer.verify_token(&pair.token).unwrap();
        let refresh = issuer.verify_token(&pair.refresh_token).unwrap();
        assert_eq!(access.exp - access.iat, 86_400);
        assert_eq!(refresh.exp - refresh.iat, 604_800);
    }

    #[test]
    fn test_reissue_rotates_tokens() {
        let issuer = issuer();
        let first = issuer.issue(subject()).unwrap();
        let second = issuer.issue(subject()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let pair = issuer().issue(subject()).unwrap();
        let other = TokenIssuer::new(&JwtConfig::new("another-secret-key-that-is-long-enough"));
        assert!(other.verify_token(&pair.token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let expired =
            TokenIssuer::new(&JwtConfig::new("test-secret-key-that-is-long-enough-123").with_ttls(-3600, -3600));
        let pair = expired.issue(subject()).unwrap();
        assert!(issuer().verify_token(&pair.token).is_err());
    }
}
