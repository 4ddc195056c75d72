//! Token signing configuration, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 86_400; // 24 hours
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 604_800; // 7 days

/// JWT signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `ACCESS_TOKEN_TTL_SECS` (default: 86400)
/// - `REFRESH_TOKEN_TTL_SECS` (default: 604800)
///
/// ```ignore
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret (minimum 32 characters)
    pub secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            access_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttls(mut self, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        self.access_ttl_secs = access_ttl_secs;
        self.refresh_ttl_secs = refresh_ttl_secs;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let access_ttl_secs = env_parse_or("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        let refresh_ttl_secs =
            env_parse_or("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?;

        for (key, value) in [
            ("ACCESS_TOKEN_TTL_SECS", access_ttl_secs),
            ("REFRESH_TOKEN_TTL_SECS", refresh_ttl_secs),
        ] {
            if value <= 0 {
                return Err(ConfigError::ParseError {
                    key: key.to_string(),
                    details: "must be a positive number of seconds".to_string(),
                });
            }
        }

        Ok(Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }
}
