use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_parse_or, server::ServerConfig};
use database::mongodb::MongoConfig;
use std::time::Duration;

pub use core_config::Environment;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 100;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Upper bound for each request's database work
    pub request_timeout: Duration,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;

        let timeout_secs = env_parse_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            eyre::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            jwt,
            request_timeout: Duration::from_secs(timeout_secs),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "an-adequately-long-signing-secret-value";

    fn vars_with(
        key: &'static str,
        value: Option<&'static str>,
    ) -> Vec<(&'static str, Option<&'static str>)> {
        let mut vars = base_vars();
        for entry in vars.iter_mut().filter(|(k, _)| *k == key) {
            entry.1 = value;
        }
        vars
    }

    fn base_vars() -> Vec<(&'static str, Option<&'static str>)> {
        vec![
            ("MONGODB_URL", Some("mongodb://localhost:27017")),
            ("MONGODB_DATABASE", Some("shop")),
            ("JWT_SECRET", Some(SECRET)),
            ("REQUEST_TIMEOUT_SECS", None),
            ("PORT", None),
            ("APP_ENV", None),
        ]
    }

    #[test]
    fn test_from_env_with_defaults() {
        temp_env::with_vars(base_vars(), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "shop-api");
            assert_eq!(config.mongodb.database(), "shop");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.request_timeout, Duration::from_secs(100));
            assert_eq!(config.jwt.access_ttl_secs, 86_400);
            assert_eq!(config.environment, Environment::Development);
        });
    }

    #[test]
    fn test_request_timeout_override() {
        temp_env::with_vars(vars_with("REQUEST_TIMEOUT_SECS", Some("5")), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.request_timeout, Duration::from_secs(5));
        });
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        temp_env::with_vars(vars_with("REQUEST_TIMEOUT_SECS", Some("0")), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        temp_env::with_vars(vars_with("JWT_SECRET", None), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }
}
