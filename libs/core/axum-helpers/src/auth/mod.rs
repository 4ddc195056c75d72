//! Stateless JWT issuance and verification.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, TokenIssuer, TokenSubject};
//! use core_config::FromEnv;
//!
//! let issuer = TokenIssuer::new(&JwtConfig::from_env()?);
//! let pair = issuer.issue(TokenSubject { user_id, email, first_name, last_name })?;
//! ```

pub mod config;
pub mod jwt;

pub use config::JwtConfig;
pub use jwt::{JwtClaims, TokenIssuer, TokenPair, TokenSubject};
