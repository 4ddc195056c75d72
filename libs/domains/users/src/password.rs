//! Argon2id password hashing

use argon2::{
    Argon2,
    password_hash::{
        Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::error::{UserError, UserResult};

/// Hash `password` with a random salt, returning a PHC string.
pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Check `password` against a stored PHC hash.
///
/// A mismatch is [`UserError::InvalidCredentials`]; an unparsable stored hash
/// is a server-side failure.
pub fn verify_password(password: &str, hash: &str) -> UserResult<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(()),
        Err(HashError::Password) => Err(UserError::InvalidCredentials),
        Err(e) => Err(UserError::PasswordHash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret1", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_is_invalid_credentials() {
        let hash = hash_password("secret1").unwrap();
        assert!(matches!(
            verify_password("secret2", &hash),
            Err(UserError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        assert_ne!(
            hash_password("secret1").unwrap(),
            hash_password("secret1").unwrap()
        );
    }

    #[test]
    fn test_corrupt_hash_is_server_error() {
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(UserError::PasswordHash(_))
        ));
    }
}
