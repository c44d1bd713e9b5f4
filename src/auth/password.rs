use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;
use tracing::{error, warn};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Internal hashing failure. Never stands in for an empty hash.
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("password must be at least 8 characters long")]
    TooShort,
}

pub fn hash_password(plain: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            HashError(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Mismatch and malformed stored hash both come back as `false`; callers
/// cannot tell which happened.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

pub fn validate_password_strength(plain: &str) -> Result<(), PolicyError> {
    if plain.len() < MIN_PASSWORD_LEN {
        return Err(PolicyError::TooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!hash.is_empty());
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn verify_returns_false_on_malformed_hash() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
    }

    #[test]
    fn hashes_are_salted() {
        let hash_a = hash_password("secret123").expect("hash a");
        let hash_b = hash_password("secret123").expect("hash b");
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn strength_rejects_short_passwords() {
        assert_eq!(
            validate_password_strength("short"),
            Err(PolicyError::TooShort)
        );
        assert_eq!(validate_password_strength("1234567"), Err(PolicyError::TooShort));
    }

    #[test]
    fn strength_accepts_eight_or_more() {
        assert!(validate_password_strength("12345678").is_ok());
        assert!(validate_password_strength("secret123").is_ok());
    }
}
