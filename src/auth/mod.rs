use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash a password with a fresh random salt. Stored form is `salt$hexdigest`.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest(&salt, password))
}

/// Check a candidate password against a stored `salt$hexdigest` value
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, hash)) => digest(salt, password) == hash,
        None => false,
    }
}

/// Issue an opaque session token. Resolved against the user row, so logout
/// invalidates it by clearing the column.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_matching_password() {
        let stored = hash_password("secret");
        assert!(verify_password("secret", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn hashing_is_salted() {
        // Same password, different salt, different stored value
        assert_ne!(hash_password("secret"), hash_password("secret"));
    }

    #[test]
    fn verify_rejects_malformed_stored_values() {
        assert!(!verify_password("secret", "no-separator"));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
