use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("pw123").expect("hashing should succeed");
        assert!(verify_password("pw123", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("pw123").expect("hashing should succeed");
        assert!(!verify_password("pw124", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("pw123", "not-a-bcrypt-hash"));
    }
}
