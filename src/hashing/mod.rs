//! Salted password hashing for teacher accounts.
//!
//! Each password is hashed with a BLAKE3 key derived from a per-account random
//! salt. Verification compares [`blake3::Hash`] values, whose equality is
//! constant-time.

/// Domain-separation context for the salt -> key derivation.
const PASSWORD_CONTEXT: &str = "answer-grader 2026-10 teacher password v1";

/// Returns a fresh random salt (32 hex chars).
pub fn generate_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[inline]
pub fn hash_password(password: &str, salt: &str) -> blake3::Hash {
    let key = blake3::derive_key(PASSWORD_CONTEXT, salt.as_bytes());
    blake3::keyed_hash(&key, password.as_bytes())
}

/// Checks `password` against a stored hex hash. Malformed stored hashes never verify.
pub fn verify_password(password: &str, salt: &str, expected_hex: &str) -> bool {
    match blake3::Hash::from_hex(expected_hex) {
        Ok(expected) => hash_password(password, salt) == expected,
        Err(_) => false,
    }
}
