//! One-way password hashing. bcrypt salts every hash, so equal
//! plaintexts produce distinct digests and comparison must go through
//! [`verify`].

use bcrypt::BcryptError;

/// Hash a plaintext password with a per-record random salt.
pub fn hash(plaintext: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, cost)
}

/// Check a plaintext password against a stored hash.
pub fn verify(plaintext: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // MIN_COST keeps the test suite fast; production cost comes from config
    const COST: u32 = bcrypt::MIN_COST;

    #[test]
    fn hash_differs_from_plaintext() {
        let hashed = hash("hunter2", COST).unwrap();
        assert_ne!(hashed, "hunter2");
    }

    #[test]
    fn verify_accepts_correct_password() {
        let hashed = hash("hunter2", COST).unwrap();
        assert!(verify("hunter2", &hashed).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hashed = hash("hunter2", COST).unwrap();
        assert!(!verify("hunter3", &hashed).unwrap());
    }

    #[test]
    fn salting_makes_hashes_unique() {
        let a = hash("hunter2", COST).unwrap();
        let b = hash("hunter2", COST).unwrap();
        assert_ne!(a, b);
    }
}
