//! One-way password digests.

use sha2::{Digest, Sha256};

/// Hashes passwords for storage and later comparison.
///
/// # Known weakness
///
/// This is a single unsalted SHA-256 pass, the same primitive used for media
/// content tags. Identical passwords produce identical digests and the hash
/// is cheap to brute-force. Callers needing real credential storage should
/// use a salted, memory-hard KDF instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Digest `plaintext` as lowercase hex.
    ///
    /// # Examples
    ///
    /// ```
    /// use locker_security::CredentialHasher;
    ///
    /// assert_eq!(
    ///     CredentialHasher::hash("password"),
    ///     "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
    /// );
    /// ```
    pub fn hash(plaintext: &str) -> String {
        format!("{:x}", Sha256::digest(plaintext.as_bytes()))
    }

    /// Whether `plaintext` hashes to `stored`. Hex case is ignored.
    #[tracing::instrument(skip_all)]
    pub fn verify(plaintext: &str, stored: &str) -> bool {
        let matches = Self::hash(plaintext).eq_ignore_ascii_case(stored.trim());
        tracing::debug!(matches, "Verified credential");
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(CredentialHasher::hash("hunter2"), CredentialHasher::hash("hunter2"));
        assert_ne!(CredentialHasher::hash("hunter2"), CredentialHasher::hash("hunter3"));
        assert_eq!(CredentialHasher::hash("").len(), 64);
    }

    #[test]
    fn test_verify_ignores_hex_case() {
        let stored = CredentialHasher::hash("Secret#1").to_uppercase();
        assert!(CredentialHasher::verify("Secret#1", &stored));
        assert!(!CredentialHasher::verify("secret#1", &stored));
    }
}
