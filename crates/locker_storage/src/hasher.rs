//! Content digests.

use sha2::{Digest, Sha256};

/// SHA-256 content hasher.
///
/// The digest doubles as an integrity and deduplication tag, so it must stay
/// stable across releases: lowercase hex, no prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHasher;

impl ContentHasher {
    /// Compute the SHA-256 digest of `bytes` as lowercase hex.
    ///
    /// # Examples
    ///
    /// ```
    /// use locker_storage::ContentHasher;
    ///
    /// assert_eq!(
    ///     ContentHasher::digest(b"abc"),
    ///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    /// );
    /// ```
    pub fn digest(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    /// Normalize a user-supplied hash tag to the stored form.
    ///
    /// Strips a leading `#` and surrounding whitespace, lowercases hex digits.
    pub fn normalize(tag: &str) -> String {
        tag.trim().trim_start_matches('#').to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let data = b"the same bytes";
        assert_eq!(ContentHasher::digest(data), ContentHasher::digest(data));
        assert_eq!(ContentHasher::digest(data).len(), 64);
    }

    #[test]
    fn test_single_bit_flip_changes_digest() {
        let original = vec![0b1010_1010u8; 128];
        let mut flipped = original.clone();
        flipped[64] ^= 0b0000_0001;

        assert_ne!(
            ContentHasher::digest(&original),
            ContentHasher::digest(&flipped)
        );
    }

    #[test]
    fn test_empty_input_digest() {
        assert_eq!(
            ContentHasher::digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_normalize_strips_tag_prefix() {
        assert_eq!(ContentHasher::normalize("#ABCdef"), "abcdef");
        assert_eq!(ContentHasher::normalize("  abcdef "), "abcdef");
    }
}
