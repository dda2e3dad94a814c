//! Deterministic job identity.
//!
//! The id is the first 128 bits of SHA-256 over the normalized submission
//! text, hex encoded. Identical sequences therefore map to the same job and
//! the same directory; resubmitting reuses it.

use afold_commons::JobId;
use sha2::{Digest, Sha256};

/// Newline-normalizes a raw submission.
///
/// `\r\n` and lone `\r` become `\n`, surrounding whitespace is trimmed and
/// exactly one trailing newline is appended.
pub fn normalize_submission(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut normalized = unified.trim().to_string();
    normalized.push('\n');
    normalized
}

/// Digest of already-normalized submission text.
pub fn job_id_for(normalized: &str) -> JobId {
    let digest = Sha256::digest(normalized.as_bytes());
    let mut head = [0u8; 16];
    head.copy_from_slice(&digest[..16]);
    JobId::from_digest(&head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_id() {
        let a = job_id_for(">seq1\nMKV\n");
        let b = job_id_for(">seq1\nMKV\n");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_one_byte_difference_changes_id() {
        let base = job_id_for(">seq1\nMKV\n");
        for other in [">seq1\nMKW\n", ">seq2\nMKV\n", ">seq1\nMKV\n\n", ">seq1\nmKV\n"] {
            assert_ne!(base, job_id_for(other), "collision with {:?}", other);
        }
    }

    #[test]
    fn test_known_digest() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
        assert_eq!(job_id_for("").as_str(), "e3b0c44298fc1c149afbf4c8996fb924");
    }

    #[test]
    fn test_normalization_variants_share_an_id() {
        let canonical = normalize_submission(">seq1\nMKV\n");
        assert_eq!(canonical, ">seq1\nMKV\n");
        for variant in [">seq1\nMKV", ">seq1\r\nMKV\r\n", "  >seq1\nMKV\n\n", ">seq1\rMKV"] {
            assert_eq!(normalize_submission(variant), canonical);
            assert_eq!(job_id_for(&normalize_submission(variant)), job_id_for(&canonical));
        }
    }
}
