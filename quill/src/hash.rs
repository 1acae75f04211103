//! Hash primitives used when signing.

use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash.
///
/// This is the pre-standard Keccak padding used by Ethereum, not NIST
/// SHA3-256. The two produce different digests for the same input.
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Keccak-256 over several chunks without concatenating them first.
pub fn keccak256_concat(chunks: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod keccak256_tests {
        use super::*;

        #[test]
        fn test_keccak256_hello() {
            let hash = keccak256(b"hello");
            assert_eq!(
                hex::encode(hash),
                "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
            );
        }

        #[test]
        fn test_keccak256_empty() {
            let hash = keccak256(b"");
            assert_eq!(
                hex::encode(hash),
                "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            );
        }

        #[test]
        fn test_not_nist_sha3() {
            // NIST SHA3-256("hello")
            let sha3 = hex_literal::hex!(
                "3338be694f50c5f338814986cdf0686453a888b84f424d792af4b9202398f392"
            );
            assert_ne!(keccak256(b"hello"), sha3);
        }

        #[test]
        fn test_concat_matches_single() {
            let joined = keccak256(b"hello world");
            let chunked = keccak256_concat(&[b"hello".as_slice(), b" ".as_slice(), b"world".as_slice()]);
            assert_eq!(joined, chunked);
        }
    }
}
