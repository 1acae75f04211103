//! Provider traits the wallet composes.
//!
//! Each trait is a fixed contract for an external collaborator: HD
//! derivation, raw-key signing and address encoding. Chain crates implement
//! them on top of audited curve and hash libraries.

use core::fmt::{self, Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::hdpath::{ChildIndex, DerivationPath};

/// Offset added to the recovery id of legacy and personal-sign signatures.
pub const LEGACY_V_OFFSET: u8 = 27;

/// A private key that can sign prehashed data and derive its public key.
///
/// # Thread Safety
/// This trait requires `Send + Sync` so a wallet can be shared across threads.
pub trait PrivateKey: Clone + Debug + Sized + Send + Sync {
    /// The associated public key type
    type PublicKey: PublicKey;

    /// Create from raw 32-byte scalar
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Serialize to raw bytes
    fn to_bytes(&self) -> [u8; 32];

    /// Derive the corresponding public key
    fn public_key(&self) -> Self::PublicKey;

    /// Sign a 32-byte hash, returning `v` as the raw recovery id (0 or 1)
    fn sign_prehash(&self, hash: &[u8; 32]) -> Result<Signature>;
}

/// A public key that can verify signatures and derive addresses.
pub trait PublicKey: Clone + Debug + PartialEq + Eq + Sized + Send + Sync {
    /// The associated address type
    type Address: Address;

    /// Create from SEC1 bytes (compressed or uncompressed)
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Serialize to compressed bytes
    fn to_bytes(&self) -> [u8; 33];

    /// Serialize to uncompressed bytes (65 bytes with 0x04 prefix)
    fn to_uncompressed_bytes(&self) -> [u8; 65];

    /// Derive the address
    fn to_address(&self) -> Self::Address;

    /// Verify a signature over a 32-byte hash
    fn verify(&self, hash: &[u8; 32], signature: &Signature) -> Result<()>;
}

/// A chain address.
pub trait Address: Clone + Debug + Display + PartialEq + Eq + Hash + Sized + Send + Sync {
    /// Get the raw bytes of the address
    fn as_bytes(&self) -> &[u8];
}

/// Extended private key for hierarchical deterministic derivation (BIP-32).
pub trait ExtendedPrivateKey: Clone + Sized + Send + Sync {
    /// The associated private key type
    type PrivateKey: PrivateKey;

    /// Create master key from seed
    fn from_seed(seed: &[u8]) -> Result<Self>;

    /// Derive the child at `index`, hardened or normal
    fn derive_child(&self, index: ChildIndex) -> Result<Self>;

    /// Derive along every step of `path`
    fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, index| key.derive_child(*index))
    }

    /// Get the underlying private key
    fn private_key(&self) -> Self::PrivateKey;

    /// Get the depth in the derivation tree
    fn depth(&self) -> u8;
}

/// An ECDSA signature with recovery byte, laid out as r ‖ s ‖ v.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    /// The r component (32 bytes)
    pub r: [u8; 32],
    /// The s component (32 bytes)
    pub s: [u8; 32],
    /// The recovery byte: 0/1 raw, or 27/28 with the legacy offset
    pub v: u8,
}

impl Signature {
    /// Length of the serialized r ‖ s ‖ v form.
    pub const LEN: usize = 65;

    /// Create a new signature from components
    pub const fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// Parse the 65-byte r ‖ s ‖ v form.
    pub fn from_rsv(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(Error::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Serialize to 64-byte RS format
    pub fn to_rs(&self) -> [u8; 64] {
        let mut result = [0u8; 64];
        result[..32].copy_from_slice(&self.r);
        result[32..].copy_from_slice(&self.s);
        result
    }

    /// Serialize to 65-byte RSV format
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut result = [0u8; 65];
        result[..32].copy_from_slice(&self.r);
        result[32..64].copy_from_slice(&self.s);
        result[64] = self.v;
        result
    }

    /// Copy with the legacy offset applied, so `v` is 27 or 28.
    ///
    /// A signature that already carries the offset is returned unchanged.
    pub fn with_legacy_v(self) -> Self {
        Self {
            v: self.recovery_id() + LEGACY_V_OFFSET,
            ..self
        }
    }

    /// The raw recovery id (0 or 1) regardless of the offset carried in `v`.
    pub const fn recovery_id(&self) -> u8 {
        if self.v >= LEGACY_V_OFFSET {
            self.v - LEGACY_V_OFFSET
        } else {
            self.v
        }
    }

    /// Lowercase hex of the RSV form with a leading `0x`.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_rsv()))
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &hex::encode(self.r))
            .field("s", &hex::encode(self.s))
            .field("v", &self.v)
            .finish()
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_rsv(&crate::encoding::decode_hex(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Signature {
        Signature::new([0x11; 32], [0x22; 32], 1)
    }

    #[test]
    fn test_rsv_layout() {
        let rsv = sample().to_rsv();
        assert_eq!(&rsv[..32], &[0x11; 32]);
        assert_eq!(&rsv[32..64], &[0x22; 32]);
        assert_eq!(rsv[64], 1);
        assert_eq!(Signature::from_rsv(&rsv).unwrap(), sample());
    }

    #[test]
    fn test_legacy_offset() {
        let sig = sample().with_legacy_v();
        assert_eq!(sig.v, 28);
        assert_eq!(sig.recovery_id(), 1);
        // applying twice is a no-op
        assert_eq!(sig.with_legacy_v().v, 28);
    }

    #[test]
    fn test_hex_parse() {
        let sig = sample().with_legacy_v();
        let hex = sig.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 2 + 130);
        assert_eq!(hex.parse::<Signature>().unwrap(), sig);
        assert_eq!(hex.replacen("0x", "0X", 1).parse::<Signature>().unwrap(), sig);
        assert_eq!(hex[2..].parse::<Signature>().unwrap(), sig);
    }

    #[test]
    fn test_parse_wrong_length() {
        let err = "0xdeadbeef".parse::<Signature>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLength {
                expected: 65,
                actual: 4
            }
        );
    }
}
