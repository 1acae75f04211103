//! Ethereum private key implementation.
//!
//! Wraps `k256::ecdsa::SigningKey`, which zeroizes its scalar on drop.
//! Signing uses RFC 6979 nonces, so the same key and hash always produce
//! the same signature.

use core::fmt;
use core::str::FromStr;

use k256::ecdsa::SigningKey;
use quill::{Error, Result, Signature};
use zeroize::Zeroizing;

use crate::address::EthAddress;
use crate::public_key::EthPublicKey;

/// Ethereum private key based on secp256k1.
#[derive(Clone)]
pub struct EthPrivateKey {
    inner: SigningKey,
}

impl EthPrivateKey {
    /// Length of a private key in bytes.
    pub const LEN: usize = 32;

    /// Wrap an existing signing key.
    pub(crate) fn from_signing_key(inner: SigningKey) -> Self {
        Self { inner }
    }

    /// Import from hex (optional `0x`, either case).
    ///
    /// Malformed hex is a decoding error; the input is never padded or
    /// truncated to fit.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = Zeroizing::new(quill::decode_hex(hex_str)?);
        quill::PrivateKey::from_bytes(&bytes)
    }

    /// Export as lowercase hex without prefix, wiped when dropped.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.inner.to_bytes()))
    }

    /// Get the corresponding address.
    pub fn address(&self) -> EthAddress {
        EthAddress::from_public_key(&quill::PrivateKey::public_key(self))
    }
}

impl quill::PrivateKey for EthPrivateKey {
    type PublicKey = EthPublicKey;

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(Error::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let inner = SigningKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { inner })
    }

    fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    fn public_key(&self) -> Self::PublicKey {
        EthPublicKey::from_verifying_key(self.inner.verifying_key().clone())
    }

    fn sign_prehash(&self, hash: &[u8; 32]) -> Result<Signature> {
        let (sig, recid) = self
            .inner
            .sign_prehash_recoverable(hash)
            .map_err(|_| Error::Signing)?;

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Signature::new(r, s, recid.to_byte()))
    }
}

impl fmt::Debug for EthPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthPrivateKey([REDACTED])")
    }
}

impl FromStr for EthPrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
