//! BIP-32 hierarchical deterministic key derivation for Ethereum.
//!
//! Delegates the HMAC-SHA512 and scalar arithmetic to the `bip32` crate and
//! implements `quill::ExtendedPrivateKey` on top of it.

use core::fmt;

use bip32::{ChildNumber, XPrv};
use quill::{ChildIndex, Error, Result};

use crate::private_key::EthPrivateKey;

/// BIP-32 extended private key for Ethereum.
#[derive(Clone)]
pub struct EthExtendedPrivateKey {
    inner: XPrv,
}

impl quill::ExtendedPrivateKey for EthExtendedPrivateKey {
    type PrivateKey = EthPrivateKey;

    /// Master key from a 16, 32 or 64 byte seed.
    fn from_seed(seed: &[u8]) -> Result<Self> {
        let inner = XPrv::new(seed)
            .map_err(|e| Error::Derivation(format!("invalid seed ({} bytes): {e}", seed.len())))?;
        Ok(Self { inner })
    }

    fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        let child_number = ChildNumber::new(index.index(), index.is_hardened())
            .map_err(|e| Error::Derivation(format!("child {index}: {e}")))?;
        let inner = self
            .inner
            .derive_child(child_number)
            .map_err(|e| Error::Derivation(format!("child {index}: {e}")))?;
        Ok(Self { inner })
    }

    fn private_key(&self) -> Self::PrivateKey {
        EthPrivateKey::from_signing_key(self.inner.private_key().clone())
    }

    fn depth(&self) -> u8 {
        self.inner.attrs().depth
    }
}

impl fmt::Debug for EthExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthExtendedPrivateKey")
            .field("depth", &self.inner.attrs().depth)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
