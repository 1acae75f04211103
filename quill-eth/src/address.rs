//! Ethereum address with EIP-55 checksum encoding.
//!
//! Uses `alloy_primitives::Address` as the underlying implementation.

use core::fmt;
use core::str::FromStr;

use alloy_primitives::Address as AlloyAddress;
use quill::{Error, Result};

use crate::public_key::EthPublicKey;

/// Ethereum address (20 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EthAddress(AlloyAddress);

impl EthAddress {
    /// Length of an address in bytes.
    pub const LEN: usize = 20;

    /// Create from raw 20-byte address.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(AlloyAddress::new(bytes))
    }

    /// Create from a public key: last 20 bytes of Keccak-256(x ‖ y).
    pub fn from_public_key(public_key: &EthPublicKey) -> Self {
        Self(AlloyAddress::from_raw_public_key(&public_key.to_raw_bytes()))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0.0.0
    }

    /// Convert to EIP-55 checksummed string.
    pub fn to_checksum_string(&self) -> String {
        self.0.to_checksum(None)
    }

    /// Get the inner alloy Address.
    pub const fn inner(&self) -> &AlloyAddress {
        &self.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum_string())
    }
}

/// Parses hex with or without `0x`. The checksum is not enforced, so
/// lowercase input is accepted.
impl FromStr for EthAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = quill::decode_hex(s)?;
        let bytes: [u8; 20] = bytes.as_slice().try_into().map_err(|_| Error::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl quill::Address for EthAddress {
    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl AsRef<[u8]> for EthAddress {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<[u8; 20]> for EthAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<AlloyAddress> for EthAddress {
    fn from(addr: AlloyAddress) -> Self {
        Self(addr)
    }
}
