//! Network descriptors.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// BIP-44 coin type registered for Ether.
pub const ETHER_COIN_TYPE: u32 = 60;

/// BIP-44 coin type shared by all testnets.
pub const TESTNET_COIN_TYPE: u32 = 1;

/// Immutable chain descriptor: EIP-155 chain id and BIP-44 coin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    chain_id: u64,
    coin_type: u32,
}

impl Network {
    /// Ethereum mainnet.
    pub const MAINNET: Self = Self::new(1, ETHER_COIN_TYPE);
    /// Goerli testnet.
    pub const GOERLI: Self = Self::new(5, TESTNET_COIN_TYPE);
    /// Sepolia testnet.
    pub const SEPOLIA: Self = Self::new(11_155_111, TESTNET_COIN_TYPE);

    /// Create a descriptor from raw parameters.
    #[inline]
    #[must_use]
    pub const fn new(chain_id: u64, coin_type: u32) -> Self {
        Self {
            chain_id,
            coin_type,
        }
    }

    /// Create a descriptor for a private chain.
    ///
    /// Test chains derive keys under the shared testnet coin type.
    #[must_use]
    pub const fn private(chain_id: u64, test_use: bool) -> Self {
        let coin_type = if test_use {
            TESTNET_COIN_TYPE
        } else {
            ETHER_COIN_TYPE
        };
        Self::new(chain_id, coin_type)
    }

    /// Look up a well-known network by chain id.
    pub const fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(Self::MAINNET),
            5 => Some(Self::GOERLI),
            11_155_111 => Some(Self::SEPOLIA),
            _ => None,
        }
    }

    /// EIP-155 chain id.
    #[inline]
    #[must_use]
    pub const fn chain_id(self) -> u64 {
        self.chain_id
    }

    /// BIP-44 coin type.
    #[inline]
    #[must_use]
    pub const fn coin_type(self) -> u32 {
        self.coin_type
    }

    /// Name of a well-known network, if this is one.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::MAINNET => Some("mainnet"),
            Self::GOERLI => Some("goerli"),
            Self::SEPOLIA => Some("sepolia"),
            _ => None,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "chain-{}", self.chain_id),
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "ethereum" => Ok(Self::MAINNET),
            "goerli" => Ok(Self::GOERLI),
            "sepolia" => Ok(Self::SEPOLIA),
            other => Err(Error::UnknownNetwork(other.to_owned())),
        }
    }
}
