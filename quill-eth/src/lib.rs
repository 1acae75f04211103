//! Single-key Ethereum wallet built on the `quill` provider traits.
//!
//! # Usage
//!
//! ```
//! use alloy_primitives::U256;
//! use quill::Network;
//! use quill_eth::{RawTransaction, Wallet};
//!
//! let wallet = Wallet::from_seed(&[0u8; 64], Network::MAINNET, false).unwrap();
//! println!("Address: {}", wallet.address());
//!
//! // EIP-191 personal message
//! let signature = wallet.sign_message("hello").unwrap();
//! assert_eq!(signature.len(), 2 + 130);
//!
//! // EIP-155 legacy transfer
//! let tx = RawTransaction::transfer(
//!     "0x3535353535353535353535353535353535353535",
//!     U256::from(1_000_000_000_000_000_000u128),
//!     0,
//!     U256::from(20_000_000_000u64),
//! );
//! let signed = wallet.sign_transaction(&tx).unwrap();
//! assert!(signed.starts_with("0xf8"));
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::cast_possible_truncation
)]
#![forbid(unsafe_code)]

mod address;
pub mod eip191;
mod extended_key;
mod private_key;
mod public_key;
pub mod rlp;
mod transaction;
mod wallet;

pub use address::EthAddress;
pub use extended_key::EthExtendedPrivateKey;
pub use private_key::EthPrivateKey;
pub use public_key::EthPublicKey;
pub use transaction::{EIP155_V_OFFSET, RawTransaction, SignedTransaction};
pub use wallet::{Builder, Wallet};

pub use quill::{Error, Network, Result, Signature};
