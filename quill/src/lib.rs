//! # Quill - Single-Key Signing Wallet Core
//!
//! Provider traits, hashing, derivation paths and network descriptors shared
//! by the quill wallet crates.
//!
//! ## Contents
//!
//! - [`traits`]: the key-derivation, raw-key and address provider contracts
//! - [`encoding`]: hex input with an optional `0x` prefix
//! - [`hash`]: Keccak-256 (the original Keccak padding, not NIST SHA3-256)
//! - [`hdpath`]: BIP-32/44 derivation paths
//! - [`network`]: chain id and coin type descriptors
//! - [`observer`]: injectable debug callbacks for construction and signing

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use
)]
#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod hash;
pub mod hdpath;
pub mod network;
pub mod observer;
pub mod traits;

pub use encoding::{decode_hex, strip_hex_prefix};
pub use error::{Error, Result};
pub use hdpath::{ChildIndex, DerivationPath};
pub use network::Network;
pub use observer::{Event, Observer, TracingObserver};
pub use traits::*;
