//! EIP-191 personal message hashing.
//!
//! The signed digest is Keccak-256 of
//! `"\x19Ethereum Signed Message:\n" ‖ decimal(len) ‖ message`.

use quill::hash::keccak256_concat;
use quill::{Error, Result, Signature};

use crate::address::EthAddress;
use crate::public_key::EthPublicKey;

/// Fixed head of the personal-sign prefix.
pub const MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Build the ASCII prefix bytes for a message of `len` bytes.
pub fn prefix(len: usize) -> Result<Vec<u8>> {
    let prefix = format!("{MESSAGE_PREFIX}{len}");
    if !prefix.is_ascii() {
        return Err(Error::Encoding(format!("non-ascii message prefix: {prefix:?}")));
    }
    Ok(prefix.into_bytes())
}

/// Compute the EIP-191 personal message hash.
pub fn hash_message(message: &[u8]) -> Result<[u8; 32]> {
    let prefix = prefix(message.len())?;
    Ok(keccak256_concat(&[prefix.as_slice(), message]))
}

/// Recover the address that produced a personal-sign `signature` over
/// `message`.
pub fn recover_signer(message: &[u8], signature: &str) -> Result<EthAddress> {
    let signature: Signature = signature.parse()?;
    let public_key = EthPublicKey::recover_from_message(message, &signature)?;
    Ok(EthAddress::from_public_key(&public_key))
}
