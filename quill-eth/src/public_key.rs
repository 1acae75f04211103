//! secp256k1 public keys and signer recovery.
//!
//! Recovery accepts `v` as a raw recovery id or with the legacy +27 offset,
//! so signatures from this wallet and from other personal-sign tools both
//! work.

use k256::ecdsa::{RecoveryId, VerifyingKey, signature::hazmat::PrehashVerifier};
use quill::{Error, Result, Signature};

use crate::address::EthAddress;
use crate::eip191;

/// An account's public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EthPublicKey(VerifyingKey);

impl EthPublicKey {
    pub(crate) fn from_verifying_key(key: VerifyingKey) -> Self {
        Self(key)
    }

    /// The 64 bytes `x ‖ y` that are hashed into the address.
    #[must_use]
    pub fn to_raw_bytes(&self) -> [u8; 64] {
        let sec1 = quill::PublicKey::to_uncompressed_bytes(self);
        let mut xy = [0u8; 64];
        xy.copy_from_slice(&sec1[1..]);
        xy
    }

    /// Uncompressed SEC1 hex (65 bytes, `04` prefix, no `0x`).
    pub fn to_hex(&self) -> String {
        hex::encode(quill::PublicKey::to_uncompressed_bytes(self))
    }

    /// Recover the key that signed the 32-byte `hash`.
    pub fn recover_from_prehash(hash: &[u8; 32], signature: &Signature) -> Result<Self> {
        let rs = ecdsa_signature(signature)?;
        let recovery_id =
            RecoveryId::from_byte(signature.recovery_id()).ok_or(Error::InvalidSignature)?;

        VerifyingKey::recover_from_prehash(hash, &rs, recovery_id)
            .map(Self)
            .map_err(|_| Error::InvalidSignature)
    }

    /// Recover the key behind an EIP-191 personal-sign signature.
    pub fn recover_from_message(message: &[u8], signature: &Signature) -> Result<Self> {
        Self::recover_from_prehash(&eip191::hash_message(message)?, signature)
    }

    fn sec1<const N: usize>(&self, compress: bool) -> [u8; N] {
        let point = self.0.to_encoded_point(compress);
        let mut out = [0u8; N];
        out.copy_from_slice(point.as_bytes());
        out
    }
}

fn ecdsa_signature(signature: &Signature) -> Result<k256::ecdsa::Signature> {
    k256::ecdsa::Signature::from_slice(&signature.to_rs()).map_err(|_| Error::InvalidSignature)
}

impl quill::PublicKey for EthPublicKey {
    type Address = EthAddress;

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidPublicKey)
    }

    fn to_bytes(&self) -> [u8; 33] {
        self.sec1(true)
    }

    fn to_uncompressed_bytes(&self) -> [u8; 65] {
        self.sec1(false)
    }

    fn to_address(&self) -> Self::Address {
        EthAddress::from_public_key(self)
    }

    fn verify(&self, hash: &[u8; 32], signature: &Signature) -> Result<()> {
        let rs = ecdsa_signature(signature)?;
        self.0
            .verify_prehash(hash, &rs)
            .map_err(|_| Error::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::private_key::EthPrivateKey;
    use quill::PrivateKey as _;
    use quill::PublicKey as _;

    const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn test_key() -> EthPrivateKey {
        TEST_KEY.parse().unwrap()
    }

    #[test]
    fn test_compressed_roundtrip() {
        let public_key = test_key().public_key();
        let compressed = public_key.to_bytes();
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);

        let parsed = EthPublicKey::from_bytes(&compressed).unwrap();
        assert_eq!(public_key, parsed);
    }

    #[test]
    fn test_uncompressed_hex() {
        let hex = test_key().public_key().to_hex();
        assert_eq!(hex.len(), 130);
        assert!(hex.starts_with("04"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            EthPublicKey::from_bytes(&[0u8; 33]).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let private_key = test_key();
        let public_key = private_key.public_key();

        let hash = [0u8; 32];
        let signature = private_key.sign_prehash(&hash).unwrap();

        public_key.verify(&hash, &signature).unwrap();
        assert!(public_key.verify(&[1u8; 32], &signature).is_err());
    }

    #[test]
    fn test_recover_with_either_v() {
        let private_key = test_key();
        let public_key = private_key.public_key();

        let hash = [1u8; 32];
        let signature = private_key.sign_prehash(&hash).unwrap();

        let raw = EthPublicKey::recover_from_prehash(&hash, &signature).unwrap();
        let legacy = EthPublicKey::recover_from_prehash(&hash, &signature.with_legacy_v()).unwrap();
        assert_eq!(raw, public_key);
        assert_eq!(legacy, public_key);
    }

    #[test]
    fn test_address_derivation() {
        let addr = test_key().public_key().to_address();
        assert_eq!(addr.to_string(), "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23");
    }
}
