//! Legacy Ethereum transactions with EIP-155 replay protection.
//!
//! The signing payload is the RLP list
//! `[nonce, gas_price, gas_limit, to, value, data, chain_id, 0, 0]`; the
//! signed form replaces the last three items with `v`, `r` and `s`, where
//! `v = chain_id * 2 + 35 + recovery_id`.

use core::fmt;

use alloy_primitives::U256;
use quill::hash::keccak256;
use quill::{Error, Result, Signature, strip_hex_prefix};

use crate::address::EthAddress;
use crate::private_key::EthPrivateKey;
use crate::public_key::EthPublicKey;
use crate::rlp;

/// Base offset of an EIP-155 `v` value.
pub const EIP155_V_OFFSET: u64 = 35;

/// Unsigned legacy transaction as supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTransaction {
    /// Sender account nonce.
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Recipient as hex (optional `0x`); empty for contract creation.
    pub to: String,
    /// Value in wei.
    pub value: U256,
    /// Call data or init code.
    pub data: Vec<u8>,
}

impl RawTransaction {
    /// Gas consumed by a plain value transfer.
    pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

    /// Plain value transfer with no call data.
    ///
    /// # Example
    /// ```
    /// use alloy_primitives::U256;
    /// use quill_eth::RawTransaction;
    ///
    /// let tx = RawTransaction::transfer(
    ///     "0x3535353535353535353535353535353535353535",
    ///     U256::from(1_000_000_000_000_000_000u128), // 1 ETH
    ///     9,
    ///     U256::from(20_000_000_000u64), // 20 Gwei
    /// );
    /// assert_eq!(tx.gas_limit, 21_000);
    /// ```
    pub fn transfer(to: impl Into<String>, value: U256, nonce: u64, gas_price: U256) -> Self {
        Self {
            nonce,
            gas_price,
            gas_limit: Self::TRANSFER_GAS_LIMIT,
            to: to.into(),
            value,
            data: Vec::new(),
        }
    }

    /// Whether the transaction deploys a contract.
    pub fn is_contract_creation(&self) -> bool {
        strip_hex_prefix(&self.to).is_empty()
    }

    /// Decode the recipient; empty for contract creation.
    fn recipient(&self) -> Result<Vec<u8>> {
        let to = strip_hex_prefix(&self.to);
        if to.is_empty() {
            return Ok(Vec::new());
        }

        let bytes = hex::decode(to)
            .map_err(|e| Error::Encoding(format!("recipient {:?}: {e}", self.to)))?;
        if bytes.len() != EthAddress::LEN {
            return Err(Error::Encoding(format!(
                "recipient {:?}: expected {} bytes, got {}",
                self.to,
                EthAddress::LEN,
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    /// The six RLP items shared by the signing payload and the signed form.
    fn encode_fields(&self) -> Result<Vec<Vec<u8>>> {
        Ok(vec![
            rlp::encode_u64(self.nonce),
            rlp::encode_u256(self.gas_price),
            rlp::encode_u64(self.gas_limit),
            rlp::encode_bytes(&self.recipient()?),
            rlp::encode_u256(self.value),
            rlp::encode_bytes(&self.data),
        ])
    }

    /// RLP bytes that are hashed for signing on `chain_id`.
    pub fn signing_payload(&self, chain_id: u64) -> Result<Vec<u8>> {
        let mut items = self.encode_fields()?;
        items.push(rlp::encode_u64(chain_id));
        items.push(rlp::encode_u64(0));
        items.push(rlp::encode_u64(0));
        Ok(rlp::encode_list(&items))
    }

    /// Keccak-256 of [`Self::signing_payload`].
    pub fn signing_hash(&self, chain_id: u64) -> Result<[u8; 32]> {
        Ok(keccak256(&self.signing_payload(chain_id)?))
    }

    /// Sign for `chain_id` with `key`.
    pub fn sign(&self, key: &EthPrivateKey, chain_id: u64) -> Result<SignedTransaction> {
        let fields = self.encode_fields()?;
        let hash = self.signing_hash(chain_id)?;
        let signature = quill::PrivateKey::sign_prehash(key, &hash)?;

        let v = chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(EIP155_V_OFFSET + u64::from(signature.v)))
            .ok_or_else(|| Error::Encoding(format!("chain id {chain_id} overflows v")))?;

        let mut items = fields;
        items.push(rlp::encode_u64(v));
        items.push(rlp::encode_bytes(rlp::trim_leading_zeros(&signature.r)));
        items.push(rlp::encode_bytes(rlp::trim_leading_zeros(&signature.s)));

        Ok(SignedTransaction {
            raw: rlp::encode_list(&items),
            hash,
            signature,
            v,
        })
    }
}

/// A signed, RLP-encoded legacy transaction.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw: Vec<u8>,
    hash: [u8; 32],
    signature: Signature,
    v: u64,
}

impl SignedTransaction {
    /// Signed RLP bytes, ready to broadcast.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The EIP-155 hash that was signed.
    pub fn signing_hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Signature with `v` as the raw recovery id.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// EIP-155 `v`.
    pub fn v(&self) -> u64 {
        self.v
    }

    /// Chain id recovered from `v`.
    pub fn chain_id(&self) -> u64 {
        (self.v - EIP155_V_OFFSET) / 2
    }

    /// Transaction hash: Keccak-256 of the signed bytes.
    pub fn tx_hash(&self) -> [u8; 32] {
        keccak256(&self.raw)
    }

    /// `0x`-prefixed hex of the signed bytes.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    /// Recover the sender address.
    pub fn sender(&self) -> Result<EthAddress> {
        let recovery_id = ((self.v - EIP155_V_OFFSET) % 2) as u8;
        let signature = Signature::new(self.signature.r, self.signature.s, recovery_id);
        let public_key = EthPublicKey::recover_from_prehash(&self.hash, &signature)?;
        Ok(EthAddress::from_public_key(&public_key))
    }
}

impl fmt::Debug for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedTransaction")
            .field("hash", &format_args!("0x{}", hex::encode(self.tx_hash())))
            .field("v", &self.v)
            .field("raw", &format_args!("{}", self.to_hex()))
            .finish()
    }
}

impl fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill::PrivateKey as _;

    fn eip155_key() -> EthPrivateKey {
        EthPrivateKey::from_bytes(&[0x46; 32]).unwrap()
    }

    // Example transaction from the EIP-155 text
    fn eip155_tx() -> RawTransaction {
        RawTransaction::transfer(
            "0x3535353535353535353535353535353535353535",
            U256::from(1_000_000_000_000_000_000u128),
            9,
            U256::from(20_000_000_000u64),
        )
    }

    mod signing_payload {
        use super::*;

        #[test]
        fn test_eip155_payload() {
            let payload = eip155_tx().signing_payload(1).unwrap();
            assert_eq!(
                hex::encode(payload),
                "ec098504a817c800825208943535353535353535353535353535353535353535\
                 880de0b6b3a764000080018080"
            );
        }

        #[test]
        fn test_eip155_signing_hash() {
            let hash = eip155_tx().signing_hash(1).unwrap();
            assert_eq!(
                hash,
                hex_literal::hex!(
                    "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
                )
            );
        }

        #[test]
        fn test_contract_creation() {
            let mut tx = eip155_tx();
            tx.to = String::new();
            assert!(tx.is_contract_creation());

            let payload = tx.signing_payload(1).unwrap();
            // empty recipient encodes as 0x80
            assert!(hex::encode(payload).contains("82520880880de0b6b3a7640000"));
        }

        #[test]
        fn test_bad_recipient_hex() {
            let mut tx = eip155_tx();
            tx.to = "0xzz".into();
            assert!(matches!(tx.signing_hash(1), Err(Error::Encoding(_))));
        }

        #[test]
        fn test_short_recipient() {
            let mut tx = eip155_tx();
            tx.to = "0x3535".into();
            assert!(matches!(tx.signing_hash(1), Err(Error::Encoding(_))));
        }
    }

    mod signed {
        use super::*;

        #[test]
        fn test_eip155_mainnet() {
            let signed = eip155_tx().sign(&eip155_key(), 1).unwrap();
            assert_eq!(signed.v(), 37);
            assert_eq!(signed.chain_id(), 1);
            assert_eq!(
                signed.to_hex(),
                "0xf86c098504a817c800825208943535353535353535353535353535353535353535\
                 880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1\
                 590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a\
                 3b6d83"
            );
        }

        #[test]
        fn test_chain_id_changes_signature() {
            let tx = eip155_tx();
            let mainnet = tx.sign(&eip155_key(), 1).unwrap();
            let ropsten = tx.sign(&eip155_key(), 3).unwrap();

            assert_eq!(ropsten.v(), 41);
            assert_ne!(mainnet.raw(), ropsten.raw());
            assert_eq!(
                ropsten.to_hex(),
                "0xf86c098504a817c800825208943535353535353535353535353535353535353535\
                 880de0b6b3a76400008029a008dc50c96429b22397e3d2551b291b52d9b0405ccd0ac3a942\
                 5bd5c77c3403c0a05edc66b3804e964ee6750a0a206cf1321394c606936eaf469d481fd8c1\
                 e59773"
            );
        }

        #[test]
        fn test_sender() {
            let key = eip155_key();
            let signed = eip155_tx().sign(&key, 1).unwrap();
            assert_eq!(signed.sender().unwrap(), key.address());
        }

        #[test]
        fn test_tx_hash_is_keccak_of_raw() {
            let signed = eip155_tx().sign(&eip155_key(), 1).unwrap();
            assert_eq!(signed.tx_hash(), keccak256(signed.raw()));
            assert_ne!(&signed.tx_hash(), signed.signing_hash());
        }

        #[test]
        fn test_overflowing_chain_id() {
            let err = eip155_tx().sign(&eip155_key(), u64::MAX).unwrap_err();
            assert!(matches!(err, Error::Encoding(_)));
        }
    }
}
