//! Single-key Ethereum wallet.
//!
//! A [`Wallet`] owns one private key, either derived from a seed along
//! `m/44'/coin_type'/0'/0/0` or imported from hex, and signs transactions
//! (EIP-155) and personal messages (EIP-191) with it.

use core::fmt;
use std::sync::Arc;

use bip39::Mnemonic;
use quill::{
    DerivationPath, Error, Event, ExtendedPrivateKey as _, Network, Observer, PrivateKey as _,
    Result, Signature, TracingObserver,
};
use zeroize::Zeroizing;

use crate::address::EthAddress;
use crate::eip191;
use crate::extended_key::EthExtendedPrivateKey;
use crate::private_key::EthPrivateKey;
use crate::public_key::EthPublicKey;
use crate::transaction::{RawTransaction, SignedTransaction};

/// A wallet holding one Ethereum private key bound to one network.
///
/// Immutable once built; every operation takes `&self`, so a wallet can be
/// shared behind an `Arc` and used from several threads.
///
/// # Example
/// ```
/// use quill::Network;
/// use quill_eth::Wallet;
///
/// let wallet = Wallet::from_seed(&[0u8; 64], Network::MAINNET, false).unwrap();
/// assert_eq!(wallet.address(), "0xb73F8Cc7b63C5Ed98d6F7C7ba59C8094972B1166");
///
/// let signature = wallet.sign_message("hello").unwrap();
/// assert!(signature.ends_with("1b") || signature.ends_with("1c"));
/// ```
pub struct Wallet {
    network: Network,
    private_key: EthPrivateKey,
    debug: bool,
    observer: Option<Arc<dyn Observer>>,
}

impl Wallet {
    /// Start building a wallet for `network`.
    pub fn builder(network: Network) -> Builder {
        Builder::new(network)
    }

    /// Derive the key at `m/44'/coin_type'/0'/0/0` from `seed`.
    pub fn from_seed(seed: &[u8], network: Network, debug: bool) -> Result<Self> {
        Self::builder(network).debug(debug).build_from_seed(seed)
    }

    /// Wrap a hex-encoded private key (optional `0x`, either case).
    pub fn from_private_key(network: Network, private_key: &str, debug: bool) -> Result<Self> {
        Self::builder(network).debug(debug).build_from_private_key(private_key)
    }

    /// Derive from a BIP-39 phrase and optional passphrase.
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: Option<&str>,
        network: Network,
        debug: bool,
    ) -> Result<Self> {
        Self::builder(network)
            .debug(debug)
            .build_from_mnemonic(phrase, passphrase)
    }

    /// Network this wallet signs for.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Whether debug events are emitted.
    pub const fn is_debug(&self) -> bool {
        self.debug
    }

    /// EIP-55 checksummed address.
    pub fn address(&self) -> String {
        self.eth_address().to_checksum_string()
    }

    /// Address as a typed value.
    pub fn eth_address(&self) -> EthAddress {
        self.private_key.address()
    }

    /// Public key of the wallet.
    pub fn public_key(&self) -> EthPublicKey {
        self.private_key.public_key()
    }

    /// Uncompressed public key hex, no prefix.
    pub fn public_key_hex(&self) -> String {
        self.public_key().to_hex()
    }

    /// Export the private key as lowercase hex without `0x`.
    ///
    /// The returned string is wiped when dropped. Anyone holding it controls
    /// the account.
    pub fn dump_private_key(&self) -> Zeroizing<String> {
        self.private_key.to_hex()
    }

    /// Sign `transaction` for this wallet's chain, returning the signed
    /// transaction hex.
    pub fn sign_transaction(&self, transaction: &RawTransaction) -> Result<String> {
        Ok(self.sign_transaction_raw(transaction)?.to_hex())
    }

    /// Like [`Self::sign_transaction`] but keeps the signed parts.
    pub fn sign_transaction_raw(&self, transaction: &RawTransaction) -> Result<SignedTransaction> {
        let signed = transaction.sign(&self.private_key, self.network.chain_id())?;
        if self.debug {
            self.emit(&Event::TransactionSigned {
                transaction,
                hash: signed.signing_hash(),
                signed: &signed.to_hex(),
            });
        }
        Ok(signed)
    }

    /// Personal-sign a hex-encoded message (optional `0x`).
    ///
    /// Returns `0x` ‖ r ‖ s ‖ v with v in {27, 28}.
    pub fn sign_hex(&self, message_hex: &str) -> Result<String> {
        let message = quill::decode_hex(message_hex)?;
        Ok(self.sign_bytes(&message)?.to_hex())
    }

    /// Personal-sign the UTF-8 bytes of `message`.
    pub fn sign_message(&self, message: &str) -> Result<String> {
        self.sign_hex(&hex::encode(message.as_bytes()))
    }

    /// Personal-sign raw bytes.
    pub fn sign_bytes(&self, message: &[u8]) -> Result<Signature> {
        let hash = eip191::hash_message(message)?;
        let signature = self.private_key.sign_prehash(&hash)?.with_legacy_v();
        if self.debug {
            self.emit(&Event::MessageSigned {
                message,
                hash: &hash,
                signature: &signature.to_hex(),
            });
        }
        Ok(signature)
    }

    /// Check that `signature` is this wallet's personal-sign over `message`.
    ///
    /// Malformed signatures are errors; a well-formed signature by another
    /// key is `Ok(false)`.
    pub fn verify_message(&self, message: &[u8], signature: &str) -> Result<bool> {
        let signer = eip191::recover_signer(message, signature)?;
        Ok(signer == self.eth_address())
    }

    fn emit(&self, event: &Event<'_>) {
        if let Some(observer) = &self.observer {
            observer.observe(event);
        }
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("network", &self.network)
            .field("address", &self.address())
            .field("private_key", &"[REDACTED]")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Configures a [`Wallet`] before its key is supplied.
///
/// Events go to the injected observer, or to [`TracingObserver`] when debug
/// is on and none was given. With debug off nothing is emitted.
#[must_use]
pub struct Builder {
    network: Network,
    debug: bool,
    observer: Option<Arc<dyn Observer>>,
}

impl Builder {
    /// Builder for `network` with debug off.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            debug: false,
            observer: None,
        }
    }

    /// Turn debug events on or off.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Send debug events to `observer`.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Derive the key at `m/44'/coin_type'/0'/0/0` from `seed`.
    pub fn build_from_seed(self, seed: &[u8]) -> Result<Wallet> {
        let path = DerivationPath::bip44(self.network.coin_type(), 0, 0, 0)
            .map_err(|e| Error::Derivation(e.to_string()))?;
        let xkey = EthExtendedPrivateKey::from_seed(seed)?.derive_path(&path)?;
        Ok(self.build(xkey.private_key()))
    }

    /// Wrap a hex-encoded private key.
    pub fn build_from_private_key(self, private_key: &str) -> Result<Wallet> {
        let private_key = EthPrivateKey::from_hex(private_key)?;
        Ok(self.build(private_key))
    }

    /// Derive from a BIP-39 phrase; `None` means an empty passphrase.
    pub fn build_from_mnemonic(self, phrase: &str, passphrase: Option<&str>) -> Result<Wallet> {
        let mnemonic: Mnemonic = phrase
            .parse()
            .map_err(|e| Error::Derivation(format!("invalid mnemonic: {e}")))?;
        let seed = Zeroizing::new(mnemonic.to_seed(passphrase.unwrap_or("")));
        self.build_from_seed(seed.as_slice())
    }

    fn build(self, private_key: EthPrivateKey) -> Wallet {
        let observer = match (self.debug, self.observer) {
            (true, None) => Some(Arc::new(TracingObserver) as Arc<dyn Observer>),
            (_, observer) => observer,
        };

        let wallet = Wallet {
            network: self.network,
            private_key,
            debug: self.debug,
            observer,
        };

        if wallet.debug {
            let private_key = wallet.dump_private_key();
            wallet.emit(&Event::Created {
                network: wallet.network,
                private_key: &private_key,
                public_key: &wallet.public_key_hex(),
                address: &wallet.address(),
            });
        }
        wallet
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("network", &self.network)
            .field("debug", &self.debug)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
