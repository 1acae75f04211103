//! Debug callbacks fired after construction and after each signature.
//!
//! A wallet built with its debug flag set hands an [`Event`] to its
//! [`Observer`]. [`TracingObserver`] forwards events to `tracing`; any
//! `Fn(&Event<'_>)` closure can be plugged in instead.

use core::fmt::Debug;

use crate::network::Network;

/// Target used for every event emitted by [`TracingObserver`].
pub const TRACING_TARGET: &str = "quill::wallet";

/// A point in the wallet lifecycle worth reporting.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Event<'a> {
    /// A wallet finished construction.
    ///
    /// Carries the private key in hex; observers decide whether to keep it.
    Created {
        /// Network the wallet signs for.
        network: Network,
        /// Private key hex (no prefix).
        private_key: &'a str,
        /// Uncompressed public key hex (no prefix).
        public_key: &'a str,
        /// Checksummed address.
        address: &'a str,
    },
    /// A transaction was signed.
    TransactionSigned {
        /// The unsigned transaction as given by the caller.
        transaction: &'a dyn Debug,
        /// Hash that was signed.
        hash: &'a [u8; 32],
        /// Signed transaction hex.
        signed: &'a str,
    },
    /// A personal message was signed.
    MessageSigned {
        /// Raw message bytes.
        message: &'a [u8],
        /// EIP-191 hash that was signed.
        hash: &'a [u8; 32],
        /// Signature hex.
        signature: &'a str,
    },
}

/// Receives wallet lifecycle events.
pub trait Observer: Send + Sync {
    /// Handle one event. Must not panic; the result of the wallet operation
    /// does not depend on it.
    fn observe(&self, event: &Event<'_>);
}

impl<F> Observer for F
where
    F: Fn(&Event<'_>) + Send + Sync,
{
    fn observe(&self, event: &Event<'_>) {
        self(event);
    }
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &Event<'_>) {
        match event {
            Event::Created {
                network,
                private_key,
                public_key,
                address,
            } => tracing::debug!(
                target: TRACING_TARGET,
                %network,
                chain_id = network.chain_id(),
                coin_type = network.coin_type(),
                private_key,
                public_key,
                address,
                "wallet created"
            ),
            Event::TransactionSigned {
                transaction,
                hash,
                signed,
            } => tracing::debug!(
                target: TRACING_TARGET,
                ?transaction,
                hash = %hex::encode(hash),
                signed,
                "transaction signed"
            ),
            Event::MessageSigned {
                message,
                hash,
                signature,
            } => tracing::debug!(
                target: TRACING_TARGET,
                message = %hex::encode(message),
                hash = %hex::encode(hash),
                signature,
                "message signed"
            ),
        }
    }
}
