//! Error types for wallet operations.

use thiserror::Error;

/// Errors that can occur during wallet construction and signing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The HD provider rejected the seed, mnemonic or a derivation step.
    #[error("key derivation error: {0}")]
    Derivation(String),

    /// A derivation path could not be parsed or built.
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    /// Malformed hex input.
    #[error("invalid hex: {0}")]
    Decoding(String),

    /// Well-formed input of the wrong size.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// A transaction field or message prefix could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Public key bytes are not a valid curve point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Signature is malformed or does not recover.
    #[error("invalid signature")]
    InvalidSignature,

    /// The signing engine failed to produce a signature.
    #[error("signing failed")]
    Signing,

    /// Network name not recognised.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Self::Decoding(err.to_string())
    }
}

/// A convenient Result type alias for wallet operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_length() {
        let e = Error::InvalidLength {
            expected: 32,
            actual: 31,
        };
        assert_eq!(e.to_string(), "invalid length: expected 32 bytes, got 31");
    }

    #[test]
    fn from_hex_error_is_decoding() {
        let err = hex::decode("zz").unwrap_err();
        let e: Error = err.into();
        assert!(matches!(e, Error::Decoding(_)));
    }

    #[test]
    fn odd_length_hex_is_decoding() {
        let err = hex::decode("abc").unwrap_err();
        assert_eq!(
            Error::from(err),
            Error::Decoding("Odd number of digits".into())
        );
    }
}
