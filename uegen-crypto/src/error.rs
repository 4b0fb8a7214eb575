//! Error types for the concealment primitives
//!
//! Messages carry only lengths and static context, never key bytes.

use thiserror::Error;

/// Curve-layer and cipher-layer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material has the wrong length for the selected curve
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
    /// Private key bytes do not form a usable scalar
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(&'static str),
    /// Peer public key rejected
    #[error("Invalid peer public key: {0}")]
    InvalidPeerKey(&'static str),
    /// Malformed encoding (point prefix/length, hex)
    #[error("Invalid format: {0}")]
    InvalidFormat(&'static str),
    /// The x-coordinate has no matching y on the curve
    #[error("No square root exists for the x-coordinate")]
    NoSquareRoot,
    /// Symmetric cipher or MAC could not be initialised
    #[error("Cipher failure: {0}")]
    CipherFailure(&'static str),
}

/// Result type for concealment primitives
pub type CryptoResult<T> = Result<T, CryptoError>;
