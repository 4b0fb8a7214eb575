//! Error types for SUCI encoding and profile generation
//!
//! Variants carry only non-secret context. The SUPI digits and all key
//! material stay out of error messages.

use thiserror::Error;
use uegen_crypto::CryptoError;

/// SUCI encoder and operator errors
#[derive(Debug, Error)]
pub enum SuciError {
    /// PLMN, routing indicator or home network key not configured or invalid
    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// IMSI digits are not numeric or too short for the configured PLMN
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(&'static str),

    /// Identifier prefix is neither `imsi` nor `suci`
    #[error("Unsupported identifier format: {0:?}")]
    UnsupportedIdentifierFormat(String),

    /// Protection scheme id that cannot be concealed with
    #[error("Unsupported protection scheme: {0}")]
    UnsupportedScheme(u8),

    /// Key agreement or cipher failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Configuration, hex or file errors from the common layer
    #[error(transparent)]
    Common(#[from] uegen_common::Error),
}
