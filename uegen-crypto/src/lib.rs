//! Cryptographic primitives for SUPI concealment
//!
//! Implements the ECIES protection schemes of 3GPP TS 33.501 Annex C:
//! - Profile A: X25519 key agreement
//! - Profile B: NIST P-256 key agreement with compressed points
//! - ANSI X9.63 KDF with SHA-256
//! - AES-128-CTR encryption with truncated HMAC-SHA-256

pub mod ecdh;
pub mod ecies;
pub mod error;
pub mod kdf;
pub mod point;

pub use ecdh::{Curve, EcKeyPair, P256KeyPair, SharedSecret, X25519KeyPair};
pub use ecies::{conceal, protect, ProtectedMsin, SchemeOutput};
#[cfg(any(test, feature = "test-vectors"))]
pub use ecies::reveal;
pub use error::{CryptoError, CryptoResult};
pub use kdf::{derive_key_material, x963_kdf, DerivedKeyMaterial, EciesParams};
