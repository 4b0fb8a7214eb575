//! Elliptic-curve key agreement for the ECIES profiles
//!
//! Profile A uses X25519 with 32-byte raw keys. Profile B uses NIST P-256
//! with 32-byte big-endian scalars and 33-byte compressed public keys.
//! Both produce a 32-byte shared secret.

use std::fmt;

use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{EncodedPoint, FieldBytes};
use rand::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CryptoError, CryptoResult};
use crate::point;

/// X25519 key size in bytes (private and public)
pub const X25519_KEY_SIZE: usize = 32;

/// P-256 private scalar size in bytes
pub const P256_SCALAR_SIZE: usize = 32;

/// P-256 compressed public key size in bytes
pub const P256_COMPRESSED_KEY_SIZE: usize = point::COMPRESSED_POINT_SIZE;

/// Shared secret size in bytes for both curves
pub const SHARED_SECRET_SIZE: usize = 32;

/// ECDH output. Wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    /// Raw secret bytes
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Curve selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Curve25519 (Profile A)
    X25519,
    /// secp256r1 (Profile B)
    P256,
}

impl Curve {
    /// Length of an encoded public key on this curve
    pub fn public_key_len(&self) -> usize {
        match self {
            Curve::X25519 => X25519_KEY_SIZE,
            Curve::P256 => P256_COMPRESSED_KEY_SIZE,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::X25519 => write!(f, "x25519"),
            Curve::P256 => write!(f, "p256"),
        }
    }
}

fn clamp(scalar: &mut [u8; X25519_KEY_SIZE]) {
    scalar[0] &= 0xf8;
    scalar[31] &= 0x7f;
    scalar[31] |= 0x40;
}

/// X25519 key pair (Profile A)
///
/// The stored private key is the clamped scalar.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct X25519KeyPair {
    private_key: [u8; X25519_KEY_SIZE],
    public_key: [u8; X25519_KEY_SIZE],
}

impl X25519KeyPair {
    /// Generate a new random key pair
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut seed = Zeroizing::new([0u8; X25519_KEY_SIZE]);
        rng.fill_bytes(&mut seed[..]);
        Self::from_scalar(*seed)
    }

    /// Import a 32-byte private key, applying RFC 7748 clamping
    pub fn from_private_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let scalar: [u8; X25519_KEY_SIZE] =
            bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: X25519_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self::from_scalar(scalar))
    }

    fn from_scalar(mut scalar: [u8; X25519_KEY_SIZE]) -> Self {
        clamp(&mut scalar);
        let secret = StaticSecret::from(scalar);
        let public = PublicKey::from(&secret);
        let pair = Self {
            private_key: scalar,
            public_key: *public.as_bytes(),
        };
        scalar.zeroize();
        pair
    }

    /// Get the public key
    pub fn public_key(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.public_key
    }

    /// Get the (clamped) private key
    pub fn private_key(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.private_key
    }

    /// X25519 with a 32-byte peer public key
    ///
    /// Low-order peer points yield an all-zero output and are rejected.
    pub fn shared_secret(&self, peer_public_key: &[u8]) -> CryptoResult<SharedSecret> {
        let peer: [u8; X25519_KEY_SIZE] =
            peer_public_key
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: X25519_KEY_SIZE,
                    actual: peer_public_key.len(),
                })?;

        let secret = StaticSecret::from(self.private_key);
        let shared = secret.diffie_hellman(&PublicKey::from(peer));
        if !shared.was_contributory() {
            return Err(CryptoError::InvalidPeerKey("low-order X25519 point"));
        }
        Ok(SharedSecret(*shared.as_bytes()))
    }
}

impl fmt::Debug for X25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X25519KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

/// P-256 key pair (Profile B)
#[derive(Clone)]
pub struct P256KeyPair {
    secret: p256::SecretKey,
    public_key: [u8; P256_COMPRESSED_KEY_SIZE],
}

impl P256KeyPair {
    /// Generate a new random key pair
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let secret = p256::SecretKey::random(rng);
        let public_key = compressed_public_key(&secret);
        Self { secret, public_key }
    }

    /// Import a big-endian private scalar of 1 to 32 bytes
    ///
    /// Shorter inputs are left-padded with zeros. Zero and scalars not
    /// below the group order are rejected.
    pub fn from_private_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.is_empty() || bytes.len() > P256_SCALAR_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: P256_SCALAR_SIZE,
                actual: bytes.len(),
            });
        }
        let mut padded = Zeroizing::new([0u8; P256_SCALAR_SIZE]);
        padded[P256_SCALAR_SIZE - bytes.len()..].copy_from_slice(bytes);

        let secret = p256::SecretKey::from_bytes(FieldBytes::from_slice(&padded[..]))
            .map_err(|_| CryptoError::InvalidPrivateKey("scalar must be in [1, n-1]"))?;
        let public_key = compressed_public_key(&secret);
        Ok(Self { secret, public_key })
    }

    /// Get the compressed public key
    pub fn public_key(&self) -> &[u8; P256_COMPRESSED_KEY_SIZE] {
        &self.public_key
    }

    /// Get the 32-byte big-endian private scalar
    pub fn private_key(&self) -> Zeroizing<[u8; P256_SCALAR_SIZE]> {
        let mut out = Zeroizing::new([0u8; P256_SCALAR_SIZE]);
        out.copy_from_slice(&self.secret.to_bytes());
        out
    }

    /// ECDH with a 33-byte compressed peer public key
    ///
    /// Returns the 32-byte big-endian x-coordinate of the product point.
    pub fn shared_secret(&self, peer_public_key: &[u8]) -> CryptoResult<SharedSecret> {
        if peer_public_key.len() != P256_COMPRESSED_KEY_SIZE {
            return Err(CryptoError::InvalidPeerKey("expected a 33-byte compressed point"));
        }
        let (x, y) = point::decompress(peer_public_key).map_err(|e| match e {
            CryptoError::NoSquareRoot => CryptoError::NoSquareRoot,
            _ => CryptoError::InvalidPeerKey("malformed compressed point"),
        })?;
        if point::is_infinity(&x, &y) {
            return Err(CryptoError::InvalidPeerKey("point at infinity"));
        }
        if !point::is_on_curve(&x, &y) {
            return Err(CryptoError::InvalidPeerKey("point not on curve"));
        }

        let encoded = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&x),
            FieldBytes::from_slice(&y),
            false,
        );
        let peer = Option::<p256::PublicKey>::from(p256::PublicKey::from_encoded_point(&encoded))
            .ok_or(CryptoError::InvalidPeerKey("point rejected by curve arithmetic"))?;

        let shared = p256::ecdh::diffie_hellman(self.secret.to_nonzero_scalar(), peer.as_affine());
        let mut out = [0u8; SHARED_SECRET_SIZE];
        out.copy_from_slice(shared.raw_secret_bytes());
        Ok(SharedSecret(out))
    }
}

impl fmt::Debug for P256KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("P256KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

fn compressed_public_key(secret: &p256::SecretKey) -> [u8; P256_COMPRESSED_KEY_SIZE] {
    let public = secret.public_key();
    let uncompressed = public.to_encoded_point(false);
    if let (Some(x), Some(y)) = (uncompressed.x(), uncompressed.y()) {
        if let Ok(compressed) = point::compress(x, y) {
            return compressed;
        }
    }
    // unreachable for a non-zero scalar
    let mut out = [0u8; P256_COMPRESSED_KEY_SIZE];
    out.copy_from_slice(public.to_encoded_point(true).as_bytes());
    out
}

/// Key pair for either profile
#[derive(Clone, Debug)]
pub enum EcKeyPair {
    /// Profile A key pair
    X25519(X25519KeyPair),
    /// Profile B key pair
    P256(P256KeyPair),
}

impl EcKeyPair {
    /// Generate a fresh key pair on the given curve
    pub fn generate<R: RngCore + CryptoRng>(curve: Curve, rng: &mut R) -> Self {
        match curve {
            Curve::X25519 => EcKeyPair::X25519(X25519KeyPair::generate(rng)),
            Curve::P256 => EcKeyPair::P256(P256KeyPair::generate(rng)),
        }
    }

    /// Import a raw private key
    pub fn from_private_bytes(curve: Curve, bytes: &[u8]) -> CryptoResult<Self> {
        Ok(match curve {
            Curve::X25519 => EcKeyPair::X25519(X25519KeyPair::from_private_bytes(bytes)?),
            Curve::P256 => EcKeyPair::P256(P256KeyPair::from_private_bytes(bytes)?),
        })
    }

    /// Import a hex-encoded private key
    pub fn from_private_hex(curve: Curve, hex_key: &str) -> CryptoResult<Self> {
        let bytes = Zeroizing::new(
            hex::decode(hex_key.trim())
                .map_err(|_| CryptoError::InvalidFormat("private key is not valid hex"))?,
        );
        Self::from_private_bytes(curve, &bytes)
    }

    /// Curve of this key pair
    pub fn curve(&self) -> Curve {
        match self {
            EcKeyPair::X25519(_) => Curve::X25519,
            EcKeyPair::P256(_) => Curve::P256,
        }
    }

    /// Encoded public key (32 raw bytes or 33-byte compressed point)
    pub fn public_key(&self) -> &[u8] {
        match self {
            EcKeyPair::X25519(pair) => pair.public_key(),
            EcKeyPair::P256(pair) => pair.public_key(),
        }
    }

    /// Private key bytes
    pub fn private_key(&self) -> Zeroizing<Vec<u8>> {
        match self {
            EcKeyPair::X25519(pair) => Zeroizing::new(pair.private_key().to_vec()),
            EcKeyPair::P256(pair) => Zeroizing::new(pair.private_key().to_vec()),
        }
    }

    /// Shared secret with a peer public key on the same curve
    pub fn shared_secret(&self, peer_public_key: &[u8]) -> CryptoResult<SharedSecret> {
        match self {
            EcKeyPair::X25519(pair) => pair.shared_secret(peer_public_key),
            EcKeyPair::P256(pair) => pair.shared_secret(peer_public_key),
        }
    }
}
