//! ANSI X9.63 key derivation for the ECIES profiles
//!
//! Round `i` (counting from 1) hashes `Z || be_u32(i) || SharedInfo` with
//! SHA-256. For SUCI concealment `Z` is the ECDH shared secret and
//! `SharedInfo` is the ephemeral public key (TS 33.501 C.3.2). The output is
//! split as `[encryption key | initial counter block | MAC key]`.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// SHA-256 digest size in bytes
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Lengths used by one ECIES profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EciesParams {
    enc_key_len: usize,
    icb_len: usize,
    mac_key_len: usize,
    mac_tag_len: usize,
    hash_len: usize,
}

impl EciesParams {
    /// Profile A (Curve25519): AES-128, 128-bit ICB, HMAC-SHA-256 key, 64-bit tag
    pub const PROFILE_A: Self = Self::new(16, 16, 32, 8, SHA256_DIGEST_SIZE);

    /// Profile B (secp256r1): same symmetric lengths as Profile A
    pub const PROFILE_B: Self = Self::new(16, 16, 32, 8, SHA256_DIGEST_SIZE);

    const fn new(
        enc_key_len: usize,
        icb_len: usize,
        mac_key_len: usize,
        mac_tag_len: usize,
        hash_len: usize,
    ) -> Self {
        Self {
            enc_key_len,
            icb_len,
            mac_key_len,
            mac_tag_len,
            hash_len,
        }
    }

    /// Encryption key length in bytes
    pub fn enc_key_len(&self) -> usize {
        self.enc_key_len
    }

    /// Initial counter block length in bytes
    pub fn icb_len(&self) -> usize {
        self.icb_len
    }

    /// MAC key length in bytes
    pub fn mac_key_len(&self) -> usize {
        self.mac_key_len
    }

    /// Truncated MAC tag length in bytes
    pub fn mac_tag_len(&self) -> usize {
        self.mac_tag_len
    }

    /// KDF hash output length in bytes
    pub fn hash_len(&self) -> usize {
        self.hash_len
    }

    /// Number of KDF rounds: ceil((encKeyLen + macKeyLen) / hashLen)
    pub fn rounds(&self) -> usize {
        (self.enc_key_len + self.mac_key_len).div_ceil(self.hash_len)
    }

    /// Total derived length: rounds * hashLen
    pub fn key_material_len(&self) -> usize {
        self.rounds() * self.hash_len
    }
}

/// X9.63 KDF with SHA-256, truncated to `len` bytes
pub fn x963_kdf(secret: &[u8], shared_info: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let rounds = len.div_ceil(SHA256_DIGEST_SIZE);
    let mut output = Zeroizing::new(Vec::with_capacity(rounds * SHA256_DIGEST_SIZE));
    for counter in 1..=rounds as u32 {
        let mut hasher = Sha256::new();
        hasher.update(secret);
        hasher.update(counter.to_be_bytes());
        hasher.update(shared_info);
        output.extend_from_slice(&hasher.finalize());
    }
    output.truncate(len);
    output
}

/// Key material for one concealment call, wiped on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyMaterial {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    params: EciesParams,
}

impl DerivedKeyMaterial {
    /// AES-128 key
    pub fn enc_key(&self) -> &[u8] {
        &self.bytes[..self.params.enc_key_len]
    }

    /// AES-CTR initial counter block
    pub fn icb(&self) -> &[u8] {
        let start = self.params.enc_key_len;
        &self.bytes[start..start + self.params.icb_len]
    }

    /// HMAC-SHA-256 key
    pub fn mac_key(&self) -> &[u8] {
        let start = self.params.enc_key_len + self.params.icb_len;
        &self.bytes[start..start + self.params.mac_key_len]
    }

    /// Profile lengths this material was derived for
    pub fn params(&self) -> &EciesParams {
        &self.params
    }

    /// Full derived byte string
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeyMaterial")
            .field("len", &self.bytes.len())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Derive the `[encKey | icb | macKey]` block from a shared secret
///
/// The ephemeral public key is used as SharedInfo.
pub fn derive_key_material(
    shared_secret: &[u8],
    ephemeral_public_key: &[u8],
    params: EciesParams,
) -> DerivedKeyMaterial {
    let material = x963_kdf(shared_secret, ephemeral_public_key, params.key_material_len());
    DerivedKeyMaterial {
        bytes: material.to_vec(),
        params,
    }
}
