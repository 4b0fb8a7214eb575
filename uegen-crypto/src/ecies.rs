//! ECIES concealment of the MSIN (TS 33.501 Annex C.3)
//!
//! The sending side only: key agreement with the home network public key,
//! X9.63 key derivation, AES-128-CTR encryption and a truncated
//! HMAC-SHA-256 over the ciphertext.

use std::fmt;

use aes::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::ecdh::EcKeyPair;
use crate::error::{CryptoError, CryptoResult};
use crate::kdf::{derive_key_material, DerivedKeyMaterial, EciesParams};

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// Encrypted MSIN and its truncated MAC tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedMsin {
    /// AES-128-CTR ciphertext, same length as the MSIN bytes
    pub ciphertext: Vec<u8>,
    /// Leading bytes of HMAC-SHA-256 over the ciphertext
    pub mac_tag: Vec<u8>,
}

/// ECIES scheme output carried in the SUCI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeOutput {
    /// Ephemeral public key (32 bytes for Profile A, 33 for Profile B)
    pub ephemeral_public_key: Vec<u8>,
    /// Encrypted MSIN
    pub ciphertext: Vec<u8>,
    /// Truncated MAC tag
    pub mac_tag: Vec<u8>,
}

impl SchemeOutput {
    /// Concatenated `ephemeral public key || ciphertext || tag`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.ephemeral_public_key.len() + self.ciphertext.len() + self.mac_tag.len(),
        );
        out.extend_from_slice(&self.ephemeral_public_key);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.mac_tag);
        out
    }

    /// Lowercase hex of [`SchemeOutput::to_bytes`]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Split a received scheme output given the public key and tag lengths
    #[cfg(any(test, feature = "test-vectors"))]
    pub fn from_bytes(
        bytes: &[u8],
        public_key_len: usize,
        mac_tag_len: usize,
    ) -> CryptoResult<Self> {
        if bytes.len() < public_key_len + mac_tag_len {
            return Err(CryptoError::InvalidFormat("scheme output too short"));
        }
        let ciphertext_end = bytes.len() - mac_tag_len;
        Ok(Self {
            ephemeral_public_key: bytes[..public_key_len].to_vec(),
            ciphertext: bytes[public_key_len..ciphertext_end].to_vec(),
            mac_tag: bytes[ciphertext_end..].to_vec(),
        })
    }
}

impl fmt::Display for SchemeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn apply_keystream(data: &mut [u8], keys: &DerivedKeyMaterial) -> CryptoResult<()> {
    let mut cipher = Aes128Ctr::new_from_slices(keys.enc_key(), keys.icb())
        .map_err(|_| CryptoError::CipherFailure("AES-128-CTR key or counter block length"))?;
    cipher.apply_keystream(data);
    Ok(())
}

fn mac(ciphertext: &[u8], keys: &DerivedKeyMaterial) -> CryptoResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(keys.mac_key())
        .map_err(|_| CryptoError::CipherFailure("HMAC-SHA-256 key length"))?;
    mac.update(ciphertext);
    Ok(mac)
}

/// Encrypt-then-MAC the MSIN bytes
pub fn protect(msin: &[u8], keys: &DerivedKeyMaterial) -> CryptoResult<ProtectedMsin> {
    let mut ciphertext = msin.to_vec();
    apply_keystream(&mut ciphertext, keys)?;

    let tag = mac(&ciphertext, keys)?.finalize().into_bytes();
    let tag_len = keys.params().mac_tag_len().min(tag.len());

    Ok(ProtectedMsin {
        ciphertext,
        mac_tag: tag[..tag_len].to_vec(),
    })
}

/// Conceal the MSIN bytes for a home network public key
///
/// `ephemeral` must be a fresh key pair on the home network key's curve.
pub fn conceal(
    msin: &[u8],
    home_network_public_key: &[u8],
    ephemeral: &EcKeyPair,
    params: EciesParams,
) -> CryptoResult<SchemeOutput> {
    let shared = ephemeral.shared_secret(home_network_public_key)?;
    let keys = derive_key_material(shared.as_bytes(), ephemeral.public_key(), params);
    let protected = protect(msin, &keys)?;

    Ok(SchemeOutput {
        ephemeral_public_key: ephemeral.public_key().to_vec(),
        ciphertext: protected.ciphertext,
        mac_tag: protected.mac_tag,
    })
}

/// Home network side: verify the tag and decrypt a scheme output
#[cfg(any(test, feature = "test-vectors"))]
pub fn reveal(
    output: &SchemeOutput,
    home_network: &EcKeyPair,
    params: EciesParams,
) -> CryptoResult<Vec<u8>> {
    let shared = home_network.shared_secret(&output.ephemeral_public_key)?;
    let keys = derive_key_material(shared.as_bytes(), &output.ephemeral_public_key, params);

    mac(&output.ciphertext, &keys)?
        .verify_truncated_left(&output.mac_tag)
        .map_err(|_| CryptoError::CipherFailure("MAC tag mismatch"))?;

    let mut plaintext = output.ciphertext.clone();
    apply_keystream(&mut plaintext, &keys)?;
    Ok(plaintext)
}
