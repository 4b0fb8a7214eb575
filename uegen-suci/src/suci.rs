//! SUCI encoder
//!
//! Converts an IMSI-based SUPI into the SUCI string form
//! `suci-<type>-<mnc>-<mcc>-<ri>-<scheme>-<key id>-<scheme output>`
//! (TS 23.003 2.2B). Scheme output for Profile A and B is the hex of
//! `ephemeral public key || ciphertext || MAC tag` (TS 33.501 Annex C).

use std::fmt;

use rand::{CryptoRng, RngCore};
use tracing::{debug, warn, Span};
use uegen_common::config::DEFAULT_ROUTING_INDICATOR;
use uegen_common::{HexDump, OperatorConfig, Plmn, ProtectionScheme, SupiType};
use uegen_crypto::{conceal, CryptoError, Curve, EcKeyPair, EciesParams};

use crate::error::SuciError;

/// Identifier prefix of an already concealed identity
pub const SUCI_PREFIX: &str = "suci";

/// Maximum number of routing indicator digits
pub const MAX_ROUTING_INDICATOR_DIGITS: usize = 4;

/// SUCI fields in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suci {
    /// SUPI type (IMSI = 0)
    pub supi_type: SupiType,
    /// Mobile Country Code digits
    pub mcc: String,
    /// Mobile Network Code digits
    pub mnc: String,
    /// Routing indicator digits
    pub routing_indicator: String,
    /// Protection scheme id
    pub protection_scheme_id: u8,
    /// Home network public key id
    pub home_network_public_key_id: u8,
    /// Scheme output (MSIN digits for the null scheme, hex otherwise)
    pub scheme_output: String,
}

impl fmt::Display for Suci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}-{}-{}-{}",
            SUCI_PREFIX,
            self.supi_type.code(),
            self.mnc,
            self.mcc,
            self.routing_indicator,
            self.protection_scheme_id,
            self.home_network_public_key_id,
            self.scheme_output
        )
    }
}

enum Identifier<'a> {
    Concealed,
    Imsi(&'a str),
}

fn parse_identifier(supi: &str) -> Result<Identifier<'_>, SuciError> {
    let Some((prefix, value)) = supi.split_once('-') else {
        return Err(SuciError::UnsupportedIdentifierFormat(String::new()));
    };
    if prefix == SUCI_PREFIX {
        Ok(Identifier::Concealed)
    } else if prefix == SupiType::Imsi.prefix() {
        Ok(Identifier::Imsi(value))
    } else if prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        Err(SuciError::UnsupportedIdentifierFormat(prefix.to_string()))
    } else {
        // digits before the first '-' may belong to the subscriber
        Err(SuciError::UnsupportedIdentifierFormat(String::new()))
    }
}

fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn validate_plmn(plmn: &Plmn) -> Result<(), SuciError> {
    if !plmn.has_value() {
        return Err(SuciError::MissingConfiguration("PLMN MCC/MNC not configured"));
    }
    if !is_digits(&plmn.mcc, 2, 3) || !is_digits(&plmn.mnc, 2, 3) {
        return Err(SuciError::MissingConfiguration("PLMN MCC and MNC must be 2 or 3 digits"));
    }
    Ok(())
}

fn validate_routing_indicator(routing_indicator: &str) -> Result<(), SuciError> {
    if !is_digits(routing_indicator, 1, MAX_ROUTING_INDICATOR_DIGITS) {
        return Err(SuciError::MissingConfiguration("routing indicator must be 1 to 4 digits"));
    }
    Ok(())
}

struct ImsiParts<'a> {
    mcc: &'a str,
    mnc: &'a str,
    msin: &'a str,
}

/// Split IMSI digits (MCC first) using the configured MCC/MNC lengths.
fn split_imsi<'a>(digits: &'a str, plmn: &Plmn) -> Result<ImsiParts<'a>, SuciError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SuciError::MalformedIdentifier("IMSI must be numeric"));
    }
    let mcc_end = plmn.mcc.len();
    let mnc_end = mcc_end + plmn.mnc.len();
    if digits.len() <= mnc_end {
        return Err(SuciError::MalformedIdentifier("IMSI too short for the configured PLMN"));
    }
    Ok(ImsiParts {
        mcc: &digits[..mcc_end],
        mnc: &digits[mcc_end..mnc_end],
        msin: &digits[mnc_end..],
    })
}

/// MSIN digits as bytes, two digits per byte, odd length padded with `f`.
fn msin_bytes(msin: &str) -> Result<Vec<u8>, SuciError> {
    let decoded = if msin.len() % 2 == 1 {
        hex::decode(format!("{msin}f"))
    } else {
        hex::decode(msin)
    };
    decoded.map_err(|_| SuciError::MalformedIdentifier("MSIN is not decimal"))
}

fn ecies_profile(scheme_id: u8) -> Result<(Curve, EciesParams), SuciError> {
    match ProtectionScheme::from_id(scheme_id) {
        Some(ProtectionScheme::ProfileA) => Ok((Curve::X25519, EciesParams::PROFILE_A)),
        Some(ProtectionScheme::ProfileB) => Ok((Curve::P256, EciesParams::PROFILE_B)),
        _ => Err(SuciError::UnsupportedScheme(scheme_id)),
    }
}

struct Target<'a> {
    plmn: &'a Plmn,
    routing_indicator: &'a str,
    scheme_id: u8,
    public_key: &'a [u8],
    key_id: u8,
}

fn encode<F>(
    target: &Target<'_>,
    supi: &str,
    span: &Span,
    ephemeral: F,
) -> Result<String, SuciError>
where
    F: FnOnce(Curve) -> Result<EcKeyPair, CryptoError>,
{
    let digits = match parse_identifier(supi)? {
        Identifier::Concealed => {
            debug!(parent: span, "Identifier already concealed, passing through");
            return Ok(supi.to_string());
        }
        Identifier::Imsi(digits) => digits,
    };

    validate_plmn(target.plmn)?;
    validate_routing_indicator(target.routing_indicator)?;
    let parts = split_imsi(digits, target.plmn)?;
    if parts.mcc != target.plmn.mcc || parts.mnc != target.plmn.mnc {
        warn!(parent: span, plmn = %target.plmn, "IMSI does not start with the configured PLMN");
    }

    let (curve, params) = ecies_profile(target.scheme_id)?;
    let msin = msin_bytes(parts.msin)?;
    let ephemeral = ephemeral(curve)?;
    let output = conceal(&msin, target.public_key, &ephemeral, params)?;

    debug!(
        parent: span,
        scheme = target.scheme_id,
        key_id = target.key_id,
        %curve,
        ephemeral_public_key = %HexDump(&output.ephemeral_public_key),
        "SUPI concealed"
    );

    Ok(Suci {
        supi_type: SupiType::Imsi,
        mcc: parts.mcc.to_string(),
        mnc: parts.mnc.to_string(),
        routing_indicator: target.routing_indicator.to_string(),
        protection_scheme_id: target.scheme_id,
        home_network_public_key_id: target.key_id,
        scheme_output: output.to_hex(),
    }
    .to_string())
}

/// Conceal a SUPI with a fresh ephemeral key from `rng`.
///
/// `suci-...` inputs are returned unchanged. The routing indicator is
/// `0000`; use [`SuciEncoder`] to configure another one.
///
/// # Errors
/// * `UnsupportedIdentifierFormat` - prefix other than `imsi` or `suci`
/// * `MissingConfiguration` - PLMN empty or not 2-3 digits each
/// * `MalformedIdentifier` - IMSI not numeric or no MSIN digits left
/// * `UnsupportedScheme` - scheme id other than 1 or 2, checked before
///   the RNG is used
/// * `Crypto` - key agreement or cipher failure
pub fn conceal_identifier<R: RngCore + CryptoRng>(
    rng: &mut R,
    supi: &str,
    scheme: u8,
    plmn: &Plmn,
    home_network_public_key: &[u8],
    home_network_public_key_id: u8,
) -> Result<String, SuciError> {
    let target = Target {
        plmn,
        routing_indicator: DEFAULT_ROUTING_INDICATOR,
        scheme_id: scheme,
        public_key: home_network_public_key,
        key_id: home_network_public_key_id,
    };
    encode(&target, supi, &Span::current(), |curve| {
        Ok(EcKeyPair::generate(curve, rng))
    })
}

/// [`conceal_identifier`] with a fixed ephemeral private key.
///
/// Reproduces published test vectors. Never reuse an ephemeral key outside tests.
#[cfg(any(test, feature = "test-vectors"))]
pub fn conceal_identifier_with_ephemeral(
    supi: &str,
    scheme: u8,
    plmn: &Plmn,
    home_network_public_key: &[u8],
    home_network_public_key_id: u8,
    ephemeral_private_key: &[u8],
) -> Result<String, SuciError> {
    let target = Target {
        plmn,
        routing_indicator: DEFAULT_ROUTING_INDICATOR,
        scheme_id: scheme,
        public_key: home_network_public_key,
        key_id: home_network_public_key_id,
    };
    encode(&target, supi, &Span::current(), |curve| {
        EcKeyPair::from_private_bytes(curve, ephemeral_private_key)
    })
}

/// Null-scheme SUCI: the MSIN digits in clear, scheme and key id 0.
///
/// `suci-...` inputs are returned unchanged.
pub fn null_scheme_suci(
    supi: &str,
    plmn: &Plmn,
    routing_indicator: &str,
) -> Result<String, SuciError> {
    let digits = match parse_identifier(supi)? {
        Identifier::Concealed => return Ok(supi.to_string()),
        Identifier::Imsi(digits) => digits,
    };
    validate_plmn(plmn)?;
    validate_routing_indicator(routing_indicator)?;
    let parts = split_imsi(digits, plmn)?;

    Ok(Suci {
        supi_type: SupiType::Imsi,
        mcc: parts.mcc.to_string(),
        mnc: parts.mnc.to_string(),
        routing_indicator: routing_indicator.to_string(),
        protection_scheme_id: ProtectionScheme::Null.id(),
        home_network_public_key_id: 0,
        scheme_output: parts.msin.to_string(),
    }
    .to_string())
}

/// SUCI encoder bound to one home network key.
///
/// Immutable after construction and shareable across threads; each call
/// brings its own RNG. Diagnostics are emitted under the span set with
/// [`SuciEncoder::with_span`].
#[derive(Debug, Clone)]
pub struct SuciEncoder {
    plmn: Plmn,
    routing_indicator: String,
    scheme: ProtectionScheme,
    home_network_public_key: Vec<u8>,
    home_network_public_key_id: u8,
    span: Span,
}

impl SuciEncoder {
    /// Creates an encoder with the default routing indicator.
    pub fn new(
        plmn: Plmn,
        scheme: ProtectionScheme,
        home_network_public_key: Vec<u8>,
        home_network_public_key_id: u8,
    ) -> Self {
        Self {
            plmn,
            routing_indicator: DEFAULT_ROUTING_INDICATOR.to_string(),
            scheme,
            home_network_public_key,
            home_network_public_key_id,
            span: Span::none(),
        }
    }

    /// Creates an encoder from the operator's key for `scheme`.
    pub fn from_config(
        config: &OperatorConfig,
        scheme: ProtectionScheme,
    ) -> Result<Self, SuciError> {
        let profile = config
            .profile_for(scheme)
            .ok_or(SuciError::MissingConfiguration("no home network key for protection scheme"))?;
        let public_key = profile.public_key_bytes()?;
        Ok(Self::new(config.plmn.clone(), scheme, public_key, profile.key_id())
            .with_routing_indicator(config.routing_indicator()))
    }

    /// Overrides the routing indicator.
    pub fn with_routing_indicator(mut self, routing_indicator: impl Into<String>) -> Self {
        self.routing_indicator = routing_indicator.into();
        self
    }

    /// Parent span for diagnostic events.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Protection scheme
    pub fn scheme(&self) -> ProtectionScheme {
        self.scheme
    }

    /// Home network public key id
    pub fn home_network_public_key_id(&self) -> u8 {
        self.home_network_public_key_id
    }

    /// Routing indicator
    pub fn routing_indicator(&self) -> &str {
        &self.routing_indicator
    }

    fn target(&self) -> Target<'_> {
        Target {
            plmn: &self.plmn,
            routing_indicator: &self.routing_indicator,
            scheme_id: self.scheme.id(),
            public_key: &self.home_network_public_key,
            key_id: self.home_network_public_key_id,
        }
    }

    /// Conceal a SUPI with a fresh ephemeral key from `rng`.
    pub fn conceal<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        supi: &str,
    ) -> Result<String, SuciError> {
        encode(&self.target(), supi, &self.span, |curve| {
            Ok(EcKeyPair::generate(curve, rng))
        })
    }

    /// Conceal with a fixed ephemeral private key (test vectors only).
    #[cfg(any(test, feature = "test-vectors"))]
    pub fn conceal_with_ephemeral(
        &self,
        supi: &str,
        ephemeral_private_key: &[u8],
    ) -> Result<String, SuciError> {
        encode(&self.target(), supi, &self.span, |curve| {
            EcKeyPair::from_private_bytes(curve, ephemeral_private_key)
        })
    }
}
