//! UE profile generation
//!
//! An [`Operator`] wraps the operator configuration and mints subscriber
//! profiles: a random IMSI under the home PLMN, its SUCI under one of the
//! configured home network keys, fresh subscriber credentials and the UE
//! defaults (slices, sessions, algorithms) copied from the configuration.

use std::fmt;

use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uegen_common::{
    HomeNetworkProfile, OpType, OperatorConfig, Plmn, ProtectionScheme, SNssai, SessionConfig,
    IntegrityMaxRate, SupportedAlgs, SupiType, UacAcc, UacAic,
};

use crate::error::SuciError;
use crate::suci::{null_scheme_suci, validate_plmn, SuciEncoder};

/// IMSI length in digits (MCC + MNC + MSIN)
pub const IMSI_LENGTH: usize = 15;

/// IMEI length in digits
pub const IMEI_LENGTH: usize = 15;

/// IMEISV length in digits
pub const IMEISV_LENGTH: usize = 16;

/// Subscriber key (K) and OP/OPc size in bytes
pub const SUBSCRIBER_KEY_SIZE: usize = 16;

/// Generated UE subscriber profile
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UeProfile {
    /// SUPI (`imsi-<mcc><mnc><msin>`)
    pub supi: String,
    /// SUCI concealed with the selected home network key
    pub suci: String,
    /// Home PLMN
    pub plmn: Plmn,
    /// Routing indicator
    pub routing_indicator: String,
    /// Protection scheme used for the SUCI
    pub protection_scheme: ProtectionScheme,
    /// Home network public key (hex)
    pub home_network_public_key: String,
    /// Home network public key id
    pub home_network_public_key_id: u8,
    /// Subscriber key K (hex)
    pub key: String,
    /// OP or OPc value (hex)
    pub op: String,
    /// Whether `op` holds OP or OPc
    pub op_type: OpType,
    /// Authentication Management Field (hex)
    pub amf: String,
    /// IMEI digits
    pub imei: String,
    /// IMEISV digits
    pub imeisv: String,
    /// gNB addresses to search
    pub gnb_search_list: Vec<String>,
    /// Configured NSSAI
    pub configured_nssai: Vec<SNssai>,
    /// Default NSSAI
    pub default_nssai: Vec<SNssai>,
    /// Default PDU sessions
    pub sessions: Vec<SessionConfig>,
    /// Supported integrity algorithms
    pub integrity: SupportedAlgs,
    /// Supported ciphering algorithms
    pub ciphering: SupportedAlgs,
    /// UAC access identities
    #[serde(default)]
    pub uac_aic: UacAic,
    /// UAC access categories
    #[serde(default)]
    pub uac_acc: UacAcc,
    /// Integrity protection maximum data rate
    #[serde(default)]
    pub integrity_max_rate: IntegrityMaxRate,
    /// Creation time (seconds since the Unix epoch)
    pub created_at: u64,
}

impl fmt::Debug for UeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UeProfile")
            .field("supi", &self.supi)
            .field("suci", &self.suci)
            .field("plmn", &self.plmn)
            .field("protection_scheme", &self.protection_scheme)
            .field("home_network_public_key_id", &self.home_network_public_key_id)
            .field("key", &"<redacted>")
            .field("op", &"<redacted>")
            .field("op_type", &self.op_type)
            .field("imei", &self.imei)
            .finish_non_exhaustive()
    }
}

struct KeySlot {
    profile: HomeNetworkProfile,
    // None for the null scheme
    encoder: Option<SuciEncoder>,
}

/// UE profile generator for one operator
#[derive(Debug)]
pub struct Operator {
    config: OperatorConfig,
    slots: Vec<KeySlot>,
}

impl fmt::Debug for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySlot")
            .field("profile", &self.profile)
            .field("encoder", &self.encoder.is_some())
            .finish()
    }
}

impl Operator {
    /// Creates an operator, decoding every configured home network key.
    pub fn new(config: OperatorConfig) -> Result<Self, SuciError> {
        validate_plmn(&config.plmn)?;

        let mut slots = Vec::with_capacity(config.profiles.len());
        for profile in &config.profiles {
            let encoder = if profile.scheme.is_ecies() {
                let encoder = SuciEncoder::new(
                    config.plmn.clone(),
                    profile.scheme,
                    profile.public_key_bytes()?,
                    profile.key_id(),
                )
                .with_routing_indicator(config.routing_indicator());
                Some(encoder)
            } else {
                None
            };
            slots.push(KeySlot {
                profile: profile.clone(),
                encoder,
            });
        }

        info!(
            "Operator {} ready with {} home network key(s)",
            config.plmn,
            slots.len()
        );
        Ok(Self { config, slots })
    }

    /// Operator configuration
    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    /// Generate one UE profile.
    ///
    /// # Errors
    /// `MissingConfiguration` when no home network key is configured, and
    /// any error from concealing the generated SUPI.
    pub fn generate_ue<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<UeProfile, SuciError> {
        if self.slots.is_empty() {
            return Err(SuciError::MissingConfiguration("operator has no home network keys"));
        }

        let supi = self.random_supi(rng)?;
        let slot = &self.slots[rng.gen_range(0..self.slots.len())];
        let suci = match &slot.encoder {
            Some(encoder) => encoder.conceal(rng, &supi)?,
            None => null_scheme_suci(&supi, &self.config.plmn, self.config.routing_indicator())?,
        };

        let op_type = if rng.gen_bool(0.5) { OpType::Op } else { OpType::Opc };
        let profile = UeProfile {
            supi,
            suci,
            plmn: self.config.plmn.clone(),
            routing_indicator: self.config.routing_indicator().to_string(),
            protection_scheme: slot.profile.scheme,
            home_network_public_key: slot.profile.public_key.clone(),
            home_network_public_key_id: slot.profile.key_id(),
            key: random_hex_key(rng),
            op: random_hex_key(rng),
            op_type,
            amf: self.config.amf.clone(),
            imei: random_digits(rng, IMEI_LENGTH),
            imeisv: random_digits(rng, IMEISV_LENGTH),
            gnb_search_list: self.config.gnb_search_list.clone(),
            configured_nssai: self.config.configured_nssai.clone(),
            default_nssai: self.config.default_nssai.clone(),
            sessions: self.config.sessions.clone(),
            integrity: self.config.integrity,
            ciphering: self.config.ciphering,
            uac_aic: self.config.uac_aic,
            uac_acc: self.config.uac_acc,
            integrity_max_rate: self.config.integrity_max_rate,
            created_at: timestamp_now(),
        };

        debug!(
            scheme = %profile.protection_scheme,
            key_id = profile.home_network_public_key_id,
            "Generated UE profile"
        );
        Ok(profile)
    }

    /// Generate `count` UE profiles, stopping at the first error.
    pub fn generate_ues<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<UeProfile>, SuciError> {
        let profiles = (0..count)
            .map(|_| self.generate_ue(rng))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Generated {} UE profile(s)", profiles.len());
        Ok(profiles)
    }

    fn random_supi<R: RngCore>(&self, rng: &mut R) -> Result<String, SuciError> {
        let plmn = &self.config.plmn;
        let msin_len = IMSI_LENGTH
            .checked_sub(plmn.mcc.len() + plmn.mnc.len())
            .filter(|len| *len > 0)
            .ok_or(SuciError::MissingConfiguration("PLMN leaves no room for an MSIN"))?;
        Ok(format!(
            "{}-{}{}{}",
            SupiType::Imsi.prefix(),
            plmn.mcc,
            plmn.mnc,
            random_digits(rng, msin_len)
        ))
    }
}

fn random_digits<R: RngCore>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn random_hex_key<R: RngCore>(rng: &mut R) -> String {
    let mut key = [0u8; SUBSCRIBER_KEY_SIZE];
    rng.fill_bytes(&mut key);
    hex::encode(key)
}

fn timestamp_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
