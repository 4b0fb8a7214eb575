//! Operator configuration
//!
//! The operator configuration holds everything the profile generator and the
//! SUCI encoder need from the outside world: the home PLMN, the home network
//! public keys per protection scheme, and the UE defaults copied into every
//! generated profile.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Plmn, ProtectionScheme, SNssai};

/// Default routing indicator when the configuration does not set one.
pub const DEFAULT_ROUTING_INDICATOR: &str = "0000";

/// Operator key type for authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OpType {
    /// Operator key (OP) - needs to be converted to OPc
    #[serde(rename = "OP")]
    Op,
    /// Operator key derived (OPc) - used directly
    #[default]
    #[serde(rename = "OPC")]
    Opc,
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpType::Op => write!(f, "OP"),
            OpType::Opc => write!(f, "OPC"),
        }
    }
}

/// Supported NAS security algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedAlgs {
    /// NIA1 (SNOW3G-based integrity)
    pub nia1: bool,
    /// NIA2 (AES-based integrity)
    pub nia2: bool,
    /// NIA3 (ZUC-based integrity)
    pub nia3: bool,
    /// NEA1 (SNOW3G-based ciphering)
    pub nea1: bool,
    /// NEA2 (AES-based ciphering)
    pub nea2: bool,
    /// NEA3 (ZUC-based ciphering)
    pub nea3: bool,
}

impl Default for SupportedAlgs {
    fn default() -> Self {
        Self {
            nia1: true,
            nia2: true,
            nia3: true,
            nea1: true,
            nea2: true,
            nea3: true,
        }
    }
}

/// PDU session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PduSessionType {
    /// IPv4 PDU session
    #[default]
    #[serde(rename = "IPv4")]
    Ipv4,
    /// IPv6 PDU session
    #[serde(rename = "IPv6")]
    Ipv6,
    /// IPv4v6 (dual-stack) PDU session
    #[serde(rename = "IPv4v6")]
    Ipv4v6,
}

/// Default PDU session for generated UE profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// PDU session type
    #[serde(rename = "type", default)]
    pub session_type: PduSessionType,
    /// Data network name
    #[serde(default)]
    pub apn: Option<String>,
    /// S-NSSAI for the session (optional)
    #[serde(default)]
    pub slice: Option<SNssai>,
}

/// Unified access control access identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UacAic {
    /// Multimedia priority service
    #[serde(default)]
    pub mps: bool,
    /// Mission critical service
    #[serde(default)]
    pub mcs: bool,
}

/// Unified access control access categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UacAcc {
    /// Normal access class (0-9)
    #[serde(default)]
    pub normal_class: u8,
    /// Access class 11
    #[serde(default)]
    pub class11: bool,
    /// Access class 12
    #[serde(default)]
    pub class12: bool,
    /// Access class 13
    #[serde(default)]
    pub class13: bool,
    /// Access class 14
    #[serde(default)]
    pub class14: bool,
    /// Access class 15
    #[serde(default)]
    pub class15: bool,
}

/// Maximum data rate for user-plane integrity protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MaxDataRate {
    /// Full data rate
    #[default]
    #[serde(rename = "full")]
    Full,
    /// 64 kbps
    #[serde(rename = "64kbps")]
    SixtyFourKbps,
}

/// Integrity protection maximum data rate per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IntegrityMaxRate {
    /// Uplink rate
    #[serde(default)]
    pub uplink: MaxDataRate,
    /// Downlink rate
    #[serde(default)]
    pub downlink: MaxDataRate,
}

/// Home network key material for one protection scheme.
///
/// Only the public half is read; any `private_key` entry in the YAML is
/// ignored and never serialized back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeNetworkProfile {
    /// Protection scheme this key belongs to
    pub scheme: ProtectionScheme,
    /// Home network public key (hex)
    pub public_key: String,
    /// Home network public key identifier (defaults to the scheme id)
    #[serde(default)]
    pub key_id: Option<u8>,
}

impl HomeNetworkProfile {
    /// Creates a profile entry with the key id defaulting to the scheme id.
    pub fn new(scheme: ProtectionScheme, public_key: impl Into<String>) -> Self {
        Self {
            scheme,
            public_key: public_key.into(),
            key_id: None,
        }
    }

    /// Returns the home network public key identifier.
    pub fn key_id(&self) -> u8 {
        self.key_id.unwrap_or_else(|| self.scheme.id())
    }

    /// Decodes the hex public key.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(hex::decode(self.public_key.trim())?)
    }
}

/// Operator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Home PLMN
    pub plmn: Plmn,
    /// Authentication Management Field (hex, 16-bit)
    #[serde(default = "default_amf")]
    pub amf: String,
    /// Routing indicator (optional, defaults to "0000")
    #[serde(default)]
    pub routing_indicator: Option<String>,
    /// Home network keys, one per protection scheme
    #[serde(default)]
    pub profiles: Vec<HomeNetworkProfile>,
    /// List of gNB addresses to search for
    #[serde(default)]
    pub gnb_search_list: Vec<String>,
    /// Configured NSSAI
    #[serde(default)]
    pub configured_nssai: Vec<SNssai>,
    /// Default NSSAI
    #[serde(default)]
    pub default_nssai: Vec<SNssai>,
    /// Default PDU sessions
    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
    /// Supported integrity algorithms
    #[serde(default)]
    pub integrity: SupportedAlgs,
    /// Supported ciphering algorithms
    #[serde(default)]
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
}

fn default_amf() -> String {
    "8000".to_string()
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            plmn: Plmn::default(),
            amf: default_amf(),
            routing_indicator: None,
            profiles: Vec::new(),
            gnb_search_list: Vec::new(),
            configured_nssai: Vec::new(),
            default_nssai: Vec::new(),
            sessions: Vec::new(),
            integrity: SupportedAlgs::default(),
            ciphering: SupportedAlgs::default(),
            uac_aic: UacAic::default(),
            uac_acc: UacAcc::default(),
            integrity_max_rate: IntegrityMaxRate::default(),
        }
    }
}

impl OperatorConfig {
    /// Returns the configured routing indicator or the "0000" default.
    pub fn routing_indicator(&self) -> &str {
        self.routing_indicator
            .as_deref()
            .unwrap_or(DEFAULT_ROUTING_INDICATOR)
    }

    /// Looks up the home network key configured for a protection scheme.
    pub fn profile_for(&self, scheme: ProtectionScheme) -> Option<&HomeNetworkProfile> {
        self.profiles.iter().find(|p| p.scheme == scheme)
    }

    /// Parses an operator configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use uegen_common::OperatorConfig;
    ///
    /// let yaml = r#"
    /// plmn:
    ///   mcc: "001"
    ///   mnc: "01"
    /// profiles:
    ///   - scheme: 1
    ///     public_key: 5a8d38864820197c3394b92613b20b91633cbd897119273bf8e4a6f4eec0a650
    /// "#;
    ///
    /// let config = OperatorConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.plmn.mcc, "001");
    /// assert_eq!(config.routing_indicator(), "0000");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads an operator configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the operator configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
