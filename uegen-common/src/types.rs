//! Core 5G identifier types: PLMN, SUPI type, S-NSSAI and the SUCI protection scheme.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Public Land Mobile Network identifier.
///
/// Kept as the configured digit strings rather than integers: the SUCI
/// encoder splits an IMSI by the exact lengths of these strings, so a
/// leading zero (MCC `001`, MNC `01`) is significant.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile Country Code digits
    pub mcc: String,
    /// Mobile Network Code digits
    pub mnc: String,
}

impl Plmn {
    /// Creates a new PLMN from its MCC and MNC digit strings.
    pub fn new(mcc: impl Into<String>, mnc: impl Into<String>) -> Self {
        Self {
            mcc: mcc.into(),
            mnc: mnc.into(),
        }
    }

    /// Returns true if both MCC and MNC are set.
    pub fn has_value(&self) -> bool {
        !self.mcc.is_empty() && !self.mnc.is_empty()
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({}-{})", self.mcc, self.mnc)
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mcc, self.mnc)
    }
}

/// Single Network Slice Selection Assistance Information.
///
/// Standard SST values (3GPP TS 23.501):
/// - 1: eMBB
/// - 2: URLLC
/// - 3: MIoT
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SNssai {
    /// Slice/Service Type (8-bit)
    pub sst: u8,
    /// Slice Differentiator (optional 24-bit value)
    #[serde(default)]
    pub sd: Option<u32>,
}

impl SNssai {
    /// Creates a new S-NSSAI with only SST (no SD).
    pub const fn new(sst: u8) -> Self {
        Self { sst, sd: None }
    }

    /// Creates a new S-NSSAI with SST and SD (only the lower 24 bits are kept).
    pub const fn with_sd(sst: u8, sd: u32) -> Self {
        Self {
            sst,
            sd: Some(sd & 0x00FF_FFFF),
        }
    }
}

impl fmt::Debug for SNssai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sd {
            Some(sd) => write!(f, "SNssai(sst={}, sd={:06X})", self.sst, sd),
            None => write!(f, "SNssai(sst={})", self.sst),
        }
    }
}

impl fmt::Display for SNssai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sd {
            Some(sd) => write!(f, "{}-{:06X}", self.sst, sd),
            None => write!(f, "{}", self.sst),
        }
    }
}

/// SUPI type enumeration.
///
/// Defines the type of Subscription Permanent Identifier per 3GPP TS 23.003.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupiType {
    /// International Mobile Subscriber Identity (IMSI-based SUPI)
    Imsi,
    /// Network Access Identifier (NAI-based SUPI)
    Nai,
}

impl SupiType {
    /// Returns the string prefix for this SUPI type.
    pub fn prefix(&self) -> &'static str {
        match self {
            SupiType::Imsi => "imsi",
            SupiType::Nai => "nai",
        }
    }

    /// Returns the SUPI type value carried in the SUCI (TS 24.501 9.11.3.4).
    pub fn code(&self) -> u8 {
        match self {
            SupiType::Imsi => 0,
            SupiType::Nai => 1,
        }
    }
}

impl fmt::Display for SupiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// SUCI protection scheme identifier (TS 33.501 Annex C).
///
/// Serialized as its numeric scheme id in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProtectionScheme {
    /// Null scheme: the MSIN is sent in clear
    Null,
    /// ECIES Profile A (Curve25519)
    ProfileA,
    /// ECIES Profile B (secp256r1)
    ProfileB,
}

impl ProtectionScheme {
    /// Returns the scheme for a protection scheme id, if it is one of 0, 1 or 2.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(ProtectionScheme::Null),
            1 => Some(ProtectionScheme::ProfileA),
            2 => Some(ProtectionScheme::ProfileB),
            _ => None,
        }
    }

    /// Returns the protection scheme id carried in the SUCI.
    pub fn id(&self) -> u8 {
        match self {
            ProtectionScheme::Null => 0,
            ProtectionScheme::ProfileA => 1,
            ProtectionScheme::ProfileB => 2,
        }
    }

    /// Returns true if this scheme runs ECIES concealment.
    pub fn is_ecies(&self) -> bool {
        !matches!(self, ProtectionScheme::Null)
    }
}

impl TryFrom<u8> for ProtectionScheme {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id)
            .ok_or_else(|| Error::Config(format!("unsupported protection scheme id: {id}")))
    }
}

impl From<ProtectionScheme> for u8 {
    fn from(scheme: ProtectionScheme) -> Self {
        scheme.id()
    }
}

impl fmt::Display for ProtectionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtectionScheme::Null => write!(f, "null"),
            ProtectionScheme::ProfileA => write!(f, "profile-a"),
            ProtectionScheme::ProfileB => write!(f, "profile-b"),
        }
    }
}
