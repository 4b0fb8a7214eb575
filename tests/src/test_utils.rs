//! Test utility functions for integration tests
//!
//! Provides logging setup, SUCI parsing and the home network side of the
//! concealment scheme used to check round trips.

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::{fmt, EnvFilter};
use uegen_common::{ProtectionScheme, SupiType};
use uegen_crypto::{reveal, Curve, EcKeyPair, EciesParams, SchemeOutput};
use uegen_suci::Suci;

/// Result type for integration tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize logging for tests
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "debug"
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Reproducible CSPRNG for a test
pub fn test_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Fresh per-process directory under the system temp dir
pub fn unique_temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("uegen_it_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Split a SUCI string into its fields
pub fn parse_suci(suci: &str) -> TestResult<Suci> {
    let fields: Vec<&str> = suci.splitn(8, '-').collect();
    if fields.len() != 8 || fields[0] != "suci" {
        return Err(format!("not a SUCI: {suci}").into());
    }
    let supi_type = match fields[1] {
        "0" => SupiType::Imsi,
        "1" => SupiType::Nai,
        other => return Err(format!("unknown SUPI type {other}").into()),
    };
    Ok(Suci {
        supi_type,
        mnc: fields[2].to_string(),
        mcc: fields[3].to_string(),
        routing_indicator: fields[4].to_string(),
        protection_scheme_id: fields[5].parse()?,
        home_network_public_key_id: fields[6].parse()?,
        scheme_output: fields[7].to_string(),
    })
}

/// Home network side: verify the tag and decrypt the MSIN bytes of a SUCI
pub fn reveal_msin(suci: &str, home_network_private_key: &str) -> TestResult<Vec<u8>> {
    let suci = parse_suci(suci)?;
    let (curve, params) = match ProtectionScheme::from_id(suci.protection_scheme_id) {
        Some(ProtectionScheme::ProfileA) => (Curve::X25519, EciesParams::PROFILE_A),
        Some(ProtectionScheme::ProfileB) => (Curve::P256, EciesParams::PROFILE_B),
        _ => return Err(format!("scheme {} is not ECIES", suci.protection_scheme_id).into()),
    };

    let bytes = hex::decode(&suci.scheme_output)?;
    let output = SchemeOutput::from_bytes(&bytes, curve.public_key_len(), params.mac_tag_len())?;
    let home_network = EcKeyPair::from_private_hex(curve, home_network_private_key)?;
    Ok(reveal(&output, &home_network, params)?)
}
