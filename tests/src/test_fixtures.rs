//! Test fixtures and configuration helpers
//!
//! Home network keys are the TS 33.501 Annex C.4.3 / C.4.4 test data.

use uegen_common::{HomeNetworkProfile, OperatorConfig, Plmn, ProtectionScheme, SNssai};

/// Profile A home network private key
pub const A_HN_PRIVATE: &str = "c53c22208b61860b06c62e5406a7b330c2b577aa5558981510d128247d38bd1d";
/// Profile A home network public key
pub const A_HN_PUBLIC: &str = "5a8d38864820197c3394b92613b20b91633cbd897119273bf8e4a6f4eec0a650";
/// Profile B home network private key
pub const B_HN_PRIVATE: &str = "f1ab1074477ebcc7f554ea1c5fc368b1616730155e0041ac447d6301975fecda";
/// Profile B home network public key (compressed)
pub const B_HN_PUBLIC: &str = "0272da71976234ce833a6907425867b82e074d44ef907dfb4b3e21c1c2256ebcd1";

/// SUPI used across the tests
pub const TEST_SUPI: &str = "imsi-001010000000001";

/// MCC 001 / MNC 01
pub fn annex_c_plmn() -> Plmn {
    Plmn::new("001", "01")
}

/// Fixed ephemeral private key 0x01..0x20
pub fn ephemeral_private_key() -> Vec<u8> {
    (1..=32).collect()
}

/// Operator configuration carrying both Annex C public keys
pub fn operator_config() -> OperatorConfig {
    OperatorConfig {
        plmn: annex_c_plmn(),
        profiles: vec![
            HomeNetworkProfile::new(ProtectionScheme::ProfileA, A_HN_PUBLIC),
            HomeNetworkProfile::new(ProtectionScheme::ProfileB, B_HN_PUBLIC),
        ],
        gnb_search_list: vec!["127.0.0.1".to_string()],
        configured_nssai: vec![SNssai::new(1)],
        default_nssai: vec![SNssai::new(1)],
        ..OperatorConfig::default()
    }
}
