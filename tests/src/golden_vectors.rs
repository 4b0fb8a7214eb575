//! Known-answer tests
//!
//! Annex C scheme outputs are reproduced from the published ephemeral keys
//! and recovered through the home network side. Fixed-ephemeral SUCIs are
//! compared byte for byte.

use integration_tests::{
    annex_c_plmn, ephemeral_private_key, init_test_logging, reveal_msin, A_HN_PRIVATE,
    A_HN_PUBLIC, B_HN_PRIVATE, B_HN_PUBLIC, TEST_SUPI,
};
use uegen_common::ProtectionScheme;
use uegen_crypto::{conceal, Curve, EcKeyPair, EciesParams};
use uegen_suci::{conceal_identifier_with_ephemeral, SuciEncoder};

// TS 33.501 Annex C.4.3 / C.4.4, scheme output of the concealed MSIN 00012080f6
const ANNEX_C_A_OUTPUT: &str = "b2e92f836055a255837debf850b528997ce0201cb82adfe4be1f587d07d8457d\
                                cb02352410cddd9e730ef3fa87";
const ANNEX_C_B_OUTPUT: &str = "039aab8376597021e855679a9778ea0b67396e68c66df32c0f41e9acca2da9b9d1\
                                46a33fc2716ac7dae96aa30a4d";
const ANNEX_C_MSIN: [u8; 5] = [0x00, 0x01, 0x20, 0x80, 0xf6];
const ANNEX_C_A_EPH_PRIVATE: &str =
    "c80949f13ebe61af4ebdbd293ea4f942696b9e815d7e8f0096bbf6ed7de62256";
const ANNEX_C_B_EPH_PRIVATE: &str =
    "99798858a1dc6a2c68637149a4b1dbfd1fdff5addd62a2142f06699ed7602529";

// Ephemeral private key 0x01..0x20
const GOLDEN_A: &str = "suci-0-01-001-0000-1-1-\
    07a37cbc142093c8b755dc1b10e86cb426374ad16aa853ed0bdfc0b2b86d1c7c\
    a212d0d5ed1faf445b4bdb8921";
const GOLDEN_B: &str = "suci-0-01-001-0000-2-2-\
    02515c3d6eb9e396b904d3feca7f54fdcd0cc1e997bf375dca515ad0a6c3b4035f\
    6cf6bca2deada5fc71af14a9d3";

#[test]
fn test_annex_c_published_ephemeral_keys() {
    init_test_logging();

    for (eph_priv, hn_pub, curve, params, expected) in [
        (
            ANNEX_C_A_EPH_PRIVATE,
            A_HN_PUBLIC,
            Curve::X25519,
            EciesParams::PROFILE_A,
            ANNEX_C_A_OUTPUT,
        ),
        (
            ANNEX_C_B_EPH_PRIVATE,
            B_HN_PUBLIC,
            Curve::P256,
            EciesParams::PROFILE_B,
            ANNEX_C_B_OUTPUT,
        ),
    ] {
        let ephemeral = EcKeyPair::from_private_hex(curve, eph_priv).expect("ephemeral key");
        let hn_pub = hex::decode(hn_pub).expect("hex");
        let output = conceal(&ANNEX_C_MSIN, &hn_pub, &ephemeral, params).expect("conceal");
        assert_eq!(output.to_hex(), expected, "{curve}");
    }
}

#[test]
fn test_annex_c_profile_a_reveal() {
    init_test_logging();

    let suci = format!("suci-0-01-001-0000-1-1-{ANNEX_C_A_OUTPUT}");
    let msin = reveal_msin(&suci, A_HN_PRIVATE).expect("reveal");
    assert_eq!(msin, ANNEX_C_MSIN);
}

#[test]
fn test_annex_c_profile_b_reveal() {
    init_test_logging();

    let suci = format!("suci-0-01-001-0000-2-2-{ANNEX_C_B_OUTPUT}");
    let msin = reveal_msin(&suci, B_HN_PRIVATE).expect("reveal");
    assert_eq!(msin, ANNEX_C_MSIN);
}

#[test]
fn test_fixed_ephemeral_profile_a() {
    init_test_logging();

    let hn_pub = hex::decode(A_HN_PUBLIC).expect("hex");
    let suci = conceal_identifier_with_ephemeral(
        TEST_SUPI,
        1,
        &annex_c_plmn(),
        &hn_pub,
        1,
        &ephemeral_private_key(),
    )
    .expect("conceal");
    assert_eq!(suci, GOLDEN_A);
}

#[test]
fn test_fixed_ephemeral_profile_b() {
    init_test_logging();

    let hn_pub = hex::decode(B_HN_PUBLIC).expect("hex");
    let suci = conceal_identifier_with_ephemeral(
        TEST_SUPI,
        2,
        &annex_c_plmn(),
        &hn_pub,
        2,
        &ephemeral_private_key(),
    )
    .expect("conceal");
    assert_eq!(suci, GOLDEN_B);
}

#[test]
fn test_encoder_matches_free_function() {
    init_test_logging();

    let encoder = SuciEncoder::new(
        annex_c_plmn(),
        ProtectionScheme::ProfileB,
        hex::decode(B_HN_PUBLIC).expect("hex"),
        2,
    );
    let suci = encoder
        .conceal_with_ephemeral(TEST_SUPI, &ephemeral_private_key())
        .expect("conceal");
    assert_eq!(suci, GOLDEN_B);
}

#[test]
fn test_golden_sucis_reveal_to_msin() {
    init_test_logging();

    let expected = [0x00, 0x00, 0x00, 0x00, 0x01];
    assert_eq!(reveal_msin(GOLDEN_A, A_HN_PRIVATE).expect("reveal A"), expected);
    assert_eq!(reveal_msin(GOLDEN_B, B_HN_PRIVATE).expect("reveal B"), expected);
}

#[test]
fn test_wrong_home_network_key_fails_mac() {
    init_test_logging();

    // Profile B private key on a Profile A SUCI: same length, different secret
    assert!(reveal_msin(GOLDEN_A, B_HN_PRIVATE).is_err());
}
