//! Conceal/reveal round trips with random ephemeral keys

use integration_tests::{
    init_test_logging, operator_config, parse_suci, reveal_msin, test_rng, A_HN_PRIVATE,
    A_HN_PUBLIC, B_HN_PRIVATE, B_HN_PUBLIC, TEST_SUPI,
};
use rand::RngCore;
use uegen_common::{Plmn, ProtectionScheme, SupiType};
use uegen_suci::{conceal_identifier, SuciEncoder};

/// MSIN digits packed as the scheme input: two digits per byte, odd length padded with `f`
fn packed_msin(digits: &str) -> Vec<u8> {
    let mut padded = digits.to_string();
    if padded.len() % 2 == 1 {
        padded.push('f');
    }
    hex::decode(padded).expect("hex")
}

#[test]
fn test_roundtrip_both_profiles() {
    init_test_logging();

    let config = operator_config();
    let mut rng = test_rng(1);
    for (scheme, hn_priv) in [
        (ProtectionScheme::ProfileA, A_HN_PRIVATE),
        (ProtectionScheme::ProfileB, B_HN_PRIVATE),
    ] {
        let encoder = SuciEncoder::from_config(&config, scheme).expect("encoder");
        let suci = encoder.conceal(&mut rng, TEST_SUPI).expect("conceal");

        let fields = parse_suci(&suci).expect("parse");
        assert_eq!(fields.supi_type, SupiType::Imsi);
        assert_eq!(fields.mcc, "001");
        assert_eq!(fields.mnc, "01");
        assert_eq!(fields.routing_indicator, "0000");
        assert_eq!(fields.protection_scheme_id, scheme.id());

        let msin = reveal_msin(&suci, hn_priv).expect("reveal");
        assert_eq!(msin, packed_msin("0000000001"));
    }
}

#[test]
fn test_roundtrip_random_subscribers() {
    init_test_logging();

    let hn_pub = hex::decode(A_HN_PUBLIC).expect("hex");
    let plmn = Plmn::new("208", "93");
    let mut rng = test_rng(2);

    for _ in 0..32 {
        let msin = format!("{:010}", rng.next_u64() % 10_000_000_000);
        let supi = format!("imsi-20893{msin}");
        let suci = conceal_identifier(&mut rng, &supi, 1, &plmn, &hn_pub, 4).expect("conceal");

        assert!(suci.starts_with("suci-0-93-208-0000-1-4-"));
        assert_eq!(reveal_msin(&suci, A_HN_PRIVATE).expect("reveal"), packed_msin(&msin));
    }
}

#[test]
fn test_roundtrip_three_digit_mnc_odd_msin() {
    init_test_logging();

    // MCC 001, MNC 010 leaves a 9-digit MSIN
    let encoder = SuciEncoder::new(
        Plmn::new("001", "010"),
        ProtectionScheme::ProfileB,
        hex::decode(B_HN_PUBLIC).expect("hex"),
        2,
    )
    .with_routing_indicator("17");

    let suci = encoder
        .conceal(&mut test_rng(3), "imsi-001010123456789")
        .expect("conceal");
    assert!(suci.starts_with("suci-0-010-001-17-2-2-"));
    assert_eq!(
        reveal_msin(&suci, B_HN_PRIVATE).expect("reveal"),
        [0x12, 0x34, 0x56, 0x78, 0x9f]
    );
}

#[test]
fn test_fresh_ephemeral_per_call() {
    init_test_logging();

    let encoder = SuciEncoder::from_config(&operator_config(), ProtectionScheme::ProfileA)
        .expect("encoder");
    let mut rng = test_rng(4);
    let first = encoder.conceal(&mut rng, TEST_SUPI).expect("first");
    let second = encoder.conceal(&mut rng, TEST_SUPI).expect("second");

    assert_ne!(first, second);
    let eph = |suci: &str| parse_suci(suci).expect("parse").scheme_output[..64].to_string();
    assert_ne!(eph(&first), eph(&second));
}

#[test]
fn test_concealed_input_passes_through() {
    init_test_logging();

    let encoder = SuciEncoder::from_config(&operator_config(), ProtectionScheme::ProfileA)
        .expect("encoder");
    let suci = encoder.conceal(&mut test_rng(5), TEST_SUPI).expect("conceal");
    let again = encoder.conceal(&mut test_rng(6), &suci).expect("passthrough");
    assert_eq!(again, suci);
}
