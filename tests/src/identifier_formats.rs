//! Identifier and configuration rejection

use integration_tests::{
    annex_c_plmn, init_test_logging, test_rng, A_HN_PUBLIC, B_HN_PUBLIC, TEST_SUPI,
};
use uegen_common::Plmn;
use uegen_crypto::CryptoError;
use uegen_suci::{conceal_identifier, null_scheme_suci, SuciError};

fn conceal_a(supi: &str, plmn: &Plmn) -> Result<String, SuciError> {
    let hn_pub = hex::decode(A_HN_PUBLIC).expect("hex");
    conceal_identifier(&mut test_rng(10), supi, 1, plmn, &hn_pub, 1)
}

#[test]
fn test_unknown_prefixes_rejected() {
    init_test_logging();

    let plmn = annex_c_plmn();
    for supi in ["nai-user@example.com", "IMSI-001010000000001", "001010000000001", ""] {
        let err = conceal_a(supi, &plmn).expect_err(supi);
        assert!(
            matches!(err, SuciError::UnsupportedIdentifierFormat(_)),
            "{supi}: {err:?}"
        );
    }
}

#[test]
fn test_error_does_not_echo_digits() {
    init_test_logging();

    let err = conceal_a("001010000000001", &annex_c_plmn()).expect_err("no prefix");
    assert!(!err.to_string().contains("0000000001"));
}

#[test]
fn test_malformed_imsi_rejected() {
    init_test_logging();

    let plmn = annex_c_plmn();
    for supi in ["imsi-00101abc0000001", "imsi-00101", "imsi-0010"] {
        let err = conceal_a(supi, &plmn).expect_err(supi);
        assert!(matches!(err, SuciError::MalformedIdentifier(_)), "{supi}: {err:?}");
    }
}

#[test]
fn test_missing_plmn_rejected() {
    init_test_logging();

    for plmn in [Plmn::new("", ""), Plmn::new("001", ""), Plmn::new("0a1", "01")] {
        let err = conceal_a(TEST_SUPI, &plmn).expect_err("plmn");
        assert!(matches!(err, SuciError::MissingConfiguration(_)), "{plmn:?}: {err:?}");
    }
}

#[test]
fn test_unsupported_schemes_rejected() {
    init_test_logging();

    let hn_pub = hex::decode(A_HN_PUBLIC).expect("hex");
    for scheme in [0u8, 3, 15, 255] {
        let err = conceal_identifier(
            &mut test_rng(11),
            TEST_SUPI,
            scheme,
            &annex_c_plmn(),
            &hn_pub,
            1,
        )
        .expect_err("scheme");
        assert!(matches!(err, SuciError::UnsupportedScheme(id) if id == scheme));
    }
}

#[test]
fn test_key_for_wrong_curve_rejected() {
    init_test_logging();

    // 33-byte compressed P-256 key offered to Profile A
    let hn_pub = hex::decode(B_HN_PUBLIC).expect("hex");
    let err = conceal_identifier(&mut test_rng(12), TEST_SUPI, 1, &annex_c_plmn(), &hn_pub, 1)
        .expect_err("wrong length");
    assert!(matches!(
        err,
        SuciError::Crypto(CryptoError::InvalidKeyLength { expected: 32, actual: 33 })
    ));

    // X25519 key offered to Profile B
    let hn_pub = hex::decode(A_HN_PUBLIC).expect("hex");
    let err = conceal_identifier(&mut test_rng(13), TEST_SUPI, 2, &annex_c_plmn(), &hn_pub, 2)
        .expect_err("wrong curve");
    assert!(matches!(err, SuciError::Crypto(_)));
}

#[test]
fn test_null_scheme_keeps_msin_in_clear() {
    init_test_logging();

    let suci = null_scheme_suci(TEST_SUPI, &annex_c_plmn(), "0000").expect("null");
    assert_eq!(suci, "suci-0-01-001-0000-0-0-0000000001");

    let err = null_scheme_suci(TEST_SUPI, &annex_c_plmn(), "12345").expect_err("ri");
    assert!(matches!(err, SuciError::MissingConfiguration(_)));
}
