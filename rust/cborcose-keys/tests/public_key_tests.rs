// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Public key x9.63, COSE_Key and JWK tests.

mod common;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use cborcose_common::{CborValue, CoseAlgorithm};
use cborcose_keys::{CosePrivateKey, CosePublicKey, EcCurve, EcKeyType, KeyError};
use common::*;

#[test]
fn x963_round_trip_for_every_curve() {
    for curve in ALL_CURVES {
        let key = CosePrivateKey::generate(curve).unwrap();
        let point = key.public_key().to_x963();
        assert_eq!(point.len(), 1 + 2 * curve.coordinate_length());
        assert_eq!(point[0], 0x04);

        let parsed = CosePublicKey::from_x963(curve, &point).unwrap();
        assert_eq!(&parsed, key.public_key());
        assert_eq!(CosePublicKey::from_x963(curve, &parsed.to_x963()).unwrap(), parsed);
    }
}

#[test]
fn x963_rejects_bad_points() {
    let android = STANDARD.decode(ANDROID_PUBLIC_KEY).unwrap();

    let mut compressed = android.clone();
    compressed[0] = 0x02;
    assert_eq!(CosePublicKey::from_x963(EcCurve::P256, &compressed), Err(KeyError::NotUncompressed));

    assert_eq!(
        CosePublicKey::from_x963(EcCurve::P256, &android[..64]),
        Err(KeyError::InvalidLength(64))
    );
    assert_eq!(CosePublicKey::from_x963(EcCurve::P256, &[]), Err(KeyError::InvalidLength(0)));

    assert_eq!(
        CosePublicKey::from_x963(EcCurve::P384, &android),
        Err(KeyError::CoordinateLength {
            curve: EcCurve::P384,
            expected: 48,
            found: 32
        })
    );
}

#[test]
fn cose_key_fixture_decodes_and_reencodes() {
    let bytes = STANDARD.decode(VALID_COSE_KEY).unwrap();
    let key = CosePublicKey::decode(&bytes).unwrap();
    assert_eq!(key.curve(), EcCurve::P256);
    assert_eq!(key.key_type(), EcKeyType::EC2);
    assert_eq!(key.x().len(), 32);
    assert_eq!(key.encode().unwrap(), bytes);
}

#[test]
fn cose_key_requires_all_parameters_with_correct_kinds() {
    let key = CosePrivateKey::generate(EcCurve::P256).unwrap();
    let full = key.public_key().to_cbor_map();

    for label in [-1i64, 1, -2, -3] {
        let without: Vec<_> = full
            .iter()
            .filter(|(k, _)| k.as_i64() != Some(label))
            .cloned()
            .collect();
        assert_eq!(
            CosePublicKey::from_cbor(&CborValue::Map(without)),
            Err(KeyError::InvalidParameter(label))
        );
    }

    let mut text_x = full.clone();
    text_x[2].1 = CborValue::from("x");
    assert_eq!(
        CosePublicKey::from_cbor(&CborValue::Map(text_x)),
        Err(KeyError::InvalidParameter(-2))
    );

    let mut unknown_curve = full.clone();
    unknown_curve[0].1 = CborValue::Unsigned(6);
    assert_eq!(
        CosePublicKey::from_cbor(&CborValue::Map(unknown_curve)),
        Err(KeyError::UnsupportedCurve(6))
    );

    let mut okp = full;
    okp[1].1 = CborValue::Unsigned(1);
    assert_eq!(
        CosePublicKey::from_cbor(&CborValue::Map(okp)),
        Err(KeyError::UnsupportedKeyType(1))
    );

    assert_eq!(CosePublicKey::from_cbor(&CborValue::Null), Err(KeyError::NotAMap));
}

#[test]
fn jwk_round_trip_for_every_curve() {
    for curve in ALL_CURVES {
        let key = CosePrivateKey::generate(curve).unwrap();
        let jwk = key.public_key().to_jwk().unwrap();
        assert!(jwk.starts_with(&format!(r#"{{"kty":"EC","crv":"{}","x":""#, curve.jwk_name())));

        let parsed = CosePublicKey::from_jwk(&jwk).unwrap();
        assert_eq!(&parsed, key.public_key());
    }
}

#[test]
fn jwk_accepts_standard_alphabet_with_padding() {
    let key = CosePublicKey::from_jwk(STANDARD_ALPHABET_JWK).unwrap();
    assert_eq!(key.curve(), EcCurve::P256);
    assert_eq!(
        key.x(),
        STANDARD.decode("d2SM2WRV0lOKlMQJGcN76P+mAyau4vhVLlhgzAxyWp4=").unwrap().as_slice()
    );

    let value = key.to_jwk_value().unwrap();
    assert_eq!(value["kty"], "EC");
    assert_eq!(value["crv"], "P-256");
    assert_eq!(value["x"], "d2SM2WRV0lOKlMQJGcN76P-mAyau4vhVLlhgzAxyWp4");
}

#[test]
fn jwk_strips_one_leading_zero_from_odd_length_coordinates() {
    let key = CosePrivateKey::generate(EcCurve::P256).unwrap();
    let mut padded_x = vec![0u8];
    padded_x.extend_from_slice(key.public_key().x());

    let jwk = format!(
        r#"{{"kty":"EC","crv":"P-256","x":"{}","y":"{}"}}"#,
        URL_SAFE_NO_PAD.encode(&padded_x),
        URL_SAFE_NO_PAD.encode(key.public_key().y())
    );
    assert_eq!(&CosePublicKey::from_jwk(&jwk).unwrap(), key.public_key());
}

#[test]
fn jwk_rejects_malformed_input() {
    let missing_y = r#"{"kty":"EC","crv":"P-256","x":"AAAA"}"#;
    assert!(matches!(CosePublicKey::from_jwk(missing_y), Err(KeyError::Jwk(_))));

    let rsa = r#"{"kty":"RSA","crv":"P-256","x":"AAAA","y":"AAAA"}"#;
    assert!(matches!(CosePublicKey::from_jwk(rsa), Err(KeyError::Jwk(_))));

    let ed = r#"{"kty":"EC","crv":"Ed25519","x":"AAAA","y":"AAAA"}"#;
    assert!(matches!(CosePublicKey::from_jwk(ed), Err(KeyError::Jwk(_))));

    let numeric = r#"{"kty":"EC","crv":"P-256","x":"AAAA","y":"AAAA","use":1}"#;
    assert!(matches!(CosePublicKey::from_jwk(numeric), Err(KeyError::Jwk(_))));

    assert!(CosePublicKey::from_jwk("not json").is_err());
}

#[test]
fn verify_rejects_algorithm_of_another_curve() {
    let key = CosePrivateKey::generate(EcCurve::P256).unwrap();
    let sig = key.sign(CoseAlgorithm::ES256, b"msg", None).unwrap();
    assert_eq!(key.public_key().verify(CoseAlgorithm::ES256, b"msg", &sig), Ok(()));
    assert_eq!(
        key.public_key().verify(CoseAlgorithm::ES384, b"msg", &sig),
        Err(KeyError::AlgorithmMismatch {
            alg: CoseAlgorithm::ES384,
            curve: EcCurve::P256
        })
    );
    assert_eq!(
        key.public_key().verify(CoseAlgorithm::ES256, b"other", &sig),
        Err(KeyError::VerificationFailed)
    );
}
