// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Item-level CBOR to JSON conversion tests.

mod common;

use cborcose_common::{encode, CborValue};
use cborcose_json::{
    cbor_bytes_to_json, cbor_to_json, special_field_names, wrap_documents, TranscodeError, TranscodeOptions,
};
use common::*;
use serde_json::json;

fn to_json(item: &CborValue) -> serde_json::Value {
    cbor_to_json(item, &TranscodeOptions::default()).unwrap()
}

#[test]
fn negative_integers_use_their_real_value() {
    assert_eq!(cbor_bytes_to_json(&[0x26], &TranscodeOptions::default()).unwrap(), json!(-7));

    let keyed = CborValue::Map(vec![(CborValue::int(-7), CborValue::int(-1))]);
    assert_eq!(serde_json::to_string(&to_json(&keyed)).unwrap(), r#"{"-7":-1}"#);

    // -2^64 has no i64 form.
    let huge = CborValue::Negative(u64::MAX);
    assert_eq!(to_json(&huge), json!("-18446744073709551616"));
}

#[test]
fn issuer_item_proper_shape() {
    let options = TranscodeOptions::default().with_proper_issuer_item_shape(true);
    let value = cbor_to_json(&issuer_item(), &options).unwrap();
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"digestID":7,"random":"AQID","elementIdentifier":"given_name","elementValue":"John"}"#
    );
}

#[test]
fn issuer_item_compact_shape() {
    let value = to_json(&issuer_item());
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"digestID":7,"random":"AQID","given_name":"John"}"#
    );
}

#[test]
fn maps_missing_an_issuer_item_key_stay_generic() {
    let item = text_map(vec![
        ("elementIdentifier", CborValue::from("given_name")),
        ("elementValue", CborValue::from("John")),
        ("digestID", CborValue::Unsigned(7)),
    ]);
    assert_eq!(
        serde_json::to_string(&to_json(&item)).unwrap(),
        r#"{"elementIdentifier":"given_name","elementValue":"John","digestID":7}"#
    );
}

#[test]
fn keys_are_stringified_in_order() {
    let item = CborValue::Map(vec![
        (CborValue::from("z"), CborValue::Null),
        (CborValue::Unsigned(1), CborValue::from("a")),
        (CborValue::Bool(true), CborValue::from("b")),
        (CborValue::Array(vec![CborValue::Unsigned(1), CborValue::int(-2)]), CborValue::from("c")),
        (CborValue::Bytes(vec![0xff]), CborValue::Float(1.5)),
    ]);
    assert_eq!(
        serde_json::to_string(&to_json(&item)).unwrap(),
        r#"{"z":null,"1":"a","true":"b","[1,-2]":"c","_w":1.5}"#
    );
}

#[test]
fn tags_are_read_through_or_labelled() {
    let date = CborValue::Tag(1004, Box::new(CborValue::from("2001-09-11")));
    assert_eq!(to_json(&date), json!("2001-09-11"));

    let instant = CborValue::Tag(0, Box::new(CborValue::from("2024-10-11T07:01:11Z")));
    assert_eq!(to_json(&instant), json!("2024-10-11T07:01:11Z"));

    let nested = encode(&CborValue::Array(vec![CborValue::Unsigned(1), CborValue::from("two")])).unwrap();
    let encoded_cbor = CborValue::Tag(24, Box::new(CborValue::Bytes(nested)));
    assert_eq!(to_json(&encoded_cbor), json!([1, "two"]));

    // Not CBOR: a lone break byte.
    let not_cbor = CborValue::Tag(24, Box::new(CborValue::Bytes(vec![0xff])));
    assert_eq!(to_json(&not_cbor), json!("_w"));

    let epoch = CborValue::Tag(1, Box::new(CborValue::Unsigned(1_700_000_000)));
    assert_eq!(to_json(&epoch), json!({ "1": 1_700_000_000u64 }));
}

#[test]
fn plain_byte_strings_are_not_reinterpreted() {
    let nested = encode(&CborValue::Unsigned(5)).unwrap();
    assert_eq!(to_json(&CborValue::Bytes(nested)), json!("BQ"));
}

#[test]
fn unrepresentable_items_fail() {
    assert_eq!(
        cbor_to_json(&CborValue::Array(vec![CborValue::Undefined]), &TranscodeOptions::default()),
        Err(TranscodeError::Unsupported("undefined"))
    );
    assert_eq!(
        cbor_to_json(&CborValue::Float(f64::NAN), &TranscodeOptions::default()),
        Err(TranscodeError::NonFiniteFloat)
    );
    assert!(matches!(
        cbor_bytes_to_json(&[0x82, 0x01], &TranscodeOptions::default()),
        Err(TranscodeError::Cbor(_))
    ));
}

#[test]
fn simple_values_become_numbers() {
    assert_eq!(to_json(&CborValue::Simple(16)), json!(16));
}

#[test]
fn depth_is_bounded() {
    let mut item = CborValue::Unsigned(0);
    for _ in 0..10 {
        item = CborValue::Array(vec![item]);
    }
    let shallow = TranscodeOptions::default().with_max_depth(5);
    assert_eq!(cbor_to_json(&item, &shallow), Err(TranscodeError::TooDeep(5)));
    assert!(cbor_to_json(&item, &TranscodeOptions::default()).is_ok());
}

#[test]
fn device_signature_is_always_emitted_as_transmitted() {
    let signature = CborValue::Array(vec![CborValue::Bytes(vec![0xa0]), CborValue::Map(vec![])]);
    let raw = encode(&signature).unwrap();
    let item = text_map(vec![("deviceSignature", signature)]);

    for decode in [false, true] {
        let options = TranscodeOptions::default().with_decode_issuer_auth(decode);
        let value = cbor_to_json(&item, &options).unwrap();
        assert_eq!(
            value["deviceSignature"],
            json!(base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, &raw))
        );
    }
}

#[test]
fn as_transmitted_output_keeps_float_width() {
    // {"deviceSignature": [1.5 (f16)]}
    let mut bytes = vec![0xa1, 0x6f];
    bytes.extend_from_slice(b"deviceSignature");
    bytes.extend_from_slice(&[0x81, 0xf9, 0x3e, 0x00]);

    let value = cbor_bytes_to_json(&bytes, &TranscodeOptions::default()).unwrap();
    // base64url of 81 f9 3e 00.
    assert_eq!(value["deviceSignature"], json!("gfk-AA"));
}

#[test]
fn float_keys_keep_their_fraction() {
    let item = CborValue::Map(vec![
        (CborValue::Float(1.0), CborValue::Unsigned(1)),
        (CborValue::Float16(1.5), CborValue::Unsigned(2)),
        (CborValue::Float32(100000.0), CborValue::Unsigned(3)),
    ]);
    assert_eq!(
        serde_json::to_string(&to_json(&item)).unwrap(),
        r#"{"1.0":1,"1.5":2,"100000.0":3}"#
    );
    assert_eq!(to_json(&CborValue::Float16(-4.0)), json!(-4.0));
}

#[test]
fn special_fields_are_listed() {
    let names: Vec<_> = special_field_names().collect();
    assert_eq!(names, vec!["issuerAuth", "deviceKey", "deviceSignature"]);
}

#[test]
fn non_cose_issuer_auth_falls_back_to_raw_bytes() {
    let item = text_map(vec![("issuerAuth", CborValue::from("nope")), ("deviceKey", CborValue::Unsigned(3))]);
    let options = TranscodeOptions::default().with_decode_issuer_auth(true);
    let value = cbor_to_json(&item, &options).unwrap();
    // "nope" encodes as 0x64 'n' 'o' 'p' 'e'.
    assert_eq!(value["issuerAuth"], json!("ZG5vcGU"));
    assert_eq!(value["deviceKey"], json!(3));
}

#[test]
fn wrap_documents_does_not_double_wrap() {
    let wrapped = wrap_documents(json!({ "docType": "x" }));
    assert_eq!(wrapped, json!({ "documents": [{ "docType": "x" }] }));
    assert_eq!(wrap_documents(wrapped.clone()), wrapped);
    assert_eq!(wrap_documents(json!(1)), json!({ "documents": [1] }));
}
