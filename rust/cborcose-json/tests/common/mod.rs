// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cborcose_common::{CborMap, CborValue};

/// Device response with one PID document (eu.europa.ec.eudi.pid.1).
pub const DOCUMENT1_B64: &str = include_str!("../data/document1.b64");

pub fn document1() -> Vec<u8> {
    STANDARD.decode(DOCUMENT1_B64.trim()).unwrap()
}

pub fn text_map(entries: Vec<(&str, CborValue)>) -> CborValue {
    CborValue::Map(
        entries
            .into_iter()
            .map(|(k, v)| (CborValue::from(k), v))
            .collect::<CborMap>(),
    )
}

pub fn issuer_item() -> CborValue {
    text_map(vec![
        ("elementIdentifier", CborValue::from("given_name")),
        ("elementValue", CborValue::from("John")),
        ("digestID", CborValue::Unsigned(7)),
        ("random", CborValue::Bytes(vec![1, 2, 3])),
    ])
}
