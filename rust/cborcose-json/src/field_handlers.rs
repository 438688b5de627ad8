// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Handlers for mobile-document fields that carry embedded COSE structures.
//!
//! A handler returns `Ok(None)` to fall back to generic conversion of the
//! value.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cborcose_common::{cbor_value, CborValue, Cose, CoseType};
use cborcose_keys::CosePublicKey;
use serde_json::{Map, Value};

use crate::transcoder::{Context, TranscodeError, Transcoder};

pub(crate) type FieldHandler = fn(&Transcoder, &CborValue, Context) -> Result<Option<Value>, TranscodeError>;

/// Field name to handler, evaluated after key stringification.
pub(crate) const FIELD_HANDLERS: &[(&str, FieldHandler)] = &[
    ("issuerAuth", issuer_auth),
    ("deviceKey", device_key),
    ("deviceSignature", as_transmitted),
];

pub(crate) fn find_field_handler(name: &str) -> Option<FieldHandler> {
    FIELD_HANDLERS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, handler)| *handler)
}

/// Names of the fields with special handling.
pub fn special_field_names() -> impl Iterator<Item = &'static str> {
    FIELD_HANDLERS.iter().map(|(name, _)| *name)
}

/// COSE_Sign1 parts, falling back to the raw bytes.
fn issuer_auth(transcoder: &Transcoder, value: &CborValue, ctx: Context) -> Result<Option<Value>, TranscodeError> {
    if transcoder.options().decode_issuer_auth {
        match Cose::from_cbor(CoseType::Sign1, value) {
            Ok(cose) => return cose_sign1_to_json(transcoder, &cose, value, ctx).map(Some),
            Err(e) => log::debug!("issuerAuth is not a COSE_Sign1 ({e}); emitting raw bytes"),
        }
    }
    as_transmitted(transcoder, value, ctx)
}

/// JWK object, falling back to generic conversion.
fn device_key(transcoder: &Transcoder, value: &CborValue, _ctx: Context) -> Result<Option<Value>, TranscodeError> {
    if !transcoder.options().decode_issuer_auth {
        return Ok(None);
    }
    match CosePublicKey::from_cbor(value) {
        Ok(key) => Ok(key.to_jwk_value()),
        Err(e) => {
            log::debug!("deviceKey is not an EC2 COSE_Key ({e})");
            Ok(None)
        }
    }
}

/// base64url of the item's own CBOR encoding.
fn as_transmitted(_transcoder: &Transcoder, value: &CborValue, _ctx: Context) -> Result<Option<Value>, TranscodeError> {
    let bytes = cbor_value::encode(value)?;
    Ok(Some(Value::String(URL_SAFE_NO_PAD.encode(bytes))))
}

fn cose_sign1_to_json(
    transcoder: &Transcoder,
    cose: &Cose,
    raw: &CborValue,
    ctx: Context,
) -> Result<Value, TranscodeError> {
    let mut unprotected = Vec::new();
    for (label, value) in cose.unprotected_header.iter().flatten() {
        let mut pair = Map::with_capacity(2);
        pair.insert("algorithm".to_string(), transcoder.convert(label, ctx)?);
        pair.insert("keyId".to_string(), transcoder.convert(value, ctx)?);
        unprotected.push(Value::Object(pair));
    }

    let payload = match &cose.payload {
        None => Value::Null,
        Some(bytes) => match cbor_value::decode(bytes) {
            Ok(nested) => transcoder.convert(&nested, ctx)?,
            Err(_) => Value::String(URL_SAFE_NO_PAD.encode(bytes)),
        },
    };

    let mut out = Map::with_capacity(5);
    out.insert(
        "protectedHeader".to_string(),
        Value::String(URL_SAFE_NO_PAD.encode(&cose.protected_header)),
    );
    out.insert("unprotectedHeader".to_string(), Value::Array(unprotected));
    out.insert("signature".to_string(), Value::String(URL_SAFE_NO_PAD.encode(&cose.signature)));
    out.insert("payload".to_string(), payload);
    out.insert(
        "rawValue".to_string(),
        Value::String(URL_SAFE_NO_PAD.encode(cbor_value::encode(raw)?)),
    );
    Ok(Value::Object(out))
}
