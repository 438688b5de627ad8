// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recursive CBOR to JSON conversion.
//!
//! Conversion is driven by the item kind plus a small context:
//! - whether the item is a map key (keys always become strings)
//! - whether a byte string should be read as nested CBOR (set by tag 24 and
//!   the date/base64url tags, for their immediate inner item only)
//!
//! Byte strings that are not read through are emitted as unpadded base64url.
//! Map entries whose key names a known field go through the handler table in
//! [`crate::field_handlers`] first.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cborcose_common::{
    cbor_value, CborError, CborMap, CborValue, BASE64URL_TAG, DATE_TIME_TAG, ENCODED_CBOR_TAG, FULL_DATE_TAG,
};
use serde_json::{Map, Number, Value};

use crate::field_handlers::find_field_handler;
use crate::options::TranscodeOptions;

const ELEMENT_IDENTIFIER: &str = "elementIdentifier";
const ELEMENT_VALUE: &str = "elementValue";
const DIGEST_ID: &str = "digestID";
const RANDOM: &str = "random";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error(transparent)]
    Cbor(#[from] CborError),

    #[error("{0} has no JSON representation")]
    Unsupported(&'static str),

    #[error("non-finite float has no JSON representation")]
    NonFiniteFloat,

    #[error("nesting exceeds {0} levels")]
    TooDeep(usize),

    #[error("JSON serialization failed: {0}")]
    Json(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    pub is_key: bool,
    pub reinterpret_bytes: bool,
    pub depth: usize,
}

impl Context {
    fn child(self) -> Self {
        Self {
            is_key: false,
            reinterpret_bytes: false,
            depth: self.depth + 1,
        }
    }

    fn key(self) -> Self {
        Self {
            is_key: true,
            ..self.child()
        }
    }

    fn reinterpreted(self) -> Self {
        Self {
            is_key: self.is_key,
            reinterpret_bytes: true,
            depth: self.depth + 1,
        }
    }
}

/// Converts CBOR items to JSON values under a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transcoder {
    options: TranscodeOptions,
}

impl Transcoder {
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    pub fn to_json(&self, item: &CborValue) -> Result<Value, TranscodeError> {
        self.convert(item, Context::default())
    }

    /// Decode `bytes` as one CBOR item and convert it.
    pub fn bytes_to_json(&self, bytes: &[u8]) -> Result<Value, TranscodeError> {
        let item = cbor_value::decode(bytes)?;
        self.to_json(&item)
    }

    pub(crate) fn convert(&self, item: &CborValue, ctx: Context) -> Result<Value, TranscodeError> {
        if ctx.depth > self.options.max_depth {
            return Err(TranscodeError::TooDeep(self.options.max_depth));
        }

        match item {
            CborValue::Map(map) => self.convert_map(map, ctx),
            CborValue::Array(items) => items
                .iter()
                .map(|v| self.convert(v, ctx.child()))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            CborValue::Bytes(bytes) => self.convert_bytes(bytes, ctx),
            CborValue::Tag(tag, inner) => self.convert_tag(*tag, inner, ctx),
            CborValue::Unsigned(u) => Ok(if ctx.is_key {
                Value::String(u.to_string())
            } else {
                Value::Number(Number::from(*u))
            }),
            CborValue::Negative(n) => {
                let real = -1 - i128::from(*n);
                match i64::try_from(real) {
                    Ok(v) if !ctx.is_key => Ok(Value::Number(Number::from(v))),
                    // Below i64::MIN, or a key: decimal text.
                    _ => Ok(Value::String(real.to_string())),
                }
            }
            CborValue::Text(s) => Ok(Value::String(s.clone())),
            CborValue::Bool(b) => Ok(if ctx.is_key {
                Value::String(b.to_string())
            } else {
                Value::Bool(*b)
            }),
            CborValue::Null => Ok(if ctx.is_key {
                Value::String("null".to_string())
            } else {
                Value::Null
            }),
            // Keys print at the encoded width and keep the fraction: `1.0`, not `1`.
            CborValue::Float16(f) | CborValue::Float32(f) if ctx.is_key => Ok(Value::String(format!("{f:?}"))),
            CborValue::Float(f) if ctx.is_key => Ok(Value::String(format!("{f:?}"))),
            CborValue::Float16(_) | CborValue::Float32(_) | CborValue::Float(_) => item
                .as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or(TranscodeError::NonFiniteFloat),
            CborValue::Simple(n) => Ok(if ctx.is_key {
                Value::String(n.to_string())
            } else {
                Value::Number(Number::from(*n))
            }),
            CborValue::Undefined => Err(TranscodeError::Unsupported("undefined")),
        }
    }

    fn convert_map(&self, map: &CborMap, ctx: Context) -> Result<Value, TranscodeError> {
        if let Some(issuer_item) = IssuerItem::from_map(map) {
            return self.convert_issuer_item(&issuer_item, ctx);
        }

        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let name = self.key_string(key, ctx)?;
            let converted = match find_field_handler(&name) {
                Some(handler) => match handler(self, value, ctx.child())? {
                    Some(v) => v,
                    None => self.convert(value, ctx.child())?,
                },
                None => self.convert(value, ctx.child())?,
            };
            out.insert(name, converted);
        }
        Ok(Value::Object(out))
    }

    fn convert_issuer_item(&self, item: &IssuerItem<'_>, ctx: Context) -> Result<Value, TranscodeError> {
        let mut out = Map::with_capacity(4);
        out.insert(DIGEST_ID.to_string(), self.convert(item.digest_id, ctx.child())?);
        out.insert(RANDOM.to_string(), self.convert(item.random, ctx.child())?);

        let value = self.convert(item.element_value, ctx.child())?;
        if self.options.proper_issuer_item_shape {
            out.insert(
                ELEMENT_IDENTIFIER.to_string(),
                self.convert(item.element_identifier, ctx.child())?,
            );
            out.insert(ELEMENT_VALUE.to_string(), value);
        } else {
            let name = self.key_string(item.element_identifier, ctx)?;
            out.insert(name, value);
        }
        Ok(Value::Object(out))
    }

    fn convert_bytes(&self, bytes: &[u8], ctx: Context) -> Result<Value, TranscodeError> {
        if ctx.reinterpret_bytes {
            match cbor_value::decode(bytes) {
                Ok(nested) => {
                    return self.convert(
                        &nested,
                        Context {
                            is_key: ctx.is_key,
                            ..ctx.child()
                        },
                    )
                }
                Err(e) => log::debug!("tagged byte string is not CBOR ({e}); emitting base64url"),
            }
        }
        Ok(Value::String(URL_SAFE_NO_PAD.encode(bytes)))
    }

    fn convert_tag(&self, tag: u64, inner: &CborValue, ctx: Context) -> Result<Value, TranscodeError> {
        match tag {
            ENCODED_CBOR_TAG | FULL_DATE_TAG | DATE_TIME_TAG | BASE64URL_TAG => {
                self.convert(inner, ctx.reinterpreted())
            }
            other => {
                let mut out = Map::with_capacity(1);
                out.insert(other.to_string(), self.convert(inner, ctx.child())?);
                Ok(Value::Object(out))
            }
        }
    }

    /// Convert an item in key position to the JSON member name.
    pub(crate) fn key_string(&self, key: &CborValue, ctx: Context) -> Result<String, TranscodeError> {
        match self.convert(key, ctx.key())? {
            Value::String(s) => Ok(s),
            other => serde_json::to_string(&other).map_err(|e| TranscodeError::Json(e.to_string())),
        }
    }
}

/// A mobile-document issuer item (`IssuerSignedItem`).
struct IssuerItem<'a> {
    digest_id: &'a CborValue,
    random: &'a CborValue,
    element_identifier: &'a CborValue,
    element_value: &'a CborValue,
}

impl<'a> IssuerItem<'a> {
    /// Matches maps carrying all four text keys.
    fn from_map(map: &'a CborMap) -> Option<Self> {
        let field = |name: &str| map.iter().find(|(k, _)| k.as_text() == Some(name)).map(|(_, v)| v);
        Some(Self {
            digest_id: field(DIGEST_ID)?,
            random: field(RANDOM)?,
            element_identifier: field(ELEMENT_IDENTIFIER)?,
            element_value: field(ELEMENT_VALUE)?,
        })
    }
}

/// Convert one CBOR item.
pub fn cbor_to_json(item: &CborValue, options: &TranscodeOptions) -> Result<Value, TranscodeError> {
    Transcoder::new(*options).to_json(item)
}

/// Decode and convert one CBOR item.
pub fn cbor_bytes_to_json(bytes: &[u8], options: &TranscodeOptions) -> Result<Value, TranscodeError> {
    Transcoder::new(*options).bytes_to_json(bytes)
}
