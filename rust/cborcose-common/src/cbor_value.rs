// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Generic CBOR item model.
//!
//! `CborValue` is a typed union over the CBOR data model (RFC 8949). Maps keep
//! insertion order, so re-encoding a decoded item reproduces the original key
//! order. This matters for unprotected headers and for embedded structures that
//! are re-emitted "as transmitted".
//!
//! Decoding is deliberately strict:
//! - Rejects empty input and trailing bytes.
//! - Rejects indefinite-length strings, arrays and maps.
//! - Rejects duplicate map keys.
//!
//! Floats keep their encoded width so re-encoding is byte-exact.

use minicbor::data::{Int, Tag, Type};
use minicbor::{Decoder, Encoder};

/// Maximum container nesting accepted by [`decode`].
pub const MAX_NESTING: usize = 256;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CborError {
    #[error("empty input")]
    Empty,

    #[error("failed to decode CBOR: {0}")]
    Decode(String),

    #[error("failed to encode CBOR: {0}")]
    Encode(String),

    #[error("indefinite-length {0} are not supported")]
    Indefinite(&'static str),

    #[error("unsupported CBOR item: {0}")]
    Unsupported(String),

    #[error("duplicate map key")]
    DuplicateKey,

    #[error("trailing bytes after CBOR item")]
    TrailingBytes,

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// Order-preserving CBOR map.
pub type CborMap = Vec<(CborValue, CborValue)>;

#[derive(Debug, Clone, PartialEq)]
pub enum CborValue {
    /// Major type 0.
    Unsigned(u64),
    /// Major type 1, stored as the encoded magnitude `n`. The value is `-1 - n`.
    Negative(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<CborValue>),
    Map(CborMap),
    Tag(u64, Box<CborValue>),
    Bool(bool),
    Null,
    Undefined,
    Simple(u8),
    /// Half precision, widened to `f32` without loss.
    Float16(f32),
    Float32(f32),
    Float(f64),
}

impl CborValue {
    /// Build an integer item from a signed value.
    pub fn int(value: i64) -> Self {
        if value >= 0 {
            CborValue::Unsigned(value as u64)
        } else {
            // -1 - value cannot overflow for any negative i64.
            CborValue::Negative((-1 - value) as u64)
        }
    }

    fn from_int(i: Int) -> Self {
        let v = i128::from(i);
        if v >= 0 {
            CborValue::Unsigned(v as u64)
        } else {
            CborValue::Negative((-1 - v) as u64)
        }
    }

    /// Integer value as `i128`, for both major types.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            CborValue::Unsigned(u) => Some(i128::from(*u)),
            CborValue::Negative(n) => Some(-1 - i128::from(*n)),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|v| i64::try_from(v).ok())
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CborValue::Unsigned(u) => Some(*u),
            _ => None,
        }
    }

    /// Float value of any encoded width.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CborValue::Float16(f) | CborValue::Float32(f) => Some(f64::from(*f)),
            CborValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CborValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CborValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CborValue]> {
        match self {
            CborValue::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&CborMap> {
        match self {
            CborValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<(u64, &CborValue)> {
        match self {
            CborValue::Tag(t, inner) => Some((*t, inner.as_ref())),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CborValue::Null)
    }

    /// Strip any number of enclosing tags.
    pub fn untagged(&self) -> &CborValue {
        let mut v = self;
        while let CborValue::Tag(_, inner) = v {
            v = inner;
        }
        v
    }

    /// Look up a map entry by key. Returns `None` for non-map items.
    pub fn map_get(&self, key: &CborValue) -> Option<&CborValue> {
        self.as_map()
            .and_then(|m| m.iter().find(|(k, _)| k == key).map(|(_, v)| v))
    }

    /// Look up a map entry by integer label.
    pub fn map_get_label(&self, label: i64) -> Option<&CborValue> {
        self.map_get(&CborValue::int(label))
    }

    /// Look up a map entry by text key.
    pub fn map_get_text(&self, key: &str) -> Option<&CborValue> {
        self.as_map().and_then(|m| {
            m.iter()
                .find(|(k, _)| k.as_text() == Some(key))
                .map(|(_, v)| v)
        })
    }

    /// Decode the contents of a byte-string item as a nested CBOR item.
    pub fn decode_bytestring(&self) -> Option<CborValue> {
        self.as_bytes().and_then(|b| decode(b).ok())
    }
}

impl From<i64> for CborValue {
    fn from(v: i64) -> Self {
        CborValue::int(v)
    }
}

impl From<u64> for CborValue {
    fn from(v: u64) -> Self {
        CborValue::Unsigned(v)
    }
}

impl From<bool> for CborValue {
    fn from(v: bool) -> Self {
        CborValue::Bool(v)
    }
}

impl From<&str> for CborValue {
    fn from(v: &str) -> Self {
        CborValue::Text(v.to_string())
    }
}

impl From<String> for CborValue {
    fn from(v: String) -> Self {
        CborValue::Text(v)
    }
}

impl From<Vec<u8>> for CborValue {
    fn from(v: Vec<u8>) -> Self {
        CborValue::Bytes(v)
    }
}

impl From<&[u8]> for CborValue {
    fn from(v: &[u8]) -> Self {
        CborValue::Bytes(v.to_vec())
    }
}

fn decode_err(e: minicbor::decode::Error) -> CborError {
    CborError::Decode(e.to_string())
}

fn encode_err<E: std::fmt::Display>(e: E) -> CborError {
    CborError::Encode(e.to_string())
}

/// Decode exactly one CBOR item from `bytes`.
pub fn decode(bytes: &[u8]) -> Result<CborValue, CborError> {
    if bytes.is_empty() {
        return Err(CborError::Empty);
    }

    let mut dec = Decoder::new(bytes);
    let value = decode_value(&mut dec, 0)?;

    if dec.position() != bytes.len() {
        return Err(CborError::TrailingBytes);
    }

    Ok(value)
}

fn decode_value(dec: &mut Decoder<'_>, depth: usize) -> Result<CborValue, CborError> {
    if depth > MAX_NESTING {
        return Err(CborError::TooDeep(MAX_NESTING));
    }

    match dec.datatype().map_err(decode_err)? {
        Type::Bool => Ok(CborValue::Bool(dec.bool().map_err(decode_err)?)),
        Type::Null => {
            dec.null().map_err(decode_err)?;
            Ok(CborValue::Null)
        }
        Type::Undefined => {
            dec.undefined().map_err(decode_err)?;
            Ok(CborValue::Undefined)
        }
        Type::U8
        | Type::U16
        | Type::U32
        | Type::U64
        | Type::I8
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Int => {
            let i = dec.int().map_err(decode_err)?;
            Ok(CborValue::from_int(i))
        }
        Type::F16 => Ok(CborValue::Float16(dec.f16().map_err(decode_err)?)),
        Type::F32 => Ok(CborValue::Float32(dec.f32().map_err(decode_err)?)),
        Type::F64 => Ok(CborValue::Float(dec.f64().map_err(decode_err)?)),
        Type::Simple => Ok(CborValue::Simple(dec.simple().map_err(decode_err)?)),
        Type::Bytes => Ok(CborValue::Bytes(dec.bytes().map_err(decode_err)?.to_vec())),
        Type::String => Ok(CborValue::Text(dec.str().map_err(decode_err)?.to_string())),
        Type::BytesIndef => Err(CborError::Indefinite("byte strings")),
        Type::StringIndef => Err(CborError::Indefinite("text strings")),
        Type::ArrayIndef => Err(CborError::Indefinite("arrays")),
        Type::MapIndef => Err(CborError::Indefinite("maps")),
        Type::Array => {
            let len = dec
                .array()
                .map_err(decode_err)?
                .ok_or(CborError::Indefinite("arrays"))?;
            // The declared length is untrusted; cap the preallocation.
            let mut out = Vec::with_capacity(len.min(1024) as usize);
            for _ in 0..len {
                out.push(decode_value(dec, depth + 1)?);
            }
            Ok(CborValue::Array(out))
        }
        Type::Map => {
            let len = dec
                .map()
                .map_err(decode_err)?
                .ok_or(CborError::Indefinite("maps"))?;
            let mut out: CborMap = Vec::with_capacity(len.min(1024) as usize);
            for _ in 0..len {
                let key = decode_value(dec, depth + 1)?;
                let value = decode_value(dec, depth + 1)?;
                if out.iter().any(|(k, _)| *k == key) {
                    return Err(CborError::DuplicateKey);
                }
                out.push((key, value));
            }
            Ok(CborValue::Map(out))
        }
        Type::Tag => {
            let tag = dec.tag().map_err(decode_err)?;
            let inner = decode_value(dec, depth + 1)?;
            Ok(CborValue::Tag(tag.as_u64(), Box::new(inner)))
        }
        other => Err(CborError::Unsupported(format!("{other:?}"))),
    }
}

/// Encode a CBOR item. Map entries are written in their stored order.
pub fn encode(value: &CborValue) -> Result<Vec<u8>, CborError> {
    let mut out = Vec::new();
    {
        let mut enc = Encoder::new(&mut out);
        encode_value(&mut enc, value)?;
    }
    Ok(out)
}

fn encode_value(enc: &mut Encoder<&mut Vec<u8>>, value: &CborValue) -> Result<(), CborError> {
    match value {
        CborValue::Unsigned(u) => {
            enc.u64(*u).map_err(encode_err)?;
        }
        CborValue::Negative(n) => {
            let i = Int::try_from(-1 - i128::from(*n)).map_err(encode_err)?;
            enc.int(i).map_err(encode_err)?;
        }
        CborValue::Bytes(b) => {
            enc.bytes(b).map_err(encode_err)?;
        }
        CborValue::Text(s) => {
            enc.str(s).map_err(encode_err)?;
        }
        CborValue::Array(items) => {
            enc.array(items.len() as u64).map_err(encode_err)?;
            for item in items {
                encode_value(enc, item)?;
            }
        }
        CborValue::Map(entries) => {
            enc.map(entries.len() as u64).map_err(encode_err)?;
            for (k, v) in entries {
                encode_value(enc, k)?;
                encode_value(enc, v)?;
            }
        }
        CborValue::Tag(t, inner) => {
            enc.tag(Tag::new(*t)).map_err(encode_err)?;
            encode_value(enc, inner)?;
        }
        CborValue::Bool(b) => {
            enc.bool(*b).map_err(encode_err)?;
        }
        CborValue::Null => {
            enc.null().map_err(encode_err)?;
        }
        CborValue::Undefined => {
            enc.undefined().map_err(encode_err)?;
        }
        CborValue::Simple(s) => {
            enc.simple(*s).map_err(encode_err)?;
        }
        CborValue::Float16(f) => {
            enc.f16(*f).map_err(encode_err)?;
        }
        CborValue::Float32(f) => {
            enc.f32(*f).map_err(encode_err)?;
        }
        CborValue::Float(f) => {
            enc.f64(*f).map_err(encode_err)?;
        }
    }
    Ok(())
}
