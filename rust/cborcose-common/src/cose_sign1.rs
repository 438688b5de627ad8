// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 message structure and Sig_structure encoding.
//!
//! COSE_Sign1 is defined in RFC 8152 (updated by RFC 9052):
//!
//! ```text
//! COSE_Sign1 = [ protected : bstr,
//!               unprotected : map,
//!               payload : bstr / null,
//!               signature : bstr ]
//! ```
//!
//! The protected header is kept as the exact bytes carried in the bstr. Those
//! bytes are what the Sig_structure covers, so they are never re-encoded; the
//! map inside is only decoded on demand (e.g. to read `alg`).

use minicbor::Encoder;

use crate::algorithms::{CoseAlgorithm, COSE_MAC0_TAG, COSE_SIGN1_TAG, HEADER_ALG, HEADER_KID};
use crate::cbor_value::{self, CborError, CborMap, CborValue};

/// Context string for COSE Sig_structure for COSE_Sign1.
pub const SIG_STRUCTURE_CONTEXT_SIGNATURE1: &str = "Signature1";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoseError {
    #[error(transparent)]
    Cbor(#[from] CborError),

    #[error("unexpected CBOR tag {found} (expected {expected} or no tag)")]
    UnexpectedTag { found: u64, expected: u64 },

    #[error("top-level item is not an array")]
    NotArray,

    #[error("array length was {0}, expected at least 4")]
    TooShort(usize),

    #[error("protected headers are not a byte string")]
    ProtectedNotBytes,

    #[error("protected headers do not encode a map")]
    ProtectedNotMap,

    #[error("unprotected headers are not a map")]
    UnprotectedNotMap,

    #[error("payload is neither a byte string nor null")]
    InvalidPayload,

    #[error("signature is not a byte string")]
    InvalidSignature,

    #[error("missing alg header")]
    MissingAlgorithm,

    #[error("unsupported alg: {0}")]
    UnsupportedAlgorithm(i64),

    #[error("detached payload requires external payload bytes")]
    DetachedPayload,
}

/// COSE message kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoseType {
    Sign1,
    Mac0,
}

impl CoseType {
    /// CBOR tag identifying this message kind.
    pub fn tag(self) -> u64 {
        match self {
            CoseType::Sign1 => COSE_SIGN1_TAG,
            CoseType::Mac0 => COSE_MAC0_TAG,
        }
    }
}

/// A COSE_Sign1 (or COSE_Mac0) message.
#[derive(Debug, Clone, PartialEq)]
pub struct Cose {
    pub cose_type: CoseType,
    /// Encoded protected header map, exactly as carried in the message.
    pub protected_header: Vec<u8>,
    pub unprotected_header: Option<CborMap>,
    /// `None` represents a detached payload (`null`).
    pub payload: Option<Vec<u8>>,
    /// Signature for Sign1, tag for Mac0.
    pub signature: Vec<u8>,
}

impl Cose {
    /// Build a message from an already decoded CBOR item.
    ///
    /// Accepts an optional tag, which must match `cose_type`. Elements beyond
    /// the fourth are ignored.
    pub fn from_cbor(cose_type: CoseType, item: &CborValue) -> Result<Self, CoseError> {
        let body = match item {
            CborValue::Tag(tag, inner) => {
                if *tag != cose_type.tag() {
                    return Err(CoseError::UnexpectedTag {
                        found: *tag,
                        expected: cose_type.tag(),
                    });
                }
                inner.as_ref()
            }
            other => other,
        };

        let elements = body.as_array().ok_or(CoseError::NotArray)?;
        if elements.len() < 4 {
            return Err(CoseError::TooShort(elements.len()));
        }

        let protected_header = elements[0]
            .as_bytes()
            .ok_or(CoseError::ProtectedNotBytes)?
            .to_vec();

        let unprotected_header = match &elements[1] {
            CborValue::Map(m) => Some(m.clone()),
            CborValue::Null => None,
            // Some producers (notably Android) wrap the unprotected map in a bstr.
            CborValue::Bytes(b) => {
                log::debug!("unprotected header is wrapped in a {}-byte bstr", b.len());
                if b.is_empty() {
                    Some(CborMap::new())
                } else {
                    match cbor_value::decode(b) {
                        Ok(CborValue::Map(m)) => Some(m),
                        _ => return Err(CoseError::UnprotectedNotMap),
                    }
                }
            }
            _ => return Err(CoseError::UnprotectedNotMap),
        };

        let payload = match &elements[2] {
            CborValue::Bytes(b) => Some(b.clone()),
            CborValue::Null => None,
            _ => return Err(CoseError::InvalidPayload),
        };

        let signature = elements[3]
            .as_bytes()
            .ok_or(CoseError::InvalidSignature)?
            .to_vec();

        Ok(Cose {
            cose_type,
            protected_header,
            unprotected_header,
            payload,
            signature,
        })
    }

    /// Decode a message from its CBOR encoding.
    pub fn decode(cose_type: CoseType, bytes: &[u8]) -> Result<Self, CoseError> {
        let item = cbor_value::decode(bytes)?;
        Self::from_cbor(cose_type, &item)
    }

    /// The four-element array form, optionally wrapped in the message tag.
    pub fn to_cbor(&self, tagged: bool) -> CborValue {
        let array = CborValue::Array(vec![
            CborValue::Bytes(self.protected_header.clone()),
            match &self.unprotected_header {
                Some(m) => CborValue::Map(m.clone()),
                None => CborValue::Map(CborMap::new()),
            },
            match &self.payload {
                Some(p) => CborValue::Bytes(p.clone()),
                None => CborValue::Null,
            },
            CborValue::Bytes(self.signature.clone()),
        ]);

        if tagged {
            CborValue::Tag(self.cose_type.tag(), Box::new(array))
        } else {
            array
        }
    }

    pub fn encode(&self, tagged: bool) -> Result<Vec<u8>, CoseError> {
        Ok(cbor_value::encode(&self.to_cbor(tagged))?)
    }

    /// Decode the protected header bytes. An empty bstr is an empty map.
    pub fn protected_header_map(&self) -> Result<CborMap, CoseError> {
        if self.protected_header.is_empty() {
            return Ok(CborMap::new());
        }
        match cbor_value::decode(&self.protected_header)? {
            CborValue::Map(m) => Ok(m),
            _ => Err(CoseError::ProtectedNotMap),
        }
    }

    /// The `alg` declared in the protected header.
    pub fn algorithm(&self) -> Result<CoseAlgorithm, CoseError> {
        let map = CborValue::Map(self.protected_header_map()?);
        let value = map
            .map_get_label(HEADER_ALG)
            .and_then(CborValue::as_i64)
            .ok_or(CoseError::MissingAlgorithm)?;
        CoseAlgorithm::from_i64(value).ok_or(CoseError::UnsupportedAlgorithm(value))
    }

    /// The `kid` header, protected first, then unprotected.
    pub fn key_id(&self) -> Option<Vec<u8>> {
        let protected = self.protected_header_map().ok().map(CborValue::Map);
        let unprotected = self.unprotected_header.clone().map(CborValue::Map);
        [protected, unprotected]
            .into_iter()
            .flatten()
            .find_map(|m| m.map_get_label(HEADER_KID).and_then(|v| v.as_bytes().map(<[u8]>::to_vec)))
    }

    /// Encode the Sig_structure for this message.
    ///
    /// An embedded payload wins over `external_payload`. A detached message
    /// needs `external_payload`.
    pub fn sig_structure(&self, external_payload: Option<&[u8]>) -> Result<Vec<u8>, CoseError> {
        let payload = match (&self.payload, external_payload) {
            (Some(p), _) => p.as_slice(),
            (None, Some(ext)) => ext,
            (None, None) => return Err(CoseError::DetachedPayload),
        };
        encode_signature1_sig_structure(&self.protected_header, payload)
    }
}

/// Encode a protected header map to the bytes carried in the bstr.
///
/// An empty map is carried as a zero-length bstr.
pub fn encode_protected_header(map: &CborMap) -> Result<Vec<u8>, CoseError> {
    if map.is_empty() {
        return Ok(Vec::new());
    }
    Ok(cbor_value::encode(&CborValue::Map(map.clone()))?)
}

/// Encode the COSE Sig_structure bytes for COSE_Sign1.
///
/// `[ "Signature1", body_protected, external_aad (empty), payload ]`
pub fn encode_signature1_sig_structure(protected_header: &[u8], payload: &[u8]) -> Result<Vec<u8>, CoseError> {
    let encode_err = |e: minicbor::encode::Error<std::convert::Infallible>| {
        CoseError::Cbor(CborError::Encode(e.to_string()))
    };

    let mut out = Vec::with_capacity(128 + protected_header.len() + payload.len());
    {
        let mut enc = Encoder::new(&mut out);
        enc.array(4).map_err(encode_err)?;
        enc.str(SIG_STRUCTURE_CONTEXT_SIGNATURE1).map_err(encode_err)?;
        enc.bytes(protected_header).map_err(encode_err)?;
        enc.bytes(&[]).map_err(encode_err)?; // external_aad empty bstr
        enc.bytes(payload).map_err(encode_err)?;
    }
    Ok(out)
}
