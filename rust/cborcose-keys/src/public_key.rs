// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! EC2 public keys: x9.63 points and COSE_Key maps (RFC 8152 §13.1.1).

use cborcose_common::{cbor_value, CborMap, CborValue, CoseAlgorithm};

use crate::curve::{EcCurve, EcKeyType};
use crate::ecdsa;
use crate::error::KeyError;

/// COSE_Key label for the curve.
pub const KEY_LABEL_CRV: i64 = -1;
/// COSE_Key label for the key type.
pub const KEY_LABEL_KTY: i64 = 1;
/// COSE_Key label for the x coordinate.
pub const KEY_LABEL_X: i64 = -2;
/// COSE_Key label for the y coordinate.
pub const KEY_LABEL_Y: i64 = -3;

/// Uncompressed point marker.
pub const X963_UNCOMPRESSED: u8 = 0x04;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CosePublicKey {
    curve: EcCurve,
    key_type: EcKeyType,
    x: Vec<u8>,
    y: Vec<u8>,
}

impl CosePublicKey {
    /// Build a key from affine coordinates. Both must be exactly the curve's
    /// coordinate length.
    pub fn new(curve: EcCurve, x: Vec<u8>, y: Vec<u8>) -> Result<Self, KeyError> {
        let expected = curve.coordinate_length();
        for coordinate in [&x, &y] {
            if coordinate.len() != expected {
                return Err(KeyError::CoordinateLength {
                    curve,
                    expected,
                    found: coordinate.len(),
                });
            }
        }
        Ok(Self {
            curve,
            key_type: curve.key_type(),
            x,
            y,
        })
    }

    /// Parse `0x04 || x || y`.
    pub fn from_x963(curve: EcCurve, point: &[u8]) -> Result<Self, KeyError> {
        let (&marker, coordinates) = point.split_first().ok_or(KeyError::InvalidLength(0))?;
        if marker != X963_UNCOMPRESSED {
            return Err(KeyError::NotUncompressed);
        }
        if coordinates.len() % 2 != 0 {
            return Err(KeyError::InvalidLength(point.len()));
        }
        let (x, y) = coordinates.split_at(coordinates.len() / 2);
        Self::new(curve, x.to_vec(), y.to_vec())
    }

    pub fn to_x963(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.x.len() + self.y.len());
        out.push(X963_UNCOMPRESSED);
        out.extend_from_slice(&self.x);
        out.extend_from_slice(&self.y);
        out
    }

    pub fn curve(&self) -> EcCurve {
        self.curve
    }

    pub fn key_type(&self) -> EcKeyType {
        self.key_type
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// The COSE_Key map `{-1: crv, 1: kty, -2: x, -3: y}`.
    pub fn to_cbor_map(&self) -> CborMap {
        vec![
            (CborValue::int(KEY_LABEL_CRV), CborValue::Unsigned(self.curve.cose_identifier())),
            (CborValue::int(KEY_LABEL_KTY), CborValue::Unsigned(self.key_type.cose_identifier())),
            (CborValue::int(KEY_LABEL_X), CborValue::Bytes(self.x.clone())),
            (CborValue::int(KEY_LABEL_Y), CborValue::Bytes(self.y.clone())),
        ]
    }

    pub fn to_cbor(&self) -> CborValue {
        CborValue::Map(self.to_cbor_map())
    }

    /// Read a COSE_Key map. Extra labels are ignored.
    pub fn from_cbor(item: &CborValue) -> Result<Self, KeyError> {
        if item.as_map().is_none() {
            return Err(KeyError::NotAMap);
        }

        let crv = unsigned_param(item, KEY_LABEL_CRV)?;
        let kty = unsigned_param(item, KEY_LABEL_KTY)?;
        let x = bytes_param(item, KEY_LABEL_X)?;
        let y = bytes_param(item, KEY_LABEL_Y)?;

        let curve = EcCurve::from_cose_identifier(crv).ok_or(KeyError::UnsupportedCurve(crv))?;
        EcKeyType::from_cose_identifier(kty).ok_or(KeyError::UnsupportedKeyType(kty))?;

        Self::new(curve, x.to_vec(), y.to_vec())
    }

    pub fn encode(&self) -> Result<Vec<u8>, KeyError> {
        Ok(cbor_value::encode(&self.to_cbor())?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KeyError> {
        Self::from_cbor(&cbor_value::decode(bytes)?)
    }

    /// Verify a raw `r || s` signature over `message` with `alg`.
    ///
    /// `alg` must be the algorithm paired with this key's curve.
    pub fn verify(&self, alg: CoseAlgorithm, message: &[u8], signature: &[u8]) -> Result<(), KeyError> {
        if EcCurve::for_algorithm(alg) != self.curve {
            return Err(KeyError::AlgorithmMismatch { alg, curve: self.curve });
        }
        ecdsa::verify(self.curve, &self.to_x963(), message, signature)
    }
}

pub(crate) fn unsigned_param(map: &CborValue, label: i64) -> Result<u64, KeyError> {
    match map.map_get_label(label) {
        Some(CborValue::Unsigned(v)) => Ok(*v),
        _ => Err(KeyError::InvalidParameter(label)),
    }
}

pub(crate) fn bytes_param(map: &CborValue, label: i64) -> Result<&[u8], KeyError> {
    map.map_get_label(label)
        .and_then(CborValue::as_bytes)
        .ok_or(KeyError::InvalidParameter(label))
}
