// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! EC2 private keys and their signing sources.
//!
//! The CBOR form extends the COSE_Key public labels with two private labels:
//! `-4` carries the raw scalar `d` (empty for hardware keys) and `-5` carries
//! the hardware key reference id (empty for raw-scalar keys). These labels are
//! a private extension, not RFC 8152 `d`-parameter semantics, and are kept
//! stable for persisted keys.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cborcose_common::{cbor_value, CborValue, CoseAlgorithm};

use crate::curve::EcCurve;
use crate::ecdsa;
use crate::error::KeyError;
use crate::key_store::{HardwareKeyStore, PlatformKeyHandle};
use crate::public_key::{bytes_param, CosePublicKey, X963_UNCOMPRESSED};

/// Private label for the raw scalar.
pub const KEY_LABEL_D: i64 = -4;
/// Private label for the hardware key reference id.
pub const KEY_LABEL_HARDWARE_REFERENCE: i64 = -5;

/// What actually produces signatures for a private key.
#[derive(Clone, PartialEq, Eq)]
pub enum SigningSource {
    /// Raw big-endian private scalar.
    Scalar(Vec<u8>),
    /// Reference id of a key held by a [`HardwareKeyStore`].
    HardwareReference(Vec<u8>),
    /// Live platform key object. Not serializable.
    PlatformHandle(PlatformKeyHandle),
}

impl fmt::Debug for SigningSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningSource::Scalar(_) => f.write_str("Scalar(<redacted>)"),
            SigningSource::HardwareReference(r) => f.debug_tuple("HardwareReference").field(&r.len()).finish(),
            SigningSource::PlatformHandle(h) => f.debug_tuple("PlatformHandle").field(h).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosePrivateKey {
    public_key: CosePublicKey,
    source: SigningSource,
}

impl CosePrivateKey {
    /// Generate a software key with a raw scalar.
    pub fn generate(curve: EcCurve) -> Result<Self, KeyError> {
        let (d, point) = ecdsa::generate(curve);
        Ok(Self {
            public_key: CosePublicKey::from_x963(curve, &point)?,
            source: SigningSource::Scalar(d),
        })
    }

    /// Generate a key inside `store`.
    pub fn generate_in(store: &dyn HardwareKeyStore, curve: EcCurve) -> Result<Self, KeyError> {
        if !store.is_available() {
            return Err(KeyError::KeyStoreUnavailable);
        }
        let reference = store.generate(curve)?;
        let point = store.public_point(&reference)?;
        Self::from_hardware_reference(&point, reference)
    }

    /// Parse `0x04 || x || y || d`.
    pub fn from_x963(point: &[u8], curve: EcCurve) -> Result<Self, KeyError> {
        let (&marker, rest) = point.split_first().ok_or(KeyError::InvalidLength(0))?;
        if marker != X963_UNCOMPRESSED {
            return Err(KeyError::NotUncompressed);
        }
        if rest.is_empty() || rest.len() % 3 != 0 {
            return Err(KeyError::InvalidLength(point.len()));
        }
        let third = rest.len() / 3;
        let (x, rest) = rest.split_at(third);
        let (y, d) = rest.split_at(third);
        Self::from_coordinates(curve, x.to_vec(), y.to_vec(), d.to_vec())
    }

    pub fn from_coordinates(curve: EcCurve, x: Vec<u8>, y: Vec<u8>, d: Vec<u8>) -> Result<Self, KeyError> {
        let public_key = CosePublicKey::new(curve, x, y)?;
        if d.len() != curve.coordinate_length() {
            return Err(KeyError::CoordinateLength {
                curve,
                expected: curve.coordinate_length(),
                found: d.len(),
            });
        }
        Ok(Self {
            public_key,
            source: SigningSource::Scalar(d),
        })
    }

    /// A hardware key described by its public point and reference id. The
    /// curve follows from the point length.
    pub fn from_hardware_reference(public_point: &[u8], reference: Vec<u8>) -> Result<Self, KeyError> {
        if reference.is_empty() {
            return Err(KeyError::MissingHardwareReference);
        }
        let coordinate_len = public_point.len().saturating_sub(1) / 2;
        let curve = EcCurve::from_coordinate_length(coordinate_len)
            .ok_or(KeyError::InvalidLength(public_point.len()))?;
        Ok(Self {
            public_key: CosePublicKey::from_x963(curve, public_point)?,
            source: SigningSource::HardwareReference(reference),
        })
    }

    /// A key backed by a live platform object.
    pub fn from_platform_handle(curve: EcCurve, handle: PlatformKeyHandle) -> Result<Self, KeyError> {
        let point = handle.key().public_point()?;
        Ok(Self {
            public_key: CosePublicKey::from_x963(curve, &point)?,
            source: SigningSource::PlatformHandle(handle),
        })
    }

    /// `0x04 || x || y || d`. Only raw-scalar keys have one.
    pub fn to_x963(&self) -> Result<Vec<u8>, KeyError> {
        let SigningSource::Scalar(d) = &self.source else {
            return Err(KeyError::NoScalar);
        };
        let mut out = self.public_key.to_x963();
        out.extend_from_slice(d);
        Ok(out)
    }

    pub fn public_key(&self) -> &CosePublicKey {
        &self.public_key
    }

    pub fn curve(&self) -> EcCurve {
        self.public_key.curve()
    }

    pub fn signing_source(&self) -> &SigningSource {
        &self.source
    }

    pub fn hardware_reference(&self) -> Option<&[u8]> {
        match &self.source {
            SigningSource::HardwareReference(r) => Some(r),
            _ => None,
        }
    }

    /// COSE_Key map with the private `-4`/`-5` labels.
    pub fn to_cbor(&self) -> Result<CborValue, KeyError> {
        let (d, reference) = match &self.source {
            SigningSource::Scalar(d) => (d.clone(), Vec::new()),
            SigningSource::HardwareReference(r) => (Vec::new(), r.clone()),
            SigningSource::PlatformHandle(_) => return Err(KeyError::NotSerializable),
        };
        let mut map = self.public_key.to_cbor_map();
        map.push((CborValue::int(KEY_LABEL_D), CborValue::Bytes(d)));
        map.push((CborValue::int(KEY_LABEL_HARDWARE_REFERENCE), CborValue::Bytes(reference)));
        Ok(CborValue::Map(map))
    }

    pub fn from_cbor(item: &CborValue) -> Result<Self, KeyError> {
        let public_key = CosePublicKey::from_cbor(item)?;
        let d = bytes_param(item, KEY_LABEL_D)?;
        if !d.is_empty() {
            let curve = public_key.curve();
            return Self::from_coordinates(curve, public_key.x().to_vec(), public_key.y().to_vec(), d.to_vec());
        }

        let reference = item
            .map_get_label(KEY_LABEL_HARDWARE_REFERENCE)
            .and_then(CborValue::as_bytes)
            .filter(|r| !r.is_empty())
            .ok_or(KeyError::MissingHardwareReference)?;
        Ok(Self {
            public_key,
            source: SigningSource::HardwareReference(reference.to_vec()),
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, KeyError> {
        Ok(cbor_value::encode(&self.to_cbor()?)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KeyError> {
        Self::from_cbor(&cbor_value::decode(bytes)?)
    }

    /// Standard base64 of [`CosePrivateKey::encode`].
    pub fn to_base64(&self) -> Result<String, KeyError> {
        Ok(STANDARD.encode(self.encode()?))
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| KeyError::Base64(e.to_string()))?;
        Self::decode(&bytes)
    }

    /// Sign `tbs` with `alg`, returning raw `r || s`.
    ///
    /// Hardware-reference keys need `key_store`; the other sources ignore it.
    pub fn sign(
        &self,
        alg: CoseAlgorithm,
        tbs: &[u8],
        key_store: Option<&dyn HardwareKeyStore>,
    ) -> Result<Vec<u8>, KeyError> {
        let curve = self.curve();
        if EcCurve::for_algorithm(alg) != curve {
            return Err(KeyError::AlgorithmMismatch { alg, curve });
        }

        match &self.source {
            SigningSource::Scalar(d) => ecdsa::sign(curve, d, tbs),
            SigningSource::HardwareReference(reference) => {
                let store = key_store
                    .filter(|s| s.is_available())
                    .ok_or(KeyError::KeyStoreUnavailable)?;
                Ok(store.sign(reference, tbs)?)
            }
            SigningSource::PlatformHandle(handle) => Ok(handle.key().sign(tbs)?),
        }
    }
}
