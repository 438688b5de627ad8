// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JSON Web Key (RFC 7517/7518) form of EC public keys.

use std::collections::BTreeMap;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::curve::{EcCurve, EcKeyType};
use crate::error::KeyError;
use crate::public_key::CosePublicKey;

/// base64url decoder that tolerates padding. Standard-alphabet input is
/// translated before decoding.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Serialized JWK members, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkEcPublicKey {
    pub kty: String,
    pub crv: String,
    pub x: String,
    pub y: String,
}

impl From<&CosePublicKey> for JwkEcPublicKey {
    fn from(key: &CosePublicKey) -> Self {
        Self {
            kty: key.key_type().jwk_name().to_string(),
            crv: key.curve().jwk_name().to_string(),
            x: URL_SAFE_NO_PAD.encode(key.x()),
            y: URL_SAFE_NO_PAD.encode(key.y()),
        }
    }
}

impl CosePublicKey {
    /// `{"kty":"EC","crv":…,"x":…,"y":…}` with unpadded base64url coordinates.
    pub fn to_jwk(&self) -> Option<String> {
        if self.key_type() != EcKeyType::EC2 {
            return None;
        }
        serde_json::to_string(&JwkEcPublicKey::from(self)).ok()
    }

    pub fn to_jwk_value(&self) -> Option<serde_json::Value> {
        if self.key_type() != EcKeyType::EC2 {
            return None;
        }
        serde_json::to_value(JwkEcPublicKey::from(self)).ok()
    }

    /// Parse a JWK object whose members are all strings.
    pub fn from_jwk(json: &str) -> Result<Self, KeyError> {
        let members: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| KeyError::Jwk(e.to_string()))?;
        let member = |name: &str| {
            members
                .get(name)
                .map(String::as_str)
                .ok_or_else(|| KeyError::Jwk(format!("missing member {name:?}")))
        };

        let crv = member("crv")?;
        let curve = EcCurve::from_jwk_name(crv).ok_or_else(|| KeyError::Jwk(format!("unsupported crv {crv:?}")))?;
        let kty = member("kty")?;
        if EcKeyType::from_jwk_name(kty).is_none() {
            return Err(KeyError::Jwk(format!("unsupported kty {kty:?}")));
        }

        let x = decode_coordinate(member("x")?)?;
        let y = decode_coordinate(member("y")?)?;
        Self::new(curve, x, y)
    }
}

/// Decode a coordinate, dropping one leading zero byte from odd-length values.
fn decode_coordinate(encoded: &str) -> Result<Vec<u8>, KeyError> {
    let translated: String = encoded
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let mut bytes = LENIENT_URL_SAFE
        .decode(translated)
        .map_err(|e| KeyError::Base64(e.to_string()))?;
    if bytes.len() % 2 == 1 && bytes.first() == Some(&0) {
        bytes.remove(0);
    }
    Ok(bytes)
}
