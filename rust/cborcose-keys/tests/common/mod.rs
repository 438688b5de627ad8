// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(dead_code)]

use cborcose_keys::{EcCurve, KeyStoreError, PlatformKey};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};

/// A platform key backed by an in-memory P-256 signing key.
pub struct TestPlatformKey {
    sk: SigningKey,
}

impl TestPlatformKey {
    pub fn new() -> Self {
        Self {
            sk: SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng),
        }
    }
}

impl PlatformKey for TestPlatformKey {
    fn curve(&self) -> EcCurve {
        EcCurve::P256
    }

    fn public_point(&self) -> Result<Vec<u8>, KeyStoreError> {
        Ok(VerifyingKey::from(&self.sk).to_encoded_point(false).as_bytes().to_vec())
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyStoreError> {
        let sig: Signature = self.sk.sign(data);
        Ok(sig.to_bytes().to_vec())
    }
}

/// Valid P-256 COSE_Key from the signed-data fixture.
pub const VALID_COSE_KEY: &str = "pCABAQIhWCBGNvJAmcQpm4EhDvWYsxWzT7Lm7N0R7X6kAswyi5yqVCJYIIZVRZ4ujdrKimOlytyhpqlOJu2PlOtOhJSSkbzUNJx+";

/// Android-produced x9.63 P-256 public key.
pub const ANDROID_PUBLIC_KEY: &str = "BIVhg5qcO06jsqyuNS32bxjoIiUaIZhRuqdjmWD+X6PNxBzlUJV6m0smNE5wgclxdS62K5ReHUhI5RDmZn2aJvU=";

/// JWK whose coordinates use the standard base64 alphabet with padding.
pub const STANDARD_ALPHABET_JWK: &str = r#"{"crv":"P-256","kty":"EC","x":"d2SM2WRV0lOKlMQJGcN76P+mAyau4vhVLlhgzAxyWp4=","y":"FiQJMW6agCMNC9i79ePkQqvtvsaOVaQwZkkcmbsQ/gQ="}"#;

pub const ALL_CURVES: [EcCurve; 3] = [EcCurve::P256, EcCurve::P384, EcCurve::P521];
