// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cborcose_common::{Cose, CoseType};
use cborcose_keys::{CosePublicKey, EcCurve};

/// COSE_Sign1 with payload "this is test data", signed with ES256.
pub const SIGNED_DATA_VECTOR: &str = "hEOhASagUXRoaXMgaXMgdGVzdCBkYXRhWECWHFXxcZPkyupozacO5KTeBDcbXFYX6HaFynTZ85qXdtGGd9bhtgBq1vcjYdK0QHP+DmG15108cm497i83ScSf";

/// COSE_Key that produced [`SIGNED_DATA_VECTOR`].
pub const VALID_COSE_KEY: &str = "pCABAQIhWCBGNvJAmcQpm4EhDvWYsxWzT7Lm7N0R7X6kAswyi5yqVCJYIIZVRZ4ujdrKimOlytyhpqlOJu2PlOtOhJSSkbzUNJx+";

/// An unrelated P-256 COSE_Key.
pub const INVALID_COSE_KEY: &str = "pCABAQIhWCA2hqj0DAvEr7gRsTRLXu7Y8nBlpCIgoDNXtnMmZg8wVSJYIHse1ypD88D0cmS/R6R0f83bE/9GetTg9aPDozHTdvfB";

/// Android-produced COSE_Sign1 over "Ciao".
pub const ANDROID_SIGNED_VECTOR: &str = "hEOhASZBoERDaWFvWEAslPFPzSVxkxRpcGiYfQf8AsV9xrt8vgGD2eT0Fe6TqryDmzWZgFcLDrYRMn4HcYbe6toVrMOHsBIU5SrKO8ep";

/// x9.63 public key matching [`ANDROID_SIGNED_VECTOR`].
pub const ANDROID_PUBLIC_KEY: &str = "BIVhg5qcO06jsqyuNS32bxjoIiUaIZhRuqdjmWD+X6PNxBzlUJV6m0smNE5wgclxdS62K5ReHUhI5RDmZn2aJvU=";

pub fn b64(s: &str) -> Vec<u8> {
    STANDARD.decode(s).unwrap()
}

pub fn cose_key(s: &str) -> CosePublicKey {
    CosePublicKey::decode(&b64(s)).unwrap()
}

pub fn sign1(s: &str) -> Cose {
    Cose::decode(CoseType::Sign1, &b64(s)).unwrap()
}

pub fn android_key() -> CosePublicKey {
    CosePublicKey::from_x963(EcCurve::P256, &b64(ANDROID_PUBLIC_KEY)).unwrap()
}
