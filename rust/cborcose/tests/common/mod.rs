// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Device response with one PID document (eu.europa.ec.eudi.pid.1).
pub const DOCUMENT1_B64: &str = include_str!("../../../cborcose-json/tests/data/document1.b64");

/// Android-produced COSE_Sign1 over "Ciao".
pub const ANDROID_SIGNED_VECTOR: &str = "hEOhASZBoERDaWFvWEAslPFPzSVxkxRpcGiYfQf8AsV9xrt8vgGD2eT0Fe6TqryDmzWZgFcLDrYRMn4HcYbe6toVrMOHsBIU5SrKO8ep";

/// x9.63 public key matching [`ANDROID_SIGNED_VECTOR`].
pub const ANDROID_PUBLIC_KEY: &str = "BIVhg5qcO06jsqyuNS32bxjoIiUaIZhRuqdjmWD+X6PNxBzlUJV6m0smNE5wgclxdS62K5ReHUhI5RDmZn2aJvU=";

pub fn b64(s: &str) -> Vec<u8> {
    STANDARD.decode(s.trim()).unwrap()
}
