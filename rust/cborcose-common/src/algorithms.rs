// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Supported COSE algorithms (IANA COSE Algorithms registry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum CoseAlgorithm {
    /// ECDSA w/ SHA-256 over P-256.
    ES256 = -7,
    /// ECDSA w/ SHA-384 over P-384.
    ES384 = -35,
    /// ECDSA w/ SHA-512 over P-521.
    ES512 = -36,
}

impl CoseAlgorithm {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            -7 => Some(CoseAlgorithm::ES256),
            -35 => Some(CoseAlgorithm::ES384),
            -36 => Some(CoseAlgorithm::ES512),
            _ => None,
        }
    }

    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

/// COSE header parameter: algorithm.
pub const HEADER_ALG: i64 = 1;
/// COSE header parameter: key identifier.
pub const HEADER_KID: i64 = 4;

/// Tagged COSE_Sign1 structure.
pub const COSE_SIGN1_TAG: u64 = 18;
/// Tagged COSE_Mac0 structure.
pub const COSE_MAC0_TAG: u64 = 17;
/// Standard date/time string (RFC 8949).
pub const DATE_TIME_TAG: u64 = 0;
/// Encoded CBOR data item (RFC 8949).
pub const ENCODED_CBOR_TAG: u64 = 24;
/// base64url-encoded text (RFC 8949).
pub const BASE64URL_TAG: u64 = 33;
/// Full date string (RFC 8943).
pub const FULL_DATE_TAG: u64 = 1004;
