// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cborcose_common::{CborError, CoseAlgorithm};

use crate::curve::EcCurve;
use crate::key_store::KeyStoreError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error(transparent)]
    Cbor(#[from] CborError),

    #[error("x9.63 data must start with the uncompressed point marker 0x04")]
    NotUncompressed,

    #[error("x9.63 data has an invalid length ({0} bytes)")]
    InvalidLength(usize),

    #[error("coordinate length {found} does not match {curve} ({expected} bytes)")]
    CoordinateLength {
        curve: EcCurve,
        expected: usize,
        found: usize,
    },

    #[error("COSE key is not a map")]
    NotAMap,

    #[error("missing or invalid COSE key parameter {0}")]
    InvalidParameter(i64),

    #[error("unsupported curve identifier {0}")]
    UnsupportedCurve(u64),

    #[error("unsupported key type identifier {0}")]
    UnsupportedKeyType(u64),

    #[error("invalid JWK: {0}")]
    Jwk(String),

    #[error("invalid base64: {0}")]
    Base64(String),

    #[error("private scalar is not available for this key")]
    NoScalar,

    #[error("platform-handle keys cannot be serialized")]
    NotSerializable,

    #[error("hardware key reference is missing")]
    MissingHardwareReference,

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("bad signature: {0}")]
    BadSignature(String),

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("algorithm {alg:?} cannot be used with curve {curve}")]
    AlgorithmMismatch { alg: CoseAlgorithm, curve: EcCurve },

    #[error("no hardware key store is available")]
    KeyStoreUnavailable,

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}
