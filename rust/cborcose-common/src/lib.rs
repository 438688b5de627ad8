// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared CBOR and COSE datatypes.
//!
//! This crate exists to prevent circular dependencies across the key codec,
//! the signing/validation engine, the JSON transcoder and the facade.

pub mod algorithms;
pub mod cbor_value;
pub mod cose_sign1;

pub use algorithms::{
    CoseAlgorithm, BASE64URL_TAG, COSE_MAC0_TAG, COSE_SIGN1_TAG, DATE_TIME_TAG, ENCODED_CBOR_TAG, FULL_DATE_TAG,
    HEADER_ALG, HEADER_KID,
};
pub use cbor_value::{decode, encode, CborError, CborMap, CborValue, MAX_NESTING};
pub use cose_sign1::{
    encode_protected_header, encode_signature1_sig_structure, Cose, CoseError, CoseType,
    SIG_STRUCTURE_CONTEXT_SIGNATURE1,
};
