// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 and CBOR document facade.
//!
//! [`CborCose`] is the primary entry point: sign and verify COSE_Sign1
//! messages with EC2 keys, create keys (hardware-backed when a
//! [`HardwareKeyStore`] can hold them), and decode mobile-document CBOR to JSON.
//! The underlying building blocks are re-exported at the crate root.

mod cbor_cose;
mod decode_options;

pub use cbor_cose::CborCose;
pub use decode_options::DecodeOptions;

pub use cborcose_common::{CborValue, Cose, CoseAlgorithm, CoseType};
pub use cborcose_json::{wrap_documents, TranscodeOptions};
pub use cborcose_keys::{
    CosePrivateKey, CosePublicKey, EcCurve, EcKeyType, HardwareKeyStore, KeyError, KeyStoreError, PlatformKey,
    PlatformKeyHandle, SigningSource, SoftwareKeyStore,
};
pub use cborcose_validation::{SignOptions, ValidationResult, VerifyOptions};
