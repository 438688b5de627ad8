// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 signing and validation.
//!
//! Both entry paths converge on a [`cborcose_common::Cose`] value: signing
//! builds one, parsing decodes one. Validation returns a structured
//! [`ValidationResult`]; the `validate_*` helpers collapse it to a `bool`.

pub mod cose_sign1_signer;
pub mod cose_sign1_verifier;
pub mod options;
pub mod validation_result;

pub use cose_sign1_signer::{make_cose_sign1, SignError};
pub use cose_sign1_verifier::{
    validate_cose_sign1, validate_cose_sign1_detached, verify_cose_sign1, verify_cose_sign1_bytes,
    SIGNATURE_VALIDATOR,
};
pub use options::{SignOptions, VerifyOptions};
pub use validation_result::{ValidationFailure, ValidationResult};
