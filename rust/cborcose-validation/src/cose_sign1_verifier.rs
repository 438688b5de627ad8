// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 signature verification.
//!
//! - Determine the COSE `alg` header from the protected header bytes.
//! - Check it against the caller's expectation and the verifier key's curve.
//! - Build the Sig_structure over the stored protected bytes and the payload.
//! - Verify the raw `r || s` signature.
//!
//! For detached payload COSE_Sign1, callers must provide the external payload.

use std::collections::HashMap;

use cborcose_common::{Cose, CoseError, CoseType};
use cborcose_keys::{CosePublicKey, EcCurve, KeyError};

use crate::options::VerifyOptions;
use crate::validation_result::{
    ValidationResult, ALG_CURVE_MISMATCH, ALG_MISMATCH, BAD_SIGNATURE, COSE_PARSE_ERROR, DETACHED_PAYLOAD,
    INVALID_PUBLIC_KEY, MISSING_OR_INVALID_ALG, SIGSTRUCT_ERROR, UNSUPPORTED_TYPE,
};

/// Validator name used by the boolean entry points.
pub const SIGNATURE_VALIDATOR: &str = "CoseSign1Signature";

/// Parse COSE_Sign1 bytes (tagged or untagged) and verify them.
pub fn verify_cose_sign1_bytes(
    validator_name: &str,
    cose_sign1: &[u8],
    key: &CosePublicKey,
    options: &VerifyOptions,
) -> ValidationResult {
    match Cose::decode(CoseType::Sign1, cose_sign1) {
        Ok(cose) => verify_cose_sign1(validator_name, &cose, key, options),
        Err(e) => ValidationResult::failure_code(validator_name, e.to_string(), COSE_PARSE_ERROR),
    }
}

/// Verify a parsed COSE_Sign1.
pub fn verify_cose_sign1(
    validator_name: &str,
    cose: &Cose,
    key: &CosePublicKey,
    options: &VerifyOptions,
) -> ValidationResult {
    if cose.cose_type != CoseType::Sign1 {
        return ValidationResult::failure_code(
            validator_name,
            format!("{:?} messages carry a MAC, not a signature", cose.cose_type),
            UNSUPPORTED_TYPE,
        );
    }

    let alg = match cose.algorithm() {
        Ok(a) => a,
        Err(e) => return ValidationResult::failure_code(validator_name, e.to_string(), MISSING_OR_INVALID_ALG),
    };

    if let Some(expected) = options.expected_alg {
        if expected != alg {
            return ValidationResult::failure_code(
                validator_name,
                format!("alg header mismatch: expected {expected:?}, got {alg:?}"),
                ALG_MISMATCH,
            );
        }
    }

    // The header's alg only selects the digest when it agrees with the key.
    if EcCurve::for_algorithm(alg) != key.curve() {
        return ValidationResult::failure_code(
            validator_name,
            format!("alg {alg:?} cannot verify with a {} key", key.curve()),
            ALG_CURVE_MISMATCH,
        );
    }

    let sig_structure = match cose.sig_structure(options.external_payload.as_deref()) {
        Ok(b) => b,
        Err(CoseError::DetachedPayload) => {
            return ValidationResult::failure_code(
                validator_name,
                "payload is detached and no external payload was supplied",
                DETACHED_PAYLOAD,
            )
        }
        Err(e) => return ValidationResult::failure_code(validator_name, e.to_string(), SIGSTRUCT_ERROR),
    };

    match key.verify(alg, &sig_structure, &cose.signature) {
        Ok(()) => {
            let metadata = HashMap::from([
                ("alg".to_string(), format!("{alg:?}")),
                ("curve".to_string(), key.curve().to_string()),
            ]);
            ValidationResult::success(validator_name, metadata)
        }
        Err(e @ KeyError::InvalidPublicKey(_)) => {
            ValidationResult::failure_code(validator_name, e.to_string(), INVALID_PUBLIC_KEY)
        }
        Err(e) => ValidationResult::failure_code(validator_name, e.to_string(), BAD_SIGNATURE),
    }
}

/// `true` when the message's embedded payload verifies under `key`.
pub fn validate_cose_sign1(cose: &Cose, key: &CosePublicKey) -> bool {
    collapse(verify_cose_sign1(SIGNATURE_VALIDATOR, cose, key, &VerifyOptions::default()))
}

/// Like [`validate_cose_sign1`], supplying the payload of a detached message.
pub fn validate_cose_sign1_detached(cose: &Cose, key: &CosePublicKey, external_payload: &[u8]) -> bool {
    let options = VerifyOptions::default().with_external_payload(external_payload);
    collapse(verify_cose_sign1(SIGNATURE_VALIDATOR, cose, key, &options))
}

fn collapse(result: ValidationResult) -> bool {
    if !result.is_valid {
        for failure in &result.failures {
            log::debug!(
                "{} failed ({}): {}",
                result.validator_name,
                failure.error_code.as_deref().unwrap_or("-"),
                failure.message
            );
        }
    }
    result.is_valid
}
