// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Validation result types.
//!
//! Verification reports a structured result rather than an error. Each failure
//! carries a message and an optional machine-readable code.

use std::collections::HashMap;

/// The declared `alg` is missing or not one of ES256/ES384/ES512.
pub const MISSING_OR_INVALID_ALG: &str = "MISSING_OR_INVALID_ALG";
/// The declared `alg` differs from `VerifyOptions::expected_alg`.
pub const ALG_MISMATCH: &str = "ALG_MISMATCH";
/// The declared `alg` is not the one paired with the verifier key's curve.
pub const ALG_CURVE_MISMATCH: &str = "ALG_CURVE_MISMATCH";
/// The payload is detached and no external payload was supplied.
pub const DETACHED_PAYLOAD: &str = "DETACHED_PAYLOAD";
pub const SIGSTRUCT_ERROR: &str = "SIGSTRUCT_ERROR";
pub const INVALID_PUBLIC_KEY: &str = "INVALID_PUBLIC_KEY";
pub const BAD_SIGNATURE: &str = "BAD_SIGNATURE";
/// The message is not a COSE_Sign1.
pub const UNSUPPORTED_TYPE: &str = "UNSUPPORTED_TYPE";
pub const COSE_PARSE_ERROR: &str = "COSE_PARSE_ERROR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Human-readable explanation of the failure.
    pub message: String,
    /// Optional machine-readable error code.
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Name of the validator producing this result.
    pub validator_name: String,
    pub failures: Vec<ValidationFailure>,
    /// On success: the verified `alg` and the key's `curve`.
    pub metadata: HashMap<String, String>,
}

impl ValidationResult {
    pub fn success(validator_name: impl Into<String>, metadata: HashMap<String, String>) -> Self {
        Self {
            is_valid: true,
            validator_name: validator_name.into(),
            failures: Vec::new(),
            metadata,
        }
    }

    pub fn failure(validator_name: impl Into<String>, failures: Vec<ValidationFailure>) -> Self {
        Self {
            is_valid: false,
            validator_name: validator_name.into(),
            failures,
            metadata: HashMap::new(),
        }
    }

    /// A failure with a single message and code.
    pub fn failure_code(validator_name: impl Into<String>, message: impl Into<String>, error_code: &str) -> Self {
        Self::failure(
            validator_name,
            vec![ValidationFailure {
                message: message.into(),
                error_code: Some(error_code.to_string()),
            }],
        )
    }

    /// Code of the first failure, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.failures.first().and_then(|f| f.error_code.as_deref())
    }
}
