// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cborcose_common::CoseAlgorithm;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Payload bytes for a message whose payload is detached (`null`).
    ///
    /// An embedded payload always wins over this value.
    pub external_payload: Option<Vec<u8>>,

    /// If set, verification fails unless the COSE `alg` header equals this value.
    pub expected_alg: Option<CoseAlgorithm>,
}

impl VerifyOptions {
    pub fn with_external_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.external_payload = Some(payload.into());
        self
    }

    pub fn with_expected_alg(mut self, alg: CoseAlgorithm) -> Self {
        self.expected_alg = Some(alg);
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignOptions {
    /// Placed in the unprotected header under label 4 (`kid`).
    pub key_id: Option<Vec<u8>>,

    /// Sign the payload but carry `null` in the message.
    pub detached: bool,
}

impl SignOptions {
    pub fn with_key_id(mut self, key_id: impl Into<Vec<u8>>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn with_detached(mut self, detached: bool) -> Self {
        self.detached = detached;
        self
    }
}
