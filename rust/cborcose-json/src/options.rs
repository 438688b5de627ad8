// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Default bound on transcoder recursion.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Emit issuer items as `{digestID, random, elementIdentifier, elementValue}`
    /// instead of the compact `{digestID, random, <identifier>: <value>}`.
    pub proper_issuer_item_shape: bool,

    /// Expand `issuerAuth` into its COSE_Sign1 parts and `deviceKey` into a JWK.
    /// When off, both are emitted as transmitted.
    pub decode_issuer_auth: bool,

    /// Maximum nesting depth, counting decoded nested CBOR.
    pub max_depth: usize,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            proper_issuer_item_shape: false,
            decode_issuer_auth: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranscodeOptions {
    pub fn with_proper_issuer_item_shape(mut self, proper: bool) -> Self {
        self.proper_issuer_item_shape = proper;
        self
    }

    pub fn with_decode_issuer_auth(mut self, decode: bool) -> Self {
        self.decode_issuer_auth = decode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
