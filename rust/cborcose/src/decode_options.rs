// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cborcose_json::TranscodeOptions;

/// Options for [`crate::CborCose::decode_cbor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Wrap the decoded item as `{"documents": [item]}`.
    pub wrap_in_documents: bool,
    pub proper_issuer_item_shape: bool,
    pub decode_issuer_auth: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            wrap_in_documents: true,
            proper_issuer_item_shape: false,
            decode_issuer_auth: false,
        }
    }
}

impl DecodeOptions {
    pub fn with_wrap_in_documents(mut self, wrap: bool) -> Self {
        self.wrap_in_documents = wrap;
        self
    }

    pub fn with_proper_issuer_item_shape(mut self, proper: bool) -> Self {
        self.proper_issuer_item_shape = proper;
        self
    }

    pub fn with_decode_issuer_auth(mut self, decode: bool) -> Self {
        self.decode_issuer_auth = decode;
        self
    }

    pub(crate) fn transcode_options(&self) -> TranscodeOptions {
        TranscodeOptions::default()
            .with_proper_issuer_item_shape(self.proper_issuer_item_shape)
            .with_decode_issuer_auth(self.decode_issuer_auth)
    }
}
