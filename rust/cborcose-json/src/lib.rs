// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CBOR to JSON transcoding.
//!
//! Mobile documents (ISO 18013-5) are CBOR trees with a few conventions the
//! JSON form makes readable: issuer items are flattened, tag 24 payloads are
//! decoded in place, dates are read through their tags, and the
//! `issuerAuth`/`deviceKey`/`deviceSignature` fields get dedicated handling.

mod documents;
mod field_handlers;
mod options;
mod transcoder;

pub use documents::{wrap_documents, DOCUMENTS_KEY};
pub use field_handlers::special_field_names;
pub use options::{TranscodeOptions, DEFAULT_MAX_DEPTH};
pub use transcoder::{cbor_bytes_to_json, cbor_to_json, TranscodeError, Transcoder};
