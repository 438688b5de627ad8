// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! High-level entry points.
//!
//! Every operation collapses failures to `None`/`false`; the cause is logged
//! at debug level.

use std::fmt;
use std::sync::Arc;

use cborcose_common::{Cose, CoseType};
use cborcose_json::{wrap_documents, Transcoder, TranscodeOptions};
use cborcose_keys::{CosePrivateKey, CosePublicKey, EcCurve, HardwareKeyStore};
use cborcose_validation::{make_cose_sign1, validate_cose_sign1, validate_cose_sign1_detached, SignOptions};
use serde_json::Value;

use crate::decode_options::DecodeOptions;

/// Signing, verification and decoding with an optional hardware key store.
#[derive(Clone)]
pub struct CborCose {
    key_store: Option<Arc<dyn HardwareKeyStore>>,
}

impl CborCose {
    /// No hardware key store. Inject one with [`CborCose::with_key_store`].
    pub fn new() -> Self {
        Self::without_key_store()
    }

    /// Hardware-reference keys created here can only sign through `key_store`.
    pub fn with_key_store(key_store: Arc<dyn HardwareKeyStore>) -> Self {
        Self {
            key_store: Some(key_store),
        }
    }

    /// No hardware backing: keys are always generated in software.
    pub fn without_key_store() -> Self {
        Self { key_store: None }
    }

    pub fn key_store(&self) -> Option<&dyn HardwareKeyStore> {
        self.key_store.as_deref()
    }

    fn available_store(&self) -> Option<&dyn HardwareKeyStore> {
        self.key_store().filter(|s| s.is_available())
    }

    /// Sign `data` into an untagged COSE_Sign1 with the payload embedded.
    ///
    /// The algorithm is the one paired with the key's curve.
    pub fn sign(&self, data: &[u8], private_key: &CosePrivateKey) -> Option<Vec<u8>> {
        self.sign_with(data, private_key, &SignOptions::default())
    }

    pub fn sign_with(&self, data: &[u8], private_key: &CosePrivateKey, options: &SignOptions) -> Option<Vec<u8>> {
        let alg = private_key.curve().algorithm();
        let cose = make_cose_sign1(data, private_key, alg, options, self.key_store())
            .map_err(|e| log::debug!("sign failed: {e}"))
            .ok()?;
        cose.encode(false).map_err(|e| log::debug!("encoding COSE_Sign1 failed: {e}")).ok()
    }

    /// `false` for malformed input and for signatures that do not verify.
    pub fn verify(&self, data: &[u8], public_key: &CosePublicKey) -> bool {
        match Cose::decode(CoseType::Sign1, data) {
            Ok(cose) => validate_cose_sign1(&cose, public_key),
            Err(e) => {
                log::debug!("verify: not a COSE_Sign1: {e}");
                false
            }
        }
    }

    /// Verify a COSE_Sign1 whose payload is detached.
    pub fn verify_detached(&self, data: &[u8], payload: &[u8], public_key: &CosePublicKey) -> bool {
        match Cose::decode(CoseType::Sign1, data) {
            Ok(cose) => validate_cose_sign1_detached(&cose, public_key, payload),
            Err(e) => {
                log::debug!("verify_detached: not a COSE_Sign1: {e}");
                false
            }
        }
    }

    /// Create a private key, in the hardware key store when it can hold one.
    ///
    /// With `force_hardware`, fails when the store is unavailable or does not
    /// support `curve`. Otherwise falls back to a software key.
    pub fn create_secure_private_key(&self, curve: EcCurve, force_hardware: bool) -> Option<CosePrivateKey> {
        let store = self.available_store().filter(|s| s.supports_curve(curve));
        match store {
            Some(store) => CosePrivateKey::generate_in(store, curve)
                .map_err(|e| log::warn!("hardware key generation failed: {e}"))
                .ok(),
            None if force_hardware => {
                log::debug!("hardware backing required but unavailable for {curve}");
                None
            }
            None => CosePrivateKey::generate(curve)
                .map_err(|e| log::warn!("key generation failed: {e}"))
                .ok(),
        }
    }

    /// Decode CBOR to JSON text.
    pub fn decode_cbor(&self, data: &[u8], options: &DecodeOptions) -> Option<String> {
        let value = transcode(data, options.transcode_options())?;
        let value = if options.wrap_in_documents {
            wrap_documents(value)
        } else {
            value
        };
        serde_json::to_string(&value)
            .map_err(|e| log::debug!("JSON serialization failed: {e}"))
            .ok()
    }

    /// Decode CBOR to a JSON value with proper issuer items and decoded
    /// `issuerAuth`.
    pub fn json_from_cbor(&self, data: &[u8]) -> Option<Value> {
        let options = TranscodeOptions::default()
            .with_proper_issuer_item_shape(true)
            .with_decode_issuer_auth(true);
        transcode(data, options)
    }
}

fn transcode(data: &[u8], options: TranscodeOptions) -> Option<Value> {
    Transcoder::new(options)
        .bytes_to_json(data)
        .map_err(|e| log::debug!("CBOR document not decodable: {e}"))
        .ok()
}

impl Default for CborCose {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CborCose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CborCose")
            .field("key_store", &self.key_store.as_ref().map(|s| s.is_available()))
            .finish()
    }
}
