// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Hardware-backed signing capability.
//!
//! Keys held by a hardware store never expose their private scalar. The store
//! hands out an opaque reference id that can be persisted (COSE private key
//! label -5) and later used to sign. Platform handles are the process-local
//! counterpart: a live object that signs on the caller's behalf.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand_core::{OsRng, RngCore};

use crate::curve::EcCurve;
use crate::ecdsa;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    #[error("hardware key store is not available")]
    Unavailable,

    #[error("hardware key store does not support {0}")]
    UnsupportedCurve(EcCurve),

    #[error("unknown hardware key reference")]
    UnknownReference,

    #[error("hardware signing failed: {0}")]
    Signing(String),
}

/// A key store that generates and signs with non-extractable keys.
///
/// Signatures are raw `r || s`, computed over the digest matching the key's
/// curve (SHA-256 for P-256 and so on).
pub trait HardwareKeyStore: Send + Sync {
    fn is_available(&self) -> bool;

    fn supports_curve(&self, curve: EcCurve) -> bool;

    /// Create a new key and return its reference id.
    fn generate(&self, curve: EcCurve) -> Result<Vec<u8>, KeyStoreError>;

    /// Uncompressed (x9.63) public point for a reference id.
    fn public_point(&self, reference: &[u8]) -> Result<Vec<u8>, KeyStoreError>;

    fn sign(&self, reference: &[u8], data: &[u8]) -> Result<Vec<u8>, KeyStoreError>;
}

const REFERENCE_ID_LEN: usize = 32;

struct StoredKey {
    curve: EcCurve,
    scalar: Vec<u8>,
}

/// In-process key store that keeps scalars private to the store.
///
/// Like a secure enclave it only supports P-256. Used as the default
/// capability of the facade and in tests.
pub struct SoftwareKeyStore {
    available: bool,
    keys: Mutex<HashMap<Vec<u8>, StoredKey>>,
}

impl SoftwareKeyStore {
    pub fn new() -> Self {
        Self {
            available: true,
            keys: Mutex::new(HashMap::new()),
        }
    }

    /// A store that reports itself unavailable and refuses every operation.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            keys: Mutex::new(HashMap::new()),
        }
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }

    fn check_available(&self) -> Result<(), KeyStoreError> {
        if self.available {
            Ok(())
        } else {
            Err(KeyStoreError::Unavailable)
        }
    }
}

impl Default for SoftwareKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SoftwareKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareKeyStore")
            .field("available", &self.available)
            .field("keys", &self.len())
            .finish()
    }
}

impl HardwareKeyStore for SoftwareKeyStore {
    fn is_available(&self) -> bool {
        self.available
    }

    fn supports_curve(&self, curve: EcCurve) -> bool {
        curve == EcCurve::P256
    }

    fn generate(&self, curve: EcCurve) -> Result<Vec<u8>, KeyStoreError> {
        self.check_available()?;
        if !self.supports_curve(curve) {
            return Err(KeyStoreError::UnsupportedCurve(curve));
        }

        let (scalar, _) = ecdsa::generate(curve);
        let mut reference = vec![0u8; REFERENCE_ID_LEN];
        OsRng.fill_bytes(&mut reference);

        self.keys
            .lock()
            .insert(reference.clone(), StoredKey { curve, scalar });
        log::debug!("software key store generated a {curve} key");
        Ok(reference)
    }

    fn public_point(&self, reference: &[u8]) -> Result<Vec<u8>, KeyStoreError> {
        self.check_available()?;
        let keys = self.keys.lock();
        let key = keys.get(reference).ok_or(KeyStoreError::UnknownReference)?;
        ecdsa::public_point(key.curve, &key.scalar).map_err(|e| KeyStoreError::Signing(e.to_string()))
    }

    fn sign(&self, reference: &[u8], data: &[u8]) -> Result<Vec<u8>, KeyStoreError> {
        self.check_available()?;
        let keys = self.keys.lock();
        let key = keys.get(reference).ok_or(KeyStoreError::UnknownReference)?;
        ecdsa::sign(key.curve, &key.scalar, data).map_err(|e| KeyStoreError::Signing(e.to_string()))
    }
}

/// A live platform key object (for example a keychain item handle).
pub trait PlatformKey: Send + Sync {
    fn curve(&self) -> EcCurve;

    /// Uncompressed (x9.63) public point.
    fn public_point(&self) -> Result<Vec<u8>, KeyStoreError>;

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyStoreError>;
}

/// Shared, process-local handle to a [`PlatformKey`].
///
/// Two handles are equal when they refer to the same key object.
#[derive(Clone)]
pub struct PlatformKeyHandle(Arc<dyn PlatformKey>);

impl PlatformKeyHandle {
    pub fn new<K: PlatformKey + 'static>(key: K) -> Self {
        Self(Arc::new(key))
    }

    pub fn from_arc(key: Arc<dyn PlatformKey>) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &dyn PlatformKey {
        self.0.as_ref()
    }
}

impl PartialEq for PlatformKeyHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for PlatformKeyHandle {}

impl fmt::Debug for PlatformKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlatformKeyHandle").field(&self.0.curve()).finish()
    }
}
