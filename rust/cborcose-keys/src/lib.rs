// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Elliptic-curve keys for COSE.
//!
//! - [`CosePublicKey`]: x9.63 points, COSE_Key maps and JWK.
//! - [`CosePrivateKey`]: raw-scalar, hardware-reference and platform-handle keys.
//! - [`HardwareKeyStore`]: the injected capability that signs with
//!   non-extractable keys.

pub mod curve;
pub mod ecdsa;
pub mod error;
pub mod jwk;
pub mod key_store;
pub mod private_key;
pub mod public_key;

pub use curve::{EcCurve, EcKeyType};
pub use error::KeyError;
pub use jwk::JwkEcPublicKey;
pub use key_store::{HardwareKeyStore, KeyStoreError, PlatformKey, PlatformKeyHandle, SoftwareKeyStore};
pub use private_key::{CosePrivateKey, SigningSource, KEY_LABEL_D, KEY_LABEL_HARDWARE_REFERENCE};
pub use public_key::{CosePublicKey, KEY_LABEL_CRV, KEY_LABEL_KTY, KEY_LABEL_X, KEY_LABEL_Y};
