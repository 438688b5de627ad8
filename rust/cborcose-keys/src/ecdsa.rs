// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ECDSA primitives over P-256, P-384 and P-521.
//!
//! Signatures are the raw `r || s` concatenation carried by COSE. Each curve's
//! signer applies the digest matching its COSE algorithm (SHA-256/384/512).
//! Public keys are uncompressed SEC1 (x9.63) points.

use rand_core::OsRng;
use signature::{Signer, Verifier};

use crate::curve::EcCurve;
use crate::error::KeyError;

/// Generate a fresh key pair. Returns `(d, x963_public_point)`.
pub(crate) fn generate(curve: EcCurve) -> (Vec<u8>, Vec<u8>) {
    match curve {
        EcCurve::P256 => {
            let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
            let vk = p256::ecdsa::VerifyingKey::from(&sk);
            (sk.to_bytes().to_vec(), vk.to_encoded_point(false).as_bytes().to_vec())
        }
        EcCurve::P384 => {
            let sk = p384::ecdsa::SigningKey::random(&mut OsRng);
            let vk = p384::ecdsa::VerifyingKey::from(&sk);
            (sk.to_bytes().to_vec(), vk.to_encoded_point(false).as_bytes().to_vec())
        }
        EcCurve::P521 => {
            let sk = p521::ecdsa::SigningKey::random(&mut OsRng);
            let vk = p521::ecdsa::VerifyingKey::from(&sk);
            (sk.to_bytes().to_vec(), vk.to_encoded_point(false).as_bytes().to_vec())
        }
    }
}

/// Derive the x9.63 public point for a private scalar.
pub(crate) fn public_point(curve: EcCurve, d: &[u8]) -> Result<Vec<u8>, KeyError> {
    let bad = |e: signature::Error| KeyError::InvalidPrivateKey(format!("bad {curve} scalar: {e}"));
    let point = match curve {
        EcCurve::P256 => {
            let sk = p256::ecdsa::SigningKey::from_slice(d).map_err(bad)?;
            p256::ecdsa::VerifyingKey::from(&sk).to_encoded_point(false).as_bytes().to_vec()
        }
        EcCurve::P384 => {
            let sk = p384::ecdsa::SigningKey::from_slice(d).map_err(bad)?;
            p384::ecdsa::VerifyingKey::from(&sk).to_encoded_point(false).as_bytes().to_vec()
        }
        EcCurve::P521 => {
            let sk = p521::ecdsa::SigningKey::from_slice(d).map_err(bad)?;
            p521::ecdsa::VerifyingKey::from(&sk).to_encoded_point(false).as_bytes().to_vec()
        }
    };
    Ok(point)
}

/// Sign `msg` with the raw scalar `d`.
pub(crate) fn sign(curve: EcCurve, d: &[u8], msg: &[u8]) -> Result<Vec<u8>, KeyError> {
    match curve {
        EcCurve::P256 => sign_p256(d, msg),
        EcCurve::P384 => sign_p384(d, msg),
        EcCurve::P521 => sign_p521(d, msg),
    }
}

/// Verify a raw `r || s` signature over `msg`.
pub fn verify(curve: EcCurve, public_point: &[u8], msg: &[u8], sig: &[u8]) -> Result<(), KeyError> {
    match curve {
        EcCurve::P256 => verify_p256(public_point, msg, sig),
        EcCurve::P384 => verify_p384(public_point, msg, sig),
        EcCurve::P521 => verify_p521(public_point, msg, sig),
    }
}

/// Sign ES256 (P-256 ECDSA, SHA-256).
fn sign_p256(d: &[u8], msg: &[u8]) -> Result<Vec<u8>, KeyError> {
    let sk = p256::ecdsa::SigningKey::from_slice(d)
        .map_err(|e| KeyError::InvalidPrivateKey(format!("bad P-256 scalar: {e}")))?;
    let sig: p256::ecdsa::Signature = sk
        .try_sign(msg)
        .map_err(|e| KeyError::Signing(e.to_string()))?;
    Ok(sig.to_bytes().to_vec())
}

/// Sign ES384 (P-384 ECDSA, SHA-384).
fn sign_p384(d: &[u8], msg: &[u8]) -> Result<Vec<u8>, KeyError> {
    let sk = p384::ecdsa::SigningKey::from_slice(d)
        .map_err(|e| KeyError::InvalidPrivateKey(format!("bad P-384 scalar: {e}")))?;
    let sig: p384::ecdsa::Signature = sk
        .try_sign(msg)
        .map_err(|e| KeyError::Signing(e.to_string()))?;
    Ok(sig.to_bytes().to_vec())
}

/// Sign ES512 (P-521 ECDSA, SHA-512).
fn sign_p521(d: &[u8], msg: &[u8]) -> Result<Vec<u8>, KeyError> {
    let sk = p521::ecdsa::SigningKey::from_slice(d)
        .map_err(|e| KeyError::InvalidPrivateKey(format!("bad P-521 scalar: {e}")))?;
    let sig: p521::ecdsa::Signature = sk
        .try_sign(msg)
        .map_err(|e| KeyError::Signing(e.to_string()))?;
    Ok(sig.to_bytes().to_vec())
}

/// Verify ES256 (P-256 ECDSA).
fn verify_p256(point: &[u8], msg: &[u8], sig: &[u8]) -> Result<(), KeyError> {
    let vk = p256::ecdsa::VerifyingKey::from_sec1_bytes(point)
        .map_err(|e| KeyError::InvalidPublicKey(format!("bad P-256 public key: {e}")))?;
    let signature = p256::ecdsa::Signature::from_slice(sig)
        .map_err(|e| KeyError::BadSignature(format!("bad ES256 signature: {e}")))?;
    vk.verify(msg, &signature).map_err(|_| KeyError::VerificationFailed)
}

/// Verify ES384 (P-384 ECDSA).
fn verify_p384(point: &[u8], msg: &[u8], sig: &[u8]) -> Result<(), KeyError> {
    let vk = p384::ecdsa::VerifyingKey::from_sec1_bytes(point)
        .map_err(|e| KeyError::InvalidPublicKey(format!("bad P-384 public key: {e}")))?;
    let signature = p384::ecdsa::Signature::from_slice(sig)
        .map_err(|e| KeyError::BadSignature(format!("bad ES384 signature: {e}")))?;
    vk.verify(msg, &signature).map_err(|_| KeyError::VerificationFailed)
}

/// Verify ES512 (P-521 ECDSA).
fn verify_p521(point: &[u8], msg: &[u8], sig: &[u8]) -> Result<(), KeyError> {
    let vk = p521::ecdsa::VerifyingKey::from_sec1_bytes(point)
        .map_err(|e| KeyError::InvalidPublicKey(format!("bad P-521 public key: {e}")))?;
    let signature = p521::ecdsa::Signature::from_slice(sig)
        .map_err(|e| KeyError::BadSignature(format!("bad ES512 signature: {e}")))?;
    vk.verify(msg, &signature).map_err(|_| KeyError::VerificationFailed)
}
