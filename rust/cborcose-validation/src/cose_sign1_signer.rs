// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 creation.

use cborcose_common::{
    encode_protected_header, encode_signature1_sig_structure, CborMap, CborValue, Cose, CoseAlgorithm, CoseError,
    CoseType, HEADER_ALG, HEADER_KID,
};
use cborcose_keys::{CosePrivateKey, HardwareKeyStore, KeyError};

use crate::options::SignOptions;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error(transparent)]
    Cose(#[from] CoseError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Sign `payload` and assemble a COSE_Sign1 message.
///
/// The protected header is `{1: alg}`. The unprotected header carries the
/// optional `kid`. Hardware-reference keys sign through `key_store`.
pub fn make_cose_sign1(
    payload: &[u8],
    signer: &CosePrivateKey,
    alg: CoseAlgorithm,
    options: &SignOptions,
    key_store: Option<&dyn HardwareKeyStore>,
) -> Result<Cose, SignError> {
    let protected: CborMap = vec![(CborValue::int(HEADER_ALG), CborValue::int(alg.as_i64()))];
    let protected_header = encode_protected_header(&protected)?;

    let mut unprotected = CborMap::new();
    if let Some(kid) = &options.key_id {
        unprotected.push((CborValue::int(HEADER_KID), CborValue::Bytes(kid.clone())));
    }

    let tbs = encode_signature1_sig_structure(&protected_header, payload)?;
    let signature = signer.sign(alg, &tbs, key_store).map_err(|e| {
        log::warn!("COSE_Sign1 signing with {alg:?} failed: {e}");
        e
    })?;

    Ok(Cose {
        cose_type: CoseType::Sign1,
        protected_header,
        unprotected_header: Some(unprotected),
        payload: (!options.detached).then(|| payload.to_vec()),
        signature,
    })
}
