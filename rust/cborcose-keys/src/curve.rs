// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Curve and key type identifiers (IANA COSE Elliptic Curves / Key Types registries).

use std::fmt;

use cborcose_common::CoseAlgorithm;

/// Supported elliptic curves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum EcCurve {
    P256 = 1,
    P384 = 2,
    P521 = 3,
}

impl EcCurve {
    /// Byte length of one affine coordinate (and of the private scalar).
    pub fn coordinate_length(self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    pub fn cose_identifier(self) -> u64 {
        self as u64
    }

    pub fn from_cose_identifier(id: u64) -> Option<Self> {
        match id {
            1 => Some(EcCurve::P256),
            2 => Some(EcCurve::P384),
            3 => Some(EcCurve::P521),
            _ => None,
        }
    }

    pub fn jwk_name(self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    pub fn from_jwk_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(EcCurve::P256),
            "P-384" => Some(EcCurve::P384),
            "P-521" => Some(EcCurve::P521),
            _ => None,
        }
    }

    /// Curve whose coordinates are `len` bytes long.
    pub fn from_coordinate_length(len: usize) -> Option<Self> {
        [EcCurve::P256, EcCurve::P384, EcCurve::P521]
            .into_iter()
            .find(|c| c.coordinate_length() == len)
    }

    pub fn key_type(self) -> EcKeyType {
        EcKeyType::EC2
    }

    /// The ECDSA algorithm paired with this curve.
    pub fn algorithm(self) -> CoseAlgorithm {
        match self {
            EcCurve::P256 => CoseAlgorithm::ES256,
            EcCurve::P384 => CoseAlgorithm::ES384,
            EcCurve::P521 => CoseAlgorithm::ES512,
        }
    }

    pub fn for_algorithm(alg: CoseAlgorithm) -> Self {
        match alg {
            CoseAlgorithm::ES256 => EcCurve::P256,
            CoseAlgorithm::ES384 => EcCurve::P384,
            CoseAlgorithm::ES512 => EcCurve::P521,
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.jwk_name())
    }
}

/// COSE key types. Only EC2 is supported.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum EcKeyType {
    EC2 = 2,
}

impl EcKeyType {
    pub fn cose_identifier(self) -> u64 {
        self as u64
    }

    pub fn from_cose_identifier(id: u64) -> Option<Self> {
        match id {
            2 => Some(EcKeyType::EC2),
            _ => None,
        }
    }

    pub fn jwk_name(self) -> &'static str {
        match self {
            EcKeyType::EC2 => "EC",
        }
    }

    pub fn from_jwk_name(name: &str) -> Option<Self> {
        match name {
            "EC" => Some(EcKeyType::EC2),
            _ => None,
        }
    }
}
