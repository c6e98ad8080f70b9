// ============================================
// File: crates/webid-dtls-codec/src/protocol/algorithms.rs
// ============================================
//! # Enumerated Code Tables
//!
//! ## Creation Reason
//! The certificate request message carries three closed sets of
//! protocol-defined integers: client certificate types and the
//! hash/signature algorithm pairs the server can verify. Each needs a
//! total encode direction and a partial decode direction.
//!
//! ## Main Functionality
//! - `ClientCertificateType`: RFC 5246 §7.4.4 certificate type codes
//! - `HashAlgorithm` / `SignatureAlgorithm`: RFC 5246 A.4.1 codes
//! - `SignatureAndHashAlgorithm`: the wire pair of the two
//! - `CodePoint<T>`: `Known(T) | Unknown(u8)` sum preserving foreign codes
//!
//! ## Code Tables
//! | Table | Known codes |
//! |-------|-------------|
//! | ClientCertificateType | 1-6, 20, 64-66 (sparse) |
//! | HashAlgorithm | 0-6 (contiguous) |
//! | SignatureAlgorithm | 0-3 (contiguous) |
//!
//! ## ⚠️ Important Note for Next Developer
//! - `from_code` must stay total over 0-255 and never panic; peers may
//!   advertise codes from future protocol revisions
//! - `CodePoint` keeps the raw byte for unknown codes so re-encoding a
//!   decoded message is bit-exact
//! - Codes are `u8` on purpose: an out-of-range code is unrepresentable
//!
//! ## Last Modified
//! v0.1.0 - Initial code tables

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================
// WireCode Trait
// ============================================

/// A closed enumeration with a fixed 8-bit wire code per variant.
///
/// `code` is total and injective; `from_code` is partial (unmapped bytes
/// return `None`) and must never panic for any byte value.
pub trait WireCode: Copy {
    /// Returns the wire code of this variant.
    fn code(self) -> u8;

    /// Returns the variant for a wire code, or `None` if unmapped.
    fn from_code(code: u8) -> Option<Self>;
}

// ============================================
// CodePoint
// ============================================

/// A decoded 8-bit code: either a known variant or a foreign byte.
///
/// Decoding an unrecognized code is not an error — the peer may simply
/// be newer than we are — so the decode direction yields this sum type
/// instead of a nullable value, forcing callers to handle the unknown
/// case. The raw byte is kept so round-tripping is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodePoint<T> {
    /// A code this implementation knows.
    Known(T),
    /// A code outside the known table, preserved verbatim.
    Unknown(u8),
}

impl<T: WireCode> CodePoint<T> {
    /// Decodes a wire byte. Total: every byte value 0-255 maps to either
    /// `Known` or `Unknown`.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match T::from_code(code) {
            Some(variant) => Self::Known(variant),
            None => Self::Unknown(code),
        }
    }

    /// Returns the wire code, whichever side of the sum this is.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Known(variant) => variant.code(),
            Self::Unknown(code) => code,
        }
    }

    /// Returns the known variant, if this is one.
    #[must_use]
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(variant) => Some(variant),
            Self::Unknown(_) => None,
        }
    }
}

impl<T: WireCode> From<T> for CodePoint<T> {
    fn from(variant: T) -> Self {
        Self::Known(variant)
    }
}

impl<T: fmt::Display> fmt::Display for CodePoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(variant) => variant.fmt(f),
            Self::Unknown(code) => write!(f, "unknown(0x{code:02x})"),
        }
    }
}

// ============================================
// ClientCertificateType
// ============================================

/// Certificate types a client may offer, per RFC 5246 §7.4.4.
///
/// Listed in a certificate request in the server's preference order.
/// The code space is sparse: the FORTEZZA and ECDSA ranges sit apart
/// from the original RSA/DSS block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ClientCertificateType {
    /// RSA signing certificate.
    RsaSign = 1,
    /// DSS signing certificate.
    DssSign = 2,
    /// RSA certificate with fixed Diffie-Hellman parameters.
    RsaFixedDh = 3,
    /// DSS certificate with fixed Diffie-Hellman parameters.
    DssFixedDh = 4,
    /// Reserved (RSA, ephemeral DH).
    RsaEphemeralDhReserved = 5,
    /// Reserved (DSS, ephemeral DH).
    DssEphemeralDhReserved = 6,
    /// Reserved (FORTEZZA DMS).
    FortezzaDmsReserved = 20,
    /// ECDSA signing certificate.
    EcdsaSign = 64,
    /// RSA certificate with fixed ECDH parameters.
    RsaFixedEcdh = 65,
    /// ECDSA certificate with fixed ECDH parameters.
    EcdsaFixedEcdh = 66,
}

impl ClientCertificateType {
    /// Converts a wire code to a certificate type.
    #[must_use]
    pub const fn from_byte(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::RsaSign),
            2 => Some(Self::DssSign),
            3 => Some(Self::RsaFixedDh),
            4 => Some(Self::DssFixedDh),
            5 => Some(Self::RsaEphemeralDhReserved),
            6 => Some(Self::DssEphemeralDhReserved),
            20 => Some(Self::FortezzaDmsReserved),
            64 => Some(Self::EcdsaSign),
            65 => Some(Self::RsaFixedEcdh),
            66 => Some(Self::EcdsaFixedEcdh),
            _ => None,
        }
    }

    /// Returns the wire code of this certificate type.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

impl WireCode for ClientCertificateType {
    fn code(self) -> u8 {
        self.as_byte()
    }

    fn from_code(code: u8) -> Option<Self> {
        Self::from_byte(code)
    }
}

impl fmt::Display for ClientCertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RsaSign => "rsa_sign",
            Self::DssSign => "dss_sign",
            Self::RsaFixedDh => "rsa_fixed_dh",
            Self::DssFixedDh => "dss_fixed_dh",
            Self::RsaEphemeralDhReserved => "rsa_ephemeral_dh_RESERVED",
            Self::DssEphemeralDhReserved => "dss_ephemeral_dh_RESERVED",
            Self::FortezzaDmsReserved => "fortezza_dms_RESERVED",
            Self::EcdsaSign => "ecdsa_sign",
            Self::RsaFixedEcdh => "rsa_fixed_ecdh",
            Self::EcdsaFixedEcdh => "ecdsa_fixed_ecdh",
        };
        f.write_str(name)
    }
}

// ============================================
// HashAlgorithm
// ============================================

/// Hash algorithms per RFC 5246 A.4.1. Codes fit in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HashAlgorithm {
    /// No hash (only meaningful with anonymous signatures).
    None = 0,
    /// MD5 (legacy).
    Md5 = 1,
    /// SHA-1 (legacy).
    Sha1 = 2,
    /// SHA-224.
    Sha224 = 3,
    /// SHA-256.
    Sha256 = 4,
    /// SHA-384.
    Sha384 = 5,
    /// SHA-512.
    Sha512 = 6,
}

impl HashAlgorithm {
    /// Converts a wire code to a hash algorithm.
    #[must_use]
    pub const fn from_byte(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Md5),
            2 => Some(Self::Sha1),
            3 => Some(Self::Sha224),
            4 => Some(Self::Sha256),
            5 => Some(Self::Sha384),
            6 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Returns the wire code of this hash algorithm.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

impl WireCode for HashAlgorithm {
    fn code(self) -> u8 {
        self.as_byte()
    }

    fn from_code(code: u8) -> Option<Self> {
        Self::from_byte(code)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

// ============================================
// SignatureAlgorithm
// ============================================

/// Signature algorithms per RFC 5246 A.4.1. Codes fit in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureAlgorithm {
    /// Anonymous (no signature).
    Anonymous = 0,
    /// RSA.
    Rsa = 1,
    /// DSA.
    Dsa = 2,
    /// ECDSA.
    Ecdsa = 3,
}

impl SignatureAlgorithm {
    /// Converts a wire code to a signature algorithm.
    #[must_use]
    pub const fn from_byte(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Anonymous),
            1 => Some(Self::Rsa),
            2 => Some(Self::Dsa),
            3 => Some(Self::Ecdsa),
            _ => None,
        }
    }

    /// Returns the wire code of this signature algorithm.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

impl WireCode for SignatureAlgorithm {
    fn code(self) -> u8 {
        self.as_byte()
    }

    fn from_code(code: u8) -> Option<Self> {
        Self::from_byte(code)
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Anonymous => "anonymous",
            Self::Rsa => "rsa",
            Self::Dsa => "dsa",
            Self::Ecdsa => "ecdsa",
        };
        f.write_str(name)
    }
}

// ============================================
// SignatureAndHashAlgorithm
// ============================================

/// A hash/signature algorithm pair as carried on the wire (hash code
/// first, then signature code, one byte each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureAndHashAlgorithm {
    /// The hash half of the pair.
    pub hash: CodePoint<HashAlgorithm>,
    /// The signature half of the pair.
    pub signature: CodePoint<SignatureAlgorithm>,
}

impl SignatureAndHashAlgorithm {
    /// Pairs two known algorithms.
    #[must_use]
    pub fn new(hash: HashAlgorithm, signature: SignatureAlgorithm) -> Self {
        Self {
            hash: CodePoint::Known(hash),
            signature: CodePoint::Known(signature),
        }
    }

    /// Decodes a pair from its two wire bytes.
    #[must_use]
    pub fn from_codes(hash_code: u8, signature_code: u8) -> Self {
        Self {
            hash: CodePoint::from_code(hash_code),
            signature: CodePoint::from_code(signature_code),
        }
    }
}

impl fmt::Display for SignatureAndHashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-with-{}", self.hash, self.signature)
    }
}

// ============================================
// Tests
// ============================================
