// ============================================
// File: crates/webid-dtls-codec/src/protocol/messages.rs
// ============================================
//! # Handshake Message Definitions
//!
//! ## Creation Reason
//! Defines the handshake messages this codec owns: the RFC 5246 §7.4.4
//! certificate request and the WebID URI vendor extension, plus the
//! type tags and the wire-size contract shared by both.
//!
//! ## Main Functionality
//! - `HandshakeType`: type tags for the messages this codec owns
//! - `HandshakeMessage`: type tag + wire size contract
//! - `CertificateRequest`: three length-prefixed lists, back-to-back
//! - `DistinguishedName`: opaque DER-encoded issuer/subject name
//! - `WebIdUriMessage`: single length-prefixed UTF-8 identity string
//!
//! ## Wire Format (Big Endian)
//! All multi-byte integers are encoded in big-endian byte order; see
//! [`codec`](crate::protocol::codec) for the exact field layout.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Messages are immutable value objects; construct them fully, either
//!   from complete sequences or through the builder
//! - `wire_size()` MUST equal the encoded length byte-for-byte; the
//!   outer handshake header trusts it when fragmenting
//! - Preference order of the certificate-request lists is significant,
//!   do not sort or dedup
//!
//! ## Last Modified
//! v0.1.0 - Initial message definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use x509_parser::prelude::*;

use crate::error::{CodecError, Result};
use crate::protocol::algorithms::{
    ClientCertificateType, CodePoint, SignatureAndHashAlgorithm,
};

// ============================================
// Constants
// ============================================

/// Advisory upper bound on an encoded WebID URI, in bytes.
///
/// Not a framing limit: longer URIs encode and decode correctly, but
/// every handshake carries the URI, so oversized ones are reported
/// through the diagnostics sink.
pub const MAX_WEBID_URI_LENGTH: usize = 50;

/// Fixed overhead of a certificate request body: one certificate-type
/// count byte plus two 16-bit list length fields.
pub const CERTIFICATE_REQUEST_FIXED_SIZE: usize = 5;

// ============================================
// HandshakeType
// ============================================

/// Type tags for the handshake messages this codec owns.
///
/// The full handshake-type enumeration (hello, key exchange, finished,
/// ...) belongs to the orchestrator; only the tags with a codec here are
/// listed. `from_byte` therefore returns `None` for tags that are valid
/// protocol-wide but not ours.
///
/// # Values
/// | Value | Type |
/// |-------|------|
/// | 13 | CertificateRequest (RFC 5246) |
/// | 24 | WebidUri (vendor extension) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandshakeType {
    /// Server requests a certificate from the client.
    CertificateRequest = 13,
    /// WebID identity URI exchange (raw-public-key peers).
    WebidUri = 24,
}

impl HandshakeType {
    /// Converts a byte to a handshake type owned by this codec.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            13 => Some(Self::CertificateRequest),
            24 => Some(Self::WebidUri),
            _ => None,
        }
    }

    /// Converts the handshake type to its byte representation.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for HandshakeType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_byte(value).ok_or(value)
    }
}

impl From<HandshakeType> for u8 {
    fn from(handshake_type: HandshakeType) -> Self {
        handshake_type.as_byte()
    }
}

// ============================================
// HandshakeMessage Trait
// ============================================

/// Contract shared by every concrete handshake message.
///
/// # Invariant
/// `wire_size()` equals the exact length in bytes of the encoded message
/// body (the outer handshake header is not included), computed without
/// encoding.
pub trait HandshakeMessage {
    /// Returns the type tag of this message.
    fn handshake_type(&self) -> HandshakeType;

    /// Returns the byte count of the encoded message body.
    fn wire_size(&self) -> usize;
}

// ============================================
// DistinguishedName
// ============================================

/// A DER-encoded X.500 distinguished name, treated as opaque bytes.
///
/// The codec performs no DER interpretation; rendering a name for humans
/// is the orchestrator's concern. Protocol guidance says a name is
/// between 1 and 65535 bytes, but the framing admits a zero-length name
/// and this codec accepts one — callers needing strict RFC conformance
/// must validate independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistinguishedName(Vec<u8>);

impl DistinguishedName {
    /// Wraps DER-encoded name bytes.
    #[must_use]
    pub const fn new(der: Vec<u8>) -> Self {
        Self(der)
    }

    /// Returns the DER bytes of the name.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the DER encoding in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the name has no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for DistinguishedName {
    fn from(der: Vec<u8>) -> Self {
        Self(der)
    }
}

impl AsRef<[u8]> for DistinguishedName {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================
// CertificateRequest
// ============================================

/// A non-anonymous server's request for a client certificate, per
/// RFC 5246 §7.4.4.
///
/// # Wire Format (variable, big-endian)
/// ```text
/// ┌────────────────────────────────────────────────────────┐
/// │ cert type count (1 byte)                               │
/// ├────────────────────────────────────────────────────────┤
/// │ cert type codes (1 byte each)                          │
/// ├────────────────────────────────────────────────────────┤
/// │ signature algorithms byte length (2 bytes, = 2×pairs)  │
/// ├────────────────────────────────────────────────────────┤
/// │ (hash code, signature code) pairs (2 bytes each)       │
/// ├────────────────────────────────────────────────────────┤
/// │ authorities byte length (2 bytes, = Σ (2 + name len))  │
/// ├────────────────────────────────────────────────────────┤
/// │ per authority: name length (2 bytes) + DER name bytes  │
/// └────────────────────────────────────────────────────────┘
/// ```
///
/// All three lists are ordered by descending preference; order is part
/// of the message's meaning and survives a round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Certificate types the client may offer, most preferred first.
    pub certificate_types: Vec<CodePoint<ClientCertificateType>>,
    /// Hash/signature pairs the server can verify, most preferred first.
    pub supported_signature_algorithms: Vec<SignatureAndHashAlgorithm>,
    /// Distinguished names of acceptable certificate authorities.
    pub certificate_authorities: Vec<DistinguishedName>,
}

impl CertificateRequest {
    /// Creates a certificate request from complete ordered sequences.
    #[must_use]
    pub fn new(
        certificate_types: Vec<CodePoint<ClientCertificateType>>,
        supported_signature_algorithms: Vec<SignatureAndHashAlgorithm>,
        certificate_authorities: Vec<DistinguishedName>,
    ) -> Self {
        Self {
            certificate_types,
            supported_signature_algorithms,
            certificate_authorities,
        }
    }

    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> CertificateRequestBuilder {
        CertificateRequestBuilder::default()
    }

    /// Builds the authority list from trusted certificates.
    ///
    /// Parses each DER-encoded certificate and wraps the raw DER of its
    /// subject name as a [`DistinguishedName`]. Convenience only: no
    /// signature or chain validation is performed here.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidCertificate`] if any input is not a
    /// parseable DER certificate.
    pub fn authorities_from_trusted_certificates<C: AsRef<[u8]>>(
        trusted: &[C],
    ) -> Result<Vec<DistinguishedName>> {
        let mut authorities = Vec::with_capacity(trusted.len());
        for der in trusted {
            let (_, certificate) = X509Certificate::from_der(der.as_ref())
                .map_err(|e| CodecError::invalid_certificate(e.to_string()))?;
            authorities.push(DistinguishedName::new(
                certificate.subject().as_raw().to_vec(),
            ));
        }
        Ok(authorities)
    }

    /// Returns the byte length of the authorities block: each name costs
    /// its own 16-bit length field plus its DER bytes.
    #[must_use]
    pub fn certificate_authorities_size(&self) -> usize {
        self.certificate_authorities
            .iter()
            .map(|name| 2 + name.len())
            .sum()
    }
}

impl HandshakeMessage for CertificateRequest {
    fn handshake_type(&self) -> HandshakeType {
        HandshakeType::CertificateRequest
    }

    fn wire_size(&self) -> usize {
        CERTIFICATE_REQUEST_FIXED_SIZE
            + self.certificate_types.len()
            + self.supported_signature_algorithms.len() * 2
            + self.certificate_authorities_size()
    }
}

impl fmt::Display for CertificateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertificateRequest(types: [")?;
        for (i, cert_type) in self.certificate_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cert_type}")?;
        }
        write!(f, "], algorithms: [")?;
        for (i, pair) in self.supported_signature_algorithms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pair}")?;
        }
        write!(
            f,
            "], {} authorities, {} bytes)",
            self.certificate_authorities.len(),
            self.certificate_authorities_size(),
        )
    }
}

// ============================================
// CertificateRequestBuilder
// ============================================

/// Accumulates certificate-request entries and produces the finished,
/// immutable message once.
#[derive(Debug, Default, Clone)]
pub struct CertificateRequestBuilder {
    certificate_types: Vec<CodePoint<ClientCertificateType>>,
    supported_signature_algorithms: Vec<SignatureAndHashAlgorithm>,
    certificate_authorities: Vec<DistinguishedName>,
}

impl CertificateRequestBuilder {
    /// Appends a certificate type (preference order is append order).
    #[must_use]
    pub fn certificate_type(mut self, cert_type: ClientCertificateType) -> Self {
        self.certificate_types.push(CodePoint::Known(cert_type));
        self
    }

    /// Appends a hash/signature algorithm pair.
    #[must_use]
    pub fn signature_algorithm(mut self, pair: SignatureAndHashAlgorithm) -> Self {
        self.supported_signature_algorithms.push(pair);
        self
    }

    /// Appends one certificate authority name.
    #[must_use]
    pub fn authority(mut self, name: DistinguishedName) -> Self {
        self.certificate_authorities.push(name);
        self
    }

    /// Appends authorities extracted from trusted DER certificates.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidCertificate`] if any input is not a
    /// parseable DER certificate.
    pub fn trusted_certificates<C: AsRef<[u8]>>(mut self, trusted: &[C]) -> Result<Self> {
        let mut extracted =
            CertificateRequest::authorities_from_trusted_certificates(trusted)?;
        self.certificate_authorities.append(&mut extracted);
        Ok(self)
    }

    /// Produces the finished message.
    #[must_use]
    pub fn build(self) -> CertificateRequest {
        CertificateRequest {
            certificate_types: self.certificate_types,
            supported_signature_algorithms: self.supported_signature_algorithms,
            certificate_authorities: self.certificate_authorities,
        }
    }
}

// ============================================
// WebIdUriMessage
// ============================================

/// WebID identity URI exchanged during the handshake.
///
/// Only needed for raw-public-key peers, where no X.509 SubjectAltName
/// can carry the URI. The peer's WebID profile is what gets verified,
/// so no certificate authority is required.
///
/// # Wire Format
/// ```text
/// ┌────────────────────────────────────────────┐
/// │ uri length (2 bytes)                       │
/// ├────────────────────────────────────────────┤
/// │ uri bytes (UTF-8, variable)                │
/// └────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebIdUriMessage {
    uri: String,
}

impl WebIdUriMessage {
    /// Creates a message carrying the given identity URI.
    #[must_use]
    pub const fn new(uri: String) -> Self {
        Self { uri }
    }

    /// Returns the identity URI in cleartext.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the canonical UTF-8 byte encoding of the URI.
    #[must_use]
    pub fn uri_bytes(&self) -> &[u8] {
        self.uri.as_bytes()
    }
}

impl From<&str> for WebIdUriMessage {
    fn from(uri: &str) -> Self {
        Self::new(uri.to_owned())
    }
}

impl HandshakeMessage for WebIdUriMessage {
    fn handshake_type(&self) -> HandshakeType {
        HandshakeType::WebidUri
    }

    fn wire_size(&self) -> usize {
        // 2 bytes for the length field, rest is the URI in bytes.
        2 + self.uri.len()
    }
}

impl fmt::Display for WebIdUriMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WebIdUri({})", self.uri)
    }
}

// ============================================
// Tests
// ============================================
