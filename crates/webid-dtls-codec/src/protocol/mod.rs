// ============================================
// File: crates/webid-dtls-codec/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Defines the wire format for the handshake messages this codec owns:
//! message structures, enumerated code tables, and serialization.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`algorithms`]: Enumerated code tables and the `CodePoint` sum type
//! - [`messages`]: Handshake message structures
//! - [`codec`]: Binary serialization/deserialization and dispatch
//!
//! ### Message Types
//! - `CertificateRequest`: server's request for a client certificate
//! - `WebIdUriMessage`: WebID identity URI vendor extension
//!
//! ## Wire Format Principles
//! - Big-endian byte order for multi-byte integers
//! - Byte-aligned 8- and 16-bit fields only
//! - Every variable-length list carries its own length accounting
//! - Unknown enumeration codes round-trip verbatim
//!
//! ## ⚠️ Important Note for Next Developer
//! - A decode must consume exactly its input, no more, no less
//! - List preference order is semantic; never reorder on re-encode
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol definitions

pub mod algorithms;
pub mod codec;
pub mod messages;

// Re-export primary types
pub use algorithms::{
    ClientCertificateType, CodePoint, HashAlgorithm, SignatureAlgorithm,
    SignatureAndHashAlgorithm, WireCode,
};
pub use codec::{Codec, Handshake, ProtocolCodec};
pub use messages::{
    CertificateRequest, CertificateRequestBuilder, DistinguishedName, HandshakeMessage,
    HandshakeType, WebIdUriMessage, MAX_WEBID_URI_LENGTH,
};
