// ============================================
// File: crates/webid-dtls-codec/src/lib.rs
// ============================================
//! # WebID-DTLS Codec - Handshake Message Wire Format
//!
//! ## Creation Reason
//! Provides the wire codec for handshake messages exchanged during
//! DTLS session setup with WebID identity support: the RFC 5246 §7.4.4
//! certificate request and the WebID URI vendor extension. The
//! handshake state machine, record layer, and certificate validation
//! live elsewhere and call in only through these interfaces.
//!
//! ## Main Functionality
//!
//! ### Protocol Module ([`protocol`])
//! - Message definitions (`CertificateRequest`, `WebIdUriMessage`)
//! - Enumerated code tables with forward-compatible unknown handling
//! - Binary codec for the bit-exact big-endian wire format
//!
//! ### Diagnostics Module ([`diagnostics`])
//! - Injected sink for advisory conditions (oversized WebID URI)
//!
//! ## Usage
//! ```
//! use webid_dtls_codec::protocol::{
//!     CertificateRequest, ClientCertificateType, Codec, HandshakeMessage,
//!     HashAlgorithm, ProtocolCodec, SignatureAlgorithm, SignatureAndHashAlgorithm,
//! };
//!
//! let request = CertificateRequest::builder()
//!     .certificate_type(ClientCertificateType::EcdsaSign)
//!     .signature_algorithm(SignatureAndHashAlgorithm::new(
//!         HashAlgorithm::Sha256,
//!         SignatureAlgorithm::Ecdsa,
//!     ))
//!     .build();
//!
//! let codec = ProtocolCodec::new();
//! let mut buf = bytes::BytesMut::new();
//! codec.encode(&request, &mut buf);
//! assert_eq!(buf.len(), request.wire_size());
//!
//! let mut bytes = buf.freeze();
//! let decoded: CertificateRequest = codec.decode(&mut bytes).unwrap();
//! assert_eq!(decoded, request);
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The codec is purely synchronous and side-effect-free apart from
//!   diagnostics; all messages are immutable value objects
//! - Decode errors are returned, never logged-and-swallowed
//! - Unknown enumeration codes from future peers are values, not errors
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod diagnostics;
pub mod error;
pub mod protocol;

// Re-export commonly used items
pub use diagnostics::{Advisory, Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use error::{CodecError, Result};
pub use protocol::{
    CertificateRequest, ClientCertificateType, Codec, CodePoint, DistinguishedName,
    Handshake, HandshakeMessage, HandshakeType, HashAlgorithm, ProtocolCodec,
    SignatureAlgorithm, SignatureAndHashAlgorithm, WebIdUriMessage,
};
