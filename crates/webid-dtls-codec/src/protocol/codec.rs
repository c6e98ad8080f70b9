// ============================================
// File: crates/webid-dtls-codec/src/protocol/codec.rs
// ============================================
//! # Handshake Message Codec
//!
//! ## Creation Reason
//! Provides binary serialization and deserialization for the handshake
//! messages this crate owns, enabling bit-exact wire-format encoding.
//!
//! ## Main Functionality
//! - `Codec` trait: Generic encode/decode interface
//! - `ProtocolCodec`: Implementation for all message types, carrying the
//!   injected diagnostics sink
//! - `Handshake`: closed tagged-variant dispatch for the orchestrator
//!
//! ## Wire Format
//! All multi-byte integers are big-endian. Every field is byte-aligned;
//! the only widths used are 8 and 16 bits.
//!
//! ## Parsing Strategy
//! 1. Check remaining length before every read
//! 2. Account list block lengths down to exactly zero
//! 3. Reject leftover bytes after a structurally complete parse
//!
//! ## ⚠️ Important Note for Next Developer
//! - A decode MUST consume every byte of its input; silently ignoring
//!   trailing bytes would desynchronize the enclosing envelope stream
//! - The authorities block is self-delimited by byte count, not by an
//!   item count — never read past its declared boundary
//! - Unknown enum codes are values, not errors; see `CodePoint`
//!
//! ## Last Modified
//! v0.1.0 - Initial codec implementation

use std::fmt;
use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::diagnostics::{Advisory, Diagnostics, TracingDiagnostics};
use crate::error::{CodecError, Result};
use crate::protocol::algorithms::{CodePoint, SignatureAndHashAlgorithm};
use crate::protocol::messages::{
    CertificateRequest, DistinguishedName, HandshakeMessage, HandshakeType, WebIdUriMessage,
    MAX_WEBID_URI_LENGTH,
};

// ============================================
// Codec Trait
// ============================================

/// Trait for encoding and decoding handshake messages.
///
/// # Type Parameters
/// * `T` - The message type to encode/decode
pub trait Codec<T> {
    /// Encodes a message body into a byte buffer.
    ///
    /// # Arguments
    /// * `msg` - The message to encode
    /// * `buf` - Buffer to write encoded bytes
    fn encode(&self, msg: &T, buf: &mut BytesMut);

    /// Decodes a message body from bytes, consuming all of them.
    ///
    /// # Arguments
    /// * `buf` - Bytes to decode
    ///
    /// # Returns
    /// The decoded message, or an error if decoding fails or bytes
    /// remain unconsumed.
    fn decode(&self, buf: &mut Bytes) -> Result<T>;
}

// ============================================
// ProtocolCodec
// ============================================

/// Codec implementation for all handshake messages this crate owns.
///
/// Carries the diagnostics sink advisory conditions are reported to;
/// [`ProtocolCodec::new`] wires in [`TracingDiagnostics`]. The codec is
/// cheap to clone (clones share the sink) and safe to use from multiple
/// threads on distinct buffers.
#[derive(Clone)]
pub struct ProtocolCodec {
    diagnostics: Arc<dyn Diagnostics>,
}

impl ProtocolCodec {
    /// Creates a codec reporting advisories through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(TracingDiagnostics))
    }

    /// Creates a codec with an injected diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }

    /// Fails unless at least `needed` bytes remain in the buffer.
    fn need(buf: &Bytes, needed: usize) -> Result<()> {
        if buf.remaining() < needed {
            return Err(CodecError::too_short(needed, buf.remaining()));
        }
        Ok(())
    }

    /// Fails if any bytes remain after a structurally complete parse.
    ///
    /// Partial consumption is a defect, not tolerable slack: the
    /// orchestrator hands each decode exactly the body length declared
    /// by the handshake header, so leftovers mean the message lied
    /// about its own structure.
    fn finish(buf: &Bytes) -> Result<()> {
        if buf.has_remaining() {
            return Err(CodecError::malformed(format!(
                "{} trailing bytes after message body",
                buf.remaining()
            )));
        }
        Ok(())
    }
}

impl Default for ProtocolCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProtocolCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolCodec").finish_non_exhaustive()
    }
}

// ============================================
// CertificateRequest Codec
// ============================================

impl Codec<CertificateRequest> for ProtocolCodec {
    /// # Panics
    ///
    /// Panics if a list exceeds its wire length field: more than 255
    /// certificate types, or signature-algorithm / authority blocks
    /// larger than 65535 bytes. Those are caller-constructed messages
    /// that cannot be framed at all, a programmer error rather than a
    /// runtime condition.
    fn encode(&self, msg: &CertificateRequest, buf: &mut BytesMut) {
        let type_count = msg.certificate_types.len();
        let signature_bytes = msg.supported_signature_algorithms.len() * 2;
        let authority_bytes = msg.certificate_authorities_size();
        assert!(
            type_count <= usize::from(u8::MAX),
            "certificate type count {type_count} exceeds the 8-bit count field"
        );
        assert!(
            signature_bytes <= usize::from(u16::MAX),
            "signature algorithm block of {signature_bytes} bytes exceeds the 16-bit length field"
        );
        assert!(
            authority_bytes <= usize::from(u16::MAX),
            "authority block of {authority_bytes} bytes exceeds the 16-bit length field"
        );

        buf.reserve(msg.wire_size());

        buf.put_u8(type_count as u8);
        for cert_type in &msg.certificate_types {
            buf.put_u8(cert_type.code());
        }

        buf.put_u16(signature_bytes as u16);
        for pair in &msg.supported_signature_algorithms {
            buf.put_u8(pair.hash.code());
            buf.put_u8(pair.signature.code());
        }

        buf.put_u16(authority_bytes as u16);
        for name in &msg.certificate_authorities {
            // Each name carries its own length field; that overhead is
            // already part of the block length above.
            buf.put_u16(name.len() as u16);
            buf.put_slice(name.as_bytes());
        }
    }

    fn decode(&self, buf: &mut Bytes) -> Result<CertificateRequest> {
        Self::need(buf, 1)?;
        let type_count = usize::from(buf.get_u8());
        Self::need(buf, type_count)?;
        let mut certificate_types = Vec::with_capacity(type_count);
        for _ in 0..type_count {
            certificate_types.push(CodePoint::from_code(buf.get_u8()));
        }

        Self::need(buf, 2)?;
        let signature_bytes = usize::from(buf.get_u16());
        if signature_bytes % 2 != 0 {
            return Err(CodecError::malformed(format!(
                "signature algorithm block length {signature_bytes} is not a whole number of pairs"
            )));
        }
        Self::need(buf, signature_bytes)?;
        let mut supported_signature_algorithms = Vec::with_capacity(signature_bytes / 2);
        for _ in 0..signature_bytes / 2 {
            let hash_code = buf.get_u8();
            let signature_code = buf.get_u8();
            supported_signature_algorithms
                .push(SignatureAndHashAlgorithm::from_codes(hash_code, signature_code));
        }

        Self::need(buf, 2)?;
        let authority_bytes = usize::from(buf.get_u16());
        Self::need(buf, authority_bytes)?;

        // The block is self-delimited by its byte count, not an item
        // count: consume (length, name) entries until the declared
        // length reaches exactly zero.
        let mut certificate_authorities = Vec::new();
        let mut remaining_block = authority_bytes;
        while remaining_block > 0 {
            if remaining_block < 2 {
                return Err(CodecError::malformed(format!(
                    "authority block leaves {remaining_block} dangling byte(s) where a name length field was expected"
                )));
            }
            let name_length = usize::from(buf.get_u16());
            remaining_block -= 2;
            if name_length > remaining_block {
                return Err(CodecError::malformed(format!(
                    "authority name of {name_length} bytes overruns its block ({remaining_block} bytes left)"
                )));
            }
            let name = buf.copy_to_bytes(name_length);
            certificate_authorities.push(DistinguishedName::new(name.to_vec()));
            remaining_block -= name_length;
        }

        Self::finish(buf)?;
        Ok(CertificateRequest::new(
            certificate_types,
            supported_signature_algorithms,
            certificate_authorities,
        ))
    }
}

// ============================================
// WebIdUriMessage Codec
// ============================================

impl Codec<WebIdUriMessage> for ProtocolCodec {
    /// # Panics
    ///
    /// Panics if the URI encodes to more than 65535 bytes, which cannot
    /// be framed in the 16-bit length field. URIs longer than the
    /// *advisory* limit ([`MAX_WEBID_URI_LENGTH`]) encode fine and are
    /// only reported through the diagnostics sink.
    fn encode(&self, msg: &WebIdUriMessage, buf: &mut BytesMut) {
        let uri_bytes = msg.uri_bytes();
        assert!(
            uri_bytes.len() <= usize::from(u16::MAX),
            "WebID URI of {} bytes exceeds the 16-bit length field",
            uri_bytes.len()
        );

        buf.reserve(msg.wire_size());
        buf.put_u16(uri_bytes.len() as u16);
        buf.put_slice(uri_bytes);

        if uri_bytes.len() > MAX_WEBID_URI_LENGTH {
            self.diagnostics.advisory(Advisory::OversizedUri {
                len: uri_bytes.len(),
                limit: MAX_WEBID_URI_LENGTH,
            });
        }
    }

    fn decode(&self, buf: &mut Bytes) -> Result<WebIdUriMessage> {
        Self::need(buf, 2)?;
        let uri_length = usize::from(buf.get_u16());
        Self::need(buf, uri_length)?;
        let uri_bytes = buf.copy_to_bytes(uri_length);
        let uri = String::from_utf8(uri_bytes.to_vec())
            .map_err(|_| CodecError::malformed("WebID URI is not valid UTF-8"))?;

        Self::finish(buf)?;
        Ok(WebIdUriMessage::new(uri))
    }
}

// ============================================
// Handshake Dispatch
// ============================================

/// Closed tagged-variant type for the messages this codec owns.
///
/// The handshake orchestrator parses the outer envelope (type tag plus
/// body length) and hands the body here. Adding a message type is a
/// compile-time-checked addition to this enum, not runtime subclassing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handshake {
    /// RFC 5246 §7.4.4 certificate request.
    CertificateRequest(CertificateRequest),
    /// WebID URI vendor extension.
    WebidUri(WebIdUriMessage),
}

impl HandshakeMessage for Handshake {
    fn handshake_type(&self) -> HandshakeType {
        match self {
            Self::CertificateRequest(msg) => msg.handshake_type(),
            Self::WebidUri(msg) => msg.handshake_type(),
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::CertificateRequest(msg) => msg.wire_size(),
            Self::WebidUri(msg) => msg.wire_size(),
        }
    }
}

impl ProtocolCodec {
    /// Decodes a handshake message body for the given type tag.
    ///
    /// `body` must be exactly the body length declared by the outer
    /// handshake header; trailing or missing bytes are errors.
    ///
    /// # Errors
    ///
    /// * [`CodecError::UnknownMessageType`] for tags this codec does
    ///   not own.
    /// * Any structural decode error from the message's codec.
    pub fn decode_handshake(&self, type_tag: u8, body: &[u8]) -> Result<Handshake> {
        let handshake_type = HandshakeType::from_byte(type_tag)
            .ok_or(CodecError::UnknownMessageType(type_tag))?;
        let mut buf = Bytes::copy_from_slice(body);
        match handshake_type {
            HandshakeType::CertificateRequest => {
                Ok(Handshake::CertificateRequest(self.decode(&mut buf)?))
            }
            HandshakeType::WebidUri => Ok(Handshake::WebidUri(self.decode(&mut buf)?)),
        }
    }

    /// Encodes a handshake message body.
    #[must_use]
    pub fn encode_handshake(&self, msg: &Handshake) -> BytesMut {
        let mut buf = BytesMut::with_capacity(msg.wire_size());
        match msg {
            Handshake::CertificateRequest(inner) => self.encode(inner, &mut buf),
            Handshake::WebidUri(inner) => self.encode(inner, &mut buf),
        }
        buf
    }
}

// ============================================
// Convenience Functions
// ============================================

/// Encodes a certificate request body to bytes.
#[must_use]
pub fn encode_certificate_request(msg: &CertificateRequest) -> BytesMut {
    let mut buf = BytesMut::with_capacity(msg.wire_size());
    ProtocolCodec::new().encode(msg, &mut buf);
    buf
}

/// Decodes a certificate request body from bytes.
///
/// # Errors
///
/// Returns a structural error if the bytes are truncated, the length
/// accounting does not add up, or bytes remain unconsumed.
pub fn decode_certificate_request(buf: &[u8]) -> Result<CertificateRequest> {
    let mut bytes = Bytes::copy_from_slice(buf);
    ProtocolCodec::new().decode(&mut bytes)
}

/// Encodes a WebID URI message body to bytes.
#[must_use]
pub fn encode_webid_uri(msg: &WebIdUriMessage) -> BytesMut {
    let mut buf = BytesMut::with_capacity(msg.wire_size());
    ProtocolCodec::new().encode(msg, &mut buf);
    buf
}

/// Decodes a WebID URI message body from bytes.
///
/// # Errors
///
/// Returns a structural error if the bytes are truncated, not valid
/// UTF-8, or bytes remain unconsumed.
pub fn decode_webid_uri(buf: &[u8]) -> Result<WebIdUriMessage> {
    let mut bytes = Bytes::copy_from_slice(buf);
    ProtocolCodec::new().decode(&mut bytes)
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::protocol::algorithms::{
        ClientCertificateType, HashAlgorithm, SignatureAlgorithm,
    };

    fn sample_request() -> CertificateRequest {
        CertificateRequest::new(
            vec![
                CodePoint::Known(ClientCertificateType::RsaSign),
                CodePoint::Known(ClientCertificateType::EcdsaSign),
            ],
            vec![SignatureAndHashAlgorithm::new(
                HashAlgorithm::Sha256,
                SignatureAlgorithm::Rsa,
            )],
            vec![DistinguishedName::new(vec![0x30, 0x02, 0x31, 0x00])],
        )
    }

    #[test]
    fn test_certificate_request_known_byte_vector() {
        // count=2; codes 1, 64; sigLen=2; hash=4 sig=1; authLen=6;
        // nameLen=4; name bytes.
        let expected: &[u8] = &[
            0x02, 0x01, 0x40, 0x00, 0x02, 0x04, 0x01, 0x00, 0x06, 0x00, 0x04, 0x30, 0x02,
            0x31, 0x00,
        ];
        let encoded = encode_certificate_request(&sample_request());
        assert_eq!(&encoded[..], expected);

        let decoded = decode_certificate_request(expected).unwrap();
        assert_eq!(decoded, sample_request());
    }

    #[test]
    fn test_certificate_request_roundtrip() {
        let original = sample_request();
        let encoded = encode_certificate_request(&original);
        assert_eq!(encoded.len(), original.wire_size());

        let decoded = decode_certificate_request(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_empty_request_roundtrip() {
        // Zero-length lists are valid and encode as bare zero fields.
        let original = CertificateRequest::new(vec![], vec![], vec![]);
        let encoded = encode_certificate_request(&original);
        assert_eq!(&encoded[..], &[0x00, 0x00, 0x00, 0x00, 0x00]);

        let decoded = decode_certificate_request(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_unknown_codes_roundtrip_bit_exact() {
        let original = CertificateRequest::new(
            vec![CodePoint::Unknown(99), CodePoint::Known(ClientCertificateType::RsaSign)],
            vec![SignatureAndHashAlgorithm::from_codes(0xEE, 0x7F)],
            vec![],
        );
        let encoded = encode_certificate_request(&original);
        let decoded = decode_certificate_request(&encoded).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.certificate_types[0], CodePoint::Unknown(99));
        assert_eq!(
            decoded.supported_signature_algorithms[0].hash,
            CodePoint::Unknown(0xEE)
        );
    }

    #[test]
    fn test_authority_block_exactness() {
        let names = vec![
            DistinguishedName::new(vec![0xAA; 3]),
            DistinguishedName::new(vec![]),
            DistinguishedName::new(vec![0xBB; 7]),
        ];
        let original = CertificateRequest::new(vec![], vec![], names.clone());
        // Σ (2 + len) = 5 + 2 + 9
        assert_eq!(original.certificate_authorities_size(), 16);

        let encoded = encode_certificate_request(&original);
        let block_length = u16::from_be_bytes([encoded[3], encoded[4]]);
        assert_eq!(block_length, 16);

        let decoded = decode_certificate_request(&encoded).unwrap();
        assert_eq!(decoded.certificate_authorities, names);
    }

    #[test]
    fn test_zero_length_name_accepted() {
        // Framing admits a zero-length name even though the RFC implies
        // names are non-empty; the codec does not police the minimum.
        let original = CertificateRequest::new(
            vec![],
            vec![],
            vec![DistinguishedName::new(vec![])],
        );
        let decoded =
            decode_certificate_request(&encode_certificate_request(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_large_lists_roundtrip() {
        // 255 types is the largest count the 8-bit field can carry.
        let original = CertificateRequest::new(
            (0..255u8).map(CodePoint::from_code).collect(),
            vec![
                SignatureAndHashAlgorithm::new(
                    HashAlgorithm::Sha512,
                    SignatureAlgorithm::Ecdsa
                );
                300
            ],
            (0..40).map(|i| DistinguishedName::new(vec![i as u8; i])).collect(),
        );
        let encoded = encode_certificate_request(&original);
        assert_eq!(encoded.len(), original.wire_size());
        let decoded = decode_certificate_request(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_truncation_of_every_strict_prefix_fails() {
        let encoded = encode_certificate_request(&sample_request());
        for cut in 0..encoded.len() {
            let result = decode_certificate_request(&encoded[..cut]);
            assert!(
                result.is_err(),
                "prefix of {cut} bytes must fail, got {result:?}"
            );
        }
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut encoded = encode_certificate_request(&sample_request()).to_vec();
        encoded.push(0x00);
        let result = decode_certificate_request(&encoded);
        assert!(matches!(result, Err(CodecError::MalformedMessage { .. })));
    }

    #[test]
    fn test_dangling_authority_entry_rejected() {
        // Block declares 1 byte, which cannot hold a 2-byte length field.
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x01, 0xAA];
        let result = decode_certificate_request(&bytes);
        assert!(matches!(result, Err(CodecError::MalformedMessage { .. })));
    }

    #[test]
    fn test_authority_name_overrunning_block_rejected() {
        // Block of 4 bytes, but the entry claims a 5-byte name. The name
        // bytes beyond the block boundary must not be consumed.
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x05, 0xAA, 0xBB, 0xCC];
        let result = decode_certificate_request(&bytes);
        assert!(matches!(result, Err(CodecError::MalformedMessage { .. })));
    }

    #[test]
    fn test_odd_signature_block_length_rejected() {
        let bytes = [0x00, 0x00, 0x03, 0x04, 0x01, 0x04, 0x00, 0x00];
        let result = decode_certificate_request(&bytes);
        assert!(matches!(result, Err(CodecError::MalformedMessage { .. })));
    }

    #[test]
    fn test_webid_uri_roundtrip() {
        let original = WebIdUriMessage::from("https://example.org/card#me");
        let encoded = encode_webid_uri(&original);
        assert_eq!(encoded.len(), original.wire_size());
        assert_eq!(
            u16::from_be_bytes([encoded[0], encoded[1]]) as usize,
            original.uri_bytes().len()
        );

        let decoded = decode_webid_uri(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_webid_uri_empty_roundtrip() {
        let original = WebIdUriMessage::from("");
        let encoded = encode_webid_uri(&original);
        assert_eq!(&encoded[..], &[0x00, 0x00]);
        assert_eq!(decode_webid_uri(&encoded).unwrap(), original);
    }

    #[test]
    fn test_webid_uri_truncation_fails() {
        let encoded = encode_webid_uri(&WebIdUriMessage::from("https://w.id/a"));
        for cut in 0..encoded.len() {
            assert!(decode_webid_uri(&encoded[..cut]).is_err());
        }
    }

    #[test]
    fn test_webid_uri_invalid_utf8_rejected() {
        let bytes = [0x00, 0x02, 0xC3, 0x28]; // invalid 2-byte sequence
        let result = decode_webid_uri(&bytes);
        assert!(matches!(result, Err(CodecError::MalformedMessage { .. })));
    }

    #[test]
    fn test_webid_uri_trailing_bytes_rejected() {
        let mut encoded = encode_webid_uri(&WebIdUriMessage::from("a")).to_vec();
        encoded.push(0x21);
        assert!(matches!(
            decode_webid_uri(&encoded),
            Err(CodecError::MalformedMessage { .. })
        ));
    }

    #[test]
    fn test_oversized_uri_encodes_and_reports_advisory() {
        let sink = Arc::new(RecordingDiagnostics::default());
        let codec = ProtocolCodec::with_diagnostics(sink.clone());

        let long_uri = format!("https://example.org/{}", "x".repeat(60));
        let message = WebIdUriMessage::new(long_uri);
        let mut buf = BytesMut::new();
        codec.encode(&message, &mut buf);

        // Encoding still succeeds and round-trips.
        let mut bytes = buf.freeze();
        let decoded: WebIdUriMessage = codec.decode(&mut bytes).unwrap();
        assert_eq!(decoded, message);

        assert_eq!(
            sink.events(),
            vec![Advisory::OversizedUri {
                len: message.uri_bytes().len(),
                limit: MAX_WEBID_URI_LENGTH,
            }]
        );
    }

    #[test]
    fn test_uri_within_limit_stays_quiet() {
        let sink = Arc::new(RecordingDiagnostics::default());
        let codec = ProtocolCodec::with_diagnostics(sink.clone());
        let mut buf = BytesMut::new();
        codec.encode(&WebIdUriMessage::from("https://w.id/me"), &mut buf);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_handshake_dispatch_roundtrip() {
        let codec = ProtocolCodec::new();
        for message in [
            Handshake::CertificateRequest(sample_request()),
            Handshake::WebidUri(WebIdUriMessage::from("https://example.org/card#me")),
        ] {
            let encoded = codec.encode_handshake(&message);
            assert_eq!(encoded.len(), message.wire_size());
            let decoded = codec
                .decode_handshake(message.handshake_type().as_byte(), &encoded)
                .unwrap();
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn test_handshake_dispatch_unknown_tag() {
        let codec = ProtocolCodec::new();
        let result = codec.decode_handshake(0x63, &[0x00]);
        assert!(matches!(result, Err(CodecError::UnknownMessageType(0x63))));
    }
}
