// ============================================
// File: crates/webid-dtls-codec/src/error.rs
// ============================================
//! # Codec Error Types
//!
//! ## Creation Reason
//! Defines the error taxonomy for handshake message encoding and
//! decoding in the webid-dtls-codec crate.
//!
//! ## Main Functionality
//! - `CodecError`: Primary error enum for codec operations
//! - `Result<T>`: Crate-wide result alias
//! - Convenience constructors and error classification
//!
//! ## Error Categories
//! 1. **Truncated input**: fewer bytes available than a declared field needs
//! 2. **Malformed messages**: length accounting that does not add up,
//!    trailing bytes, invalid UTF-8
//! 3. **Dispatch errors**: handshake type tags this codec does not own
//!
//! ## ⚠️ Important Note for Next Developer
//! - Unknown *enumeration codes* are NOT errors; they decode to
//!   `CodePoint::Unknown` so future peer revisions keep working
//! - Decode errors are fatal to the single decode call only, never to
//!   the process
//! - Error messages may quote lengths and codes, never message payloads
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

// ============================================
// CodecError
// ============================================

/// Error type for handshake message encoding and decoding.
///
/// Every decode failure is returned to the immediate caller (the
/// handshake orchestrator); the codec never logs-and-swallows a
/// structural error. Advisory conditions (e.g. an oversized WebID URI)
/// are reported through the diagnostics sink instead and are not errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input ended before a declared field could be read in full.
    #[error("message too short: expected at least {expected} more bytes, got {actual}")]
    MessageTooShort {
        /// Bytes the next field required.
        expected: usize,
        /// Bytes actually remaining.
        actual: usize,
    },

    /// The message violates its own framing rules.
    #[error("malformed message: {reason}")]
    MalformedMessage {
        /// What is wrong with the message.
        reason: String,
    },

    /// A decode was handed a handshake type tag this codec does not own.
    #[error("unknown handshake message type: 0x{0:02x}")]
    UnknownMessageType(u8),

    /// A trusted certificate handed to the authority-list builder was
    /// not parseable DER.
    #[error("invalid trusted certificate: {reason}")]
    InvalidCertificate {
        /// Why the certificate was rejected.
        reason: String,
    },
}

impl CodecError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `MalformedMessage` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage {
            reason: reason.into(),
        }
    }

    /// Creates a `MessageTooShort` error.
    #[must_use]
    pub const fn too_short(expected: usize, actual: usize) -> Self {
        Self::MessageTooShort { expected, actual }
    }

    /// Creates an `InvalidCertificate` error.
    pub fn invalid_certificate(reason: impl Into<String>) -> Self {
        Self::InvalidCertificate {
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if the error indicates bytes a peer actually sent
    /// were structurally invalid (as opposed to a local dispatch mistake).
    ///
    /// Structural errors on received datagrams may warrant additional
    /// logging by the orchestrator, since they can indicate a broken or
    /// hostile peer.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MessageTooShort { .. } | Self::MalformedMessage { .. }
        )
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::too_short(4, 1);
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('1'));

        let err = CodecError::malformed("authority block underflow");
        assert!(err.to_string().contains("authority block underflow"));

        let err = CodecError::UnknownMessageType(0xAB);
        assert!(err.to_string().contains("0xab"));
    }

    #[test]
    fn test_error_classification() {
        assert!(CodecError::too_short(2, 0).is_structural());
        assert!(CodecError::malformed("x").is_structural());
        assert!(!CodecError::UnknownMessageType(0x63).is_structural());
    }
}
