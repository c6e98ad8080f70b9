// ============================================
// File: crates/webid-dtls-codec/src/diagnostics.rs
// ============================================
//! # Advisory Diagnostics Sink
//!
//! ## Creation Reason
//! Some wire conditions are worth telling an operator about without
//! being errors: the WebID URI advisory length limit is the canonical
//! case. Exceeding it must still encode successfully, but operators
//! want to know because long URIs inflate every handshake.
//!
//! ## Main Functionality
//! - `Advisory`: enumeration of advisory events
//! - `Diagnostics`: sink trait injected into the codec
//! - `TracingDiagnostics`: default sink, logs via `tracing::warn!`
//! - `NoopDiagnostics`: silent sink for tests and embedded callers
//!
//! ## ⚠️ Important Note for Next Developer
//! - Advisories are side-channel reports, NEVER errors; do not turn one
//!   into an `Err` return
//! - The sink is injected per codec instance; do not reach for a
//!   process-global logger from inside encode paths
//!
//! ## Last Modified
//! v0.1.0 - Initial diagnostics sink

use std::fmt;

// ============================================
// Advisory Events
// ============================================

/// Advisory conditions the codec can report while encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// A WebID URI encoded to more bytes than the advisory limit.
    ///
    /// The message still encodes and decodes correctly; the limit exists
    /// for operational visibility only. Peers can often drop the
    /// `https://` scheme prefix to get back under the limit.
    OversizedUri {
        /// Encoded URI length in bytes.
        len: usize,
        /// The advisory limit that was exceeded.
        limit: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedUri { len, limit } => write!(
                f,
                "WebID URI is {len} bytes but should be at most {limit}; \
                 the 'https://' prefix can be omitted to save space"
            ),
        }
    }
}

// ============================================
// Diagnostics Trait
// ============================================

/// Sink for advisory conditions observed during encoding.
///
/// Injected into [`ProtocolCodec`](crate::protocol::ProtocolCodec) so the
/// codec itself carries no global logging state. Implementations must be
/// cheap and must not fail; an advisory is informational only.
pub trait Diagnostics: Send + Sync {
    /// Reports an advisory condition.
    fn advisory(&self, event: Advisory);
}

// ============================================
// Default Implementations
// ============================================

/// Diagnostics sink that forwards advisories to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn advisory(&self, event: Advisory) {
        match event {
            Advisory::OversizedUri { len, limit } => {
                tracing::warn!(len, limit, "{event}");
            }
        }
    }
}

/// Diagnostics sink that drops all advisories.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn advisory(&self, _event: Advisory) {}
}

// ============================================
// Test Support
// ============================================

/// Test sink that records every advisory it receives.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingDiagnostics {
    events: std::sync::Mutex<Vec<Advisory>>,
}

#[cfg(test)]
impl RecordingDiagnostics {
    pub(crate) fn events(&self) -> Vec<Advisory> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Diagnostics for RecordingDiagnostics {
    fn advisory(&self, event: Advisory) {
        self.events.lock().unwrap().push(event);
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_display_mentions_lengths() {
        let event = Advisory::OversizedUri { len: 61, limit: 50 };
        let text = event.to_string();
        assert!(text.contains("61"));
        assert!(text.contains("50"));
    }

    #[test]
    fn test_recording_sink_captures_events() {
        let sink = RecordingDiagnostics::default();
        sink.advisory(Advisory::OversizedUri { len: 80, limit: 50 });
        assert_eq!(
            sink.events(),
            vec![Advisory::OversizedUri { len: 80, limit: 50 }]
        );
    }
}
