//! Received sample: kind, key expression, payload.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Kind of a delivered sample, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// A value was published on the key expression.
    Put,
    /// The value under the key expression was deleted.
    Delete,
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKind::Put => f.write_str("PUT"),
            SampleKind::Delete => f.write_str("DELETE"),
        }
    }
}

/// One delivered unit of data.
///
/// Immutable and transient: the delivery worker renders it into a log line
/// and drops it. The key expression is shared (`Arc<str>`) because the
/// transport typically delivers many samples for the same key.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Sample classification (put vs delete).
    pub kind: SampleKind,
    /// Concrete key expression the sample was delivered on.
    pub key_expr: Arc<str>,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

impl Sample {
    /// Creates a `Put` sample.
    pub fn put(key_expr: impl Into<Arc<str>>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: SampleKind::Put,
            key_expr: key_expr.into(),
            payload: payload.into(),
        }
    }

    /// Creates a `Delete` sample.
    pub fn delete(key_expr: impl Into<Arc<str>>) -> Self {
        Self {
            kind: SampleKind::Delete,
            key_expr: key_expr.into(),
            payload: Vec::new(),
        }
    }

    /// Payload decoded as text, replacing invalid UTF-8 sequences.
    ///
    /// Delivery must never fail on a malformed payload, so the conversion
    /// is lossy rather than fallible.
    pub fn payload_as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Renders the canonical received-sample log line.
    ///
    /// The format is an external interface and must stay byte-exact:
    /// `Received {kind} ('{topic}': '{payload as text}')`.
    pub fn render(&self) -> String {
        format!(
            "Received {} ('{}': '{}')",
            self.kind,
            self.key_expr,
            self.payload_as_text()
        )
    }
}
