//! Error types for SMTP operations.

use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure (connect, read, write).
    #[error("connection error: {0}")]
    Connection(#[from] io::Error),

    /// TLS handshake or record-layer failure during STARTTLS.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Server reply did not match the code expected at the current step.
    #[error("unexpected reply: expected {expected}, got {}: {reply}", actual.as_deref().unwrap_or("none received"))]
    UnexpectedReply {
        /// Code the current step required.
        expected: String,
        /// Code actually parsed from the final reply line, if any.
        actual: Option<String>,
        /// Accumulated reply text, joined for diagnostics.
        reply: String,
    },

    /// Invalid email address.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Protocol misuse detected locally (e.g. upgrading an already
    /// encrypted channel).
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl Error {
    /// Creates an unexpected-reply error from the match decision inputs.
    #[must_use]
    pub fn unexpected_reply(
        expected: impl Into<String>,
        actual: Option<String>,
        reply: impl Into<String>,
    ) -> Self {
        Self::UnexpectedReply {
            expected: expected.into(),
            actual,
            reply: reply.into(),
        }
    }

    /// Returns true if this error came from the transport rather than
    /// the protocol exchange.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_))
    }
}
