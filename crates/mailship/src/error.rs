//! Unified error surface for a send operation.

use mailship_smtp::rustls;
use std::io;
use std::path::PathBuf;

/// Result type alias for send operations.
pub type Result<T> = std::result::Result<T, SendError>;

/// Everything that can go wrong while sending one message.
///
/// A send either completes the full protocol sequence or reports
/// exactly one of these kinds; nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// Transport-level failure (connect, read, write).
    #[error("connection error: {0}")]
    Connection(#[source] io::Error),

    /// The STARTTLS upgrade failed.
    #[error("TLS handshake error: {0}")]
    TlsHandshake(#[source] rustls::Error),

    /// A server reply's status code did not match the expected code
    /// for the current protocol step.
    #[error("protocol error: expected {expected}, got {}: {reply}", actual.as_deref().unwrap_or("none received"))]
    Protocol {
        /// Code the step required.
        expected: String,
        /// Code actually received, if any was parsable.
        actual: Option<String>,
        /// Accumulated reply text.
        reply: String,
    },

    /// A referenced attachment could not be read; raised during
    /// rendering, before any network interaction.
    #[error("attachment unreadable: {path}: {source}")]
    AttachmentUnreadable {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An envelope address failed validation.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl From<mailship_smtp::Error> for SendError {
    fn from(err: mailship_smtp::Error) -> Self {
        match err {
            mailship_smtp::Error::Connection(io) => Self::Connection(io),
            mailship_smtp::Error::Tls(tls) => Self::TlsHandshake(tls),
            mailship_smtp::Error::UnexpectedReply {
                expected,
                actual,
                reply,
            } => Self::Protocol {
                expected,
                actual,
                reply,
            },
            mailship_smtp::Error::InvalidAddress(addr) => Self::InvalidAddress(addr),
            mailship_smtp::Error::Protocol(msg) => Self::Protocol {
                expected: String::new(),
                actual: None,
                reply: msg,
            },
        }
    }
}

impl From<mailship_mime::Error> for SendError {
    fn from(err: mailship_mime::Error) -> Self {
        match err {
            mailship_mime::Error::Attachment { path, source } => {
                Self::AttachmentUnreadable { path, source }
            }
        }
    }
}
