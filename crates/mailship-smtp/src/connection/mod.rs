//! SMTP connection management: the channel abstraction and the
//! table-driven submission session.

mod session;
mod stream;

pub use session::{Credentials, Session, expect_reply};
pub use stream::{SmtpStream, TlsOptions, connect};

use crate::error::Result;

/// A line-oriented byte channel carrying one SMTP session.
///
/// A channel starts plaintext and may be upgraded to an encrypted
/// variant exactly once, in place, via STARTTLS. There is no downgrade
/// path. [`SmtpStream`] is the production implementation; tests drive
/// the session over scripted channels.
pub trait Channel: Sized {
    /// Reads one protocol line, without its terminator.
    ///
    /// Implementations must reconstruct line boundaries from arbitrary
    /// read chunking; a single read from the transport may carry zero
    /// or more complete lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or reaches end of
    /// stream before a line terminator.
    fn read_line(&mut self) -> impl Future<Output = Result<String>> + Send;

    /// Writes raw bytes to the channel and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_all(&mut self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Performs the STARTTLS handshake, consuming the plaintext
    /// channel and returning its encrypted replacement.
    ///
    /// # Errors
    ///
    /// Returns an error if the handshake fails or the channel is
    /// already encrypted.
    fn upgrade(self, hostname: &str, tls: &TlsOptions)
    -> impl Future<Output = Result<Self>> + Send;

    /// Whether the channel has been upgraded.
    fn is_encrypted(&self) -> bool;

    /// Closes the channel, sending the TLS close_notify first when
    /// encrypted.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown fails.
    fn shutdown(&mut self) -> impl Future<Output = Result<()>> + Send;
}
