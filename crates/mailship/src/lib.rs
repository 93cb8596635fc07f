//! # mailship
//!
//! Mail submission client: renders a MIME message and drives one
//! STARTTLS SMTP session to deliver it.
//!
//! One call to [`send`] performs the entire fixed sequence — connect,
//! greeting, EHLO, STARTTLS upgrade, EHLO, AUTH LOGIN, MAIL FROM,
//! RCPT TO, DATA, QUIT — and either completes it all or reports a
//! single inspectable [`SendError`]. Sessions are never reused and
//! nothing is retried.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailship::{Mailbox, Message, SmtpServer, send};
//!
//! #[tokio::main]
//! async fn main() -> mailship::Result<()> {
//!     let server = SmtpServer::new(
//!         "smtp.example.com",
//!         587,
//!         "user@example.com",
//!         "app-password",
//!     );
//!
//!     let message = Message::new(
//!         Mailbox::with_name("Sender", "sender@example.com"),
//!         "Quarterly report",
//!         "Report attached.",
//!     )
//!     .to(Mailbox::new("recipient@example.com"))
//!     .attach("report.pdf");
//!
//!     send(&server, &message).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;

pub use error::{Result, SendError};
pub use mailship_mime::{Mailbox, Message};
pub use mailship_smtp::TlsOptions;

use mailship_smtp::{Address, Credentials, Envelope, Session, connect};

/// SMTP submission server settings for one account.
#[derive(Debug, Clone)]
pub struct SmtpServer {
    /// Server hostname, also used for the TLS server name.
    pub host: String,
    /// Submission port (587 for STARTTLS).
    pub port: u16,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// TLS policy for the STARTTLS upgrade. Certificate validation is
    /// on by default; disabling it is an explicit opt-in.
    pub tls: TlsOptions,
}

impl SmtpServer {
    /// Creates server settings with the default TLS policy.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            tls: TlsOptions::default(),
        }
    }

    /// Replaces the TLS policy.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = tls;
        self
    }
}

/// Sends one message through one fresh SMTP session.
///
/// The message is rendered first, so attachment read failures surface
/// before any connection is opened. The connection is released on
/// every exit path.
///
/// # Errors
///
/// Returns the first connection, TLS handshake, protocol, attachment,
/// or address error; see [`SendError`].
pub async fn send(server: &SmtpServer, message: &Message) -> Result<()> {
    let payload = mailship_mime::render(message)?;
    let envelope = build_envelope(message)?;

    tracing::debug!(host = %server.host, port = server.port, "connecting");
    let stream = connect(&server.host, server.port).await?;

    let session = Session::new(
        stream,
        server.host.clone(),
        Credentials::new(&server.username, &server.password),
    )
    .with_tls(server.tls.clone());

    session.send(&envelope, &payload).await?;
    tracing::debug!("message accepted");
    Ok(())
}

/// Builds the SMTP envelope from the message's address lists,
/// validating every address.
fn build_envelope(message: &Message) -> Result<Envelope> {
    let mut envelope = Envelope::new(Address::new(&message.from.email)?);
    for mailbox in &message.to {
        envelope.to.push(Address::new(&mailbox.email)?);
    }
    for mailbox in &message.cc {
        envelope.cc.push(Address::new(&mailbox.email)?);
    }
    for mailbox in &message.bcc {
        envelope.bcc.push(Address::new(&mailbox.email)?);
    }
    Ok(envelope)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_all_address_lists() {
        let message = Message::new(Mailbox::new("from@example.com"), "s", "b")
            .to(Mailbox::new("to@example.com"))
            .cc(Mailbox::new("cc@example.com"))
            .bcc(Mailbox::new("bcc@example.com"));

        let envelope = build_envelope(&message).unwrap();
        assert_eq!(envelope.from.as_str(), "from@example.com");
        assert_eq!(envelope.to.len(), 1);
        assert_eq!(envelope.cc.len(), 1);
        assert_eq!(envelope.bcc.len(), 1);
    }

    #[test]
    fn envelope_rejects_invalid_recipient() {
        let message = Message::new(Mailbox::new("from@example.com"), "s", "b")
            .to(Mailbox::new("not-an-address"));

        assert!(matches!(
            build_envelope(&message),
            Err(SendError::InvalidAddress(_))
        ));
    }

    #[test]
    fn display_names_do_not_reach_the_envelope() {
        let message = Message::new(Mailbox::with_name("Sender", "from@example.com"), "s", "b")
            .to(Mailbox::with_name("Alice", "alice@example.com"));

        let envelope = build_envelope(&message).unwrap();
        assert_eq!(envelope.to[0].as_str(), "alice@example.com");
    }

    #[test]
    fn attachment_failure_precedes_connection() {
        // render() runs before connect(); a bad path must produce
        // AttachmentUnreadable without touching the network.
        let message = Message::new(Mailbox::new("from@example.com"), "s", "b")
            .to(Mailbox::new("to@example.com"))
            .attach("/definitely/not/here.bin");

        let err = tokio_test::block_on(send(
            &SmtpServer::new("smtp.invalid", 587, "u", "p"),
            &message,
        ))
        .unwrap_err();
        assert!(matches!(err, SendError::AttachmentUnreadable { .. }));
    }
}
