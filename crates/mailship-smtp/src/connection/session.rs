//! Table-driven SMTP submission session.
//!
//! The fixed command sequence lives in one ordered step table; a
//! single loop drives it, so the control flow never changes when a
//! step does. Any mismatch between a server reply and the step's
//! expected code aborts the remaining steps; the connection is still
//! released.

use super::{Channel, TlsOptions};
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::parse_line;
use crate::types::Envelope;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Credentials for AUTH LOGIN.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account username (sent base64-encoded after AUTH LOGIN).
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// What a step does before (optionally) awaiting a reply.
#[derive(Debug)]
enum Action {
    /// Await the server greeting without sending anything.
    Greet,
    /// Send one protocol command line.
    Command(Command),
    /// Replace the plaintext channel with its encrypted upgrade.
    /// Irreversible; no reply is read for this step.
    UpgradeTls,
    /// Stream the rendered message bytes as one opaque unit.
    Payload,
}

/// One entry of the session script: an action and, when a reply is
/// read afterwards, the code it must carry.
#[derive(Debug)]
struct Step {
    action: Action,
    expect: Option<&'static str>,
}

impl Step {
    const fn new(action: Action, expect: &'static str) -> Self {
        Self {
            action,
            expect: Some(expect),
        }
    }
}

/// One SMTP submission session over a [`Channel`].
///
/// A session is single-use: construct it, call [`Session::send`] once,
/// and discard it. There is no reuse after completion, success or
/// failure.
#[derive(Debug)]
pub struct Session<C: Channel> {
    /// Current channel variant. `None` only transiently during the
    /// STARTTLS swap and after the session is finished.
    channel: Option<C>,
    server_hostname: String,
    client_hostname: String,
    credentials: Credentials,
    tls: TlsOptions,
}

impl<C: Channel> Session<C> {
    /// Creates a session over a freshly connected plaintext channel.
    pub fn new(channel: C, server_hostname: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            channel: Some(channel),
            server_hostname: server_hostname.into(),
            client_hostname: "localhost".to_string(),
            credentials,
            tls: TlsOptions::default(),
        }
    }

    /// Sets the TLS policy used for the STARTTLS upgrade.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the hostname announced in EHLO (default `localhost`).
    #[must_use]
    pub fn with_client_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.client_hostname = hostname.into();
        self
    }

    /// Runs the full submission sequence: greeting, EHLO, STARTTLS
    /// upgrade, EHLO, AUTH LOGIN, MAIL FROM, RCPT TO, DATA, payload,
    /// QUIT.
    ///
    /// The payload must already be dot-stuffed and carry its
    /// end-of-data sentinel; it is written as a single opaque unit.
    /// The channel is shut down on every exit path, after the TLS
    /// session when one was opened.
    ///
    /// # Errors
    ///
    /// Returns the first transport, TLS, or unexpected-reply error;
    /// nothing is retried and no further commands are sent after a
    /// failure.
    pub async fn send(mut self, envelope: &Envelope, payload: &[u8]) -> Result<()> {
        let outcome = self.run(envelope, payload).await;
        if let Some(mut channel) = self.channel.take() {
            // Best-effort close; the first error is the one reported.
            let _ = channel.shutdown().await;
        }
        outcome
    }

    async fn run(&mut self, envelope: &Envelope, payload: &[u8]) -> Result<()> {
        for step in self.script(envelope) {
            match step.action {
                Action::Greet => {}
                Action::Command(command) => {
                    tracing::debug!(command = command.name(), "send");
                    self.channel_mut()?.write_all(&command.serialize()).await?;
                }
                Action::UpgradeTls => {
                    let plain = self
                        .channel
                        .take()
                        .ok_or_else(|| Error::Protocol("channel already closed".into()))?;
                    let encrypted = plain.upgrade(&self.server_hostname, &self.tls).await?;
                    tracing::debug!(host = %self.server_hostname, "channel upgraded to TLS");
                    self.channel = Some(encrypted);
                }
                Action::Payload => {
                    tracing::debug!(bytes = payload.len(), "send message payload");
                    self.channel_mut()?.write_all(payload).await?;
                }
            }

            if let Some(expect) = step.expect {
                expect_reply(self.channel_mut()?, expect).await?;
            }
        }

        Ok(())
    }

    /// The ordered step table: every protocol exchange of the session,
    /// in the only order the server accepts them.
    fn script(&self, envelope: &Envelope) -> Vec<Step> {
        let ehlo = || Command::Ehlo {
            hostname: self.client_hostname.clone(),
        };

        vec![
            Step::new(Action::Greet, "220"),
            Step::new(Action::Command(ehlo()), "250"),
            Step::new(Action::Command(Command::StartTls), "220"),
            Step {
                action: Action::UpgradeTls,
                expect: None,
            },
            Step::new(Action::Command(ehlo()), "250"),
            Step::new(Action::Command(Command::AuthLogin), "334"),
            Step::new(
                Action::Command(Command::AuthData {
                    encoded: STANDARD.encode(self.credentials.username.as_bytes()),
                }),
                "334",
            ),
            Step::new(
                Action::Command(Command::AuthData {
                    encoded: STANDARD.encode(self.credentials.password.as_bytes()),
                }),
                "235",
            ),
            Step::new(
                Action::Command(Command::MailFrom {
                    from: envelope.from.clone(),
                }),
                "250",
            ),
            Step::new(
                Action::Command(Command::RcptTo {
                    to: envelope.recipient().cloned(),
                }),
                "250",
            ),
            Step::new(Action::Command(Command::Data), "354"),
            Step::new(Action::Payload, "250"),
            Step::new(Action::Command(Command::Quit), "221"),
        ]
    }

    fn channel_mut(&mut self) -> Result<&mut C> {
        self.channel
            .as_mut()
            .ok_or_else(|| Error::Protocol("channel already closed".into()))
    }
}

/// Reads one aggregated reply and matches its final code.
///
/// Lines are read and parsed until a non-continuing fragment arrives;
/// only the final fragment's code decides the match. On success the
/// accumulated text of every fragment is returned in order. An empty
/// expected code is never satisfiable, so a step can never silently
/// skip verification.
///
/// # Errors
///
/// Returns a transport error if a read fails, or an unexpected-reply
/// error carrying the expected code, the actual code (if any was
/// parsable), and the joined reply text.
pub async fn expect_reply<C: Channel>(channel: &mut C, expected: &str) -> Result<Vec<String>> {
    let mut texts = Vec::new();
    let last = loop {
        let line = channel.read_line().await?;
        let fragment = parse_line(&line);
        texts.push(fragment.text.clone());
        if !fragment.continues {
            break fragment;
        }
    };

    tracing::trace!(code = ?last.code, lines = texts.len(), "reply");

    if last.has_code(expected) {
        Ok(texts)
    } else {
        Err(Error::unexpected_reply(expected, last.code, texts.join("\n")))
    }
}
