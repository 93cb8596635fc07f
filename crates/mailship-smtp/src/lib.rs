//! # mailship-smtp
//!
//! SMTP submission client protocol core.
//!
//! ## Features
//!
//! - **Table-driven session**: the fixed submission sequence (greeting,
//!   EHLO, STARTTLS, EHLO, AUTH LOGIN, MAIL FROM, RCPT TO, DATA, QUIT)
//!   is an ordered step table driven by one loop
//! - **Opportunistic TLS**: plaintext channel upgraded in place via
//!   STARTTLS, irreversibly
//! - **Reply aggregation**: multi-line replies collected until the
//!   final fragment, which alone decides the status match
//! - **Strict sequencing**: any reply that does not carry the step's
//!   expected code aborts the session immediately
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailship_smtp::connection::{Session, Credentials, connect};
//! use mailship_smtp::{Address, Envelope};
//!
//! #[tokio::main]
//! async fn main() -> mailship_smtp::Result<()> {
//!     let stream = connect("smtp.example.com", 587).await?;
//!     let session = Session::new(
//!         stream,
//!         "smtp.example.com",
//!         Credentials::new("user@example.com", "password"),
//!     );
//!
//!     let mut envelope = Envelope::new(Address::new("sender@example.com")?);
//!     envelope.to.push(Address::new("recipient@example.com")?);
//!
//!     // Payload must be dot-stuffed and sentinel-terminated
//!     // (mailship-mime renders one from a Message).
//!     let payload = b"Subject: Test\r\n\r\nHello\r\n.\r\n";
//!     session.send(&envelope, payload).await
//! }
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builders
//! - [`connection`]: channel abstraction and session state machine
//! - [`parser`]: reply line parser
//! - [`types`]: addresses, envelopes, reply fragments

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use connection::{Channel, Credentials, Session, SmtpStream, TlsOptions, connect};
pub use error::{Error, Result};
pub use types::{Address, Envelope, Reply};

// Re-exported so downstream error types can name rustls errors
// without pinning their own copy of the dependency.
pub use rustls;
