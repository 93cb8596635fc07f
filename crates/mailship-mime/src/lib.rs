//! # mailship-mime
//!
//! MIME message rendering for SMTP submission.
//!
//! ## Features
//!
//! - **Multipart assembly**: quoted-printable text part followed by
//!   base64 attachment parts under a multipart/mixed boundary
//! - **Header generation**: From/To/Cc/Bcc with folding, verbatim
//!   Subject, RFC 2822 Date
//! - **Media types**: file-extension lookup with an
//!   `application/octet-stream` default
//! - **Transport escaping**: dot-stuffing of line-leading `.` and the
//!   `CRLF . CRLF` end-of-data sentinel, so the output can be streamed
//!   through an SMTP DATA phase as-is
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailship_mime::{Mailbox, Message, render};
//!
//! let message = Message::new(
//!     Mailbox::with_name("Sender", "sender@example.com"),
//!     "Quarterly report",
//!     "Report attached.",
//! )
//! .to(Mailbox::new("recipient@example.com"))
//! .attach("report.pdf");
//!
//! let payload = render(&message)?;
//! // payload is dot-stuffed and sentinel-terminated; hand it to the
//! // session's DATA phase unchanged.
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod encoding;
mod error;
pub mod mediatype;
mod message;
mod render;

pub use error::{Error, Result};
pub use message::{Mailbox, Message};
pub use render::{render, stuff_dots};
