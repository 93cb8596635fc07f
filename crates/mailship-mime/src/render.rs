//! Wire-format message rendering.
//!
//! Assembles a multipart/mixed payload (quoted-printable text part,
//! base64 attachment parts), dot-stuffs the serialized stream, and
//! appends the end-of-data sentinel. The output is the exact byte
//! sequence the session streams during the DATA phase.

use crate::encoding::{encode_base64_wrapped, encode_quoted_printable};
use crate::error::{Error, Result};
use crate::mediatype;
use crate::message::{Mailbox, Message};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Soft limit for folded header lines (RFC 5322 recommends 78).
const FOLD_LENGTH: usize = 76;

/// One attachment, loaded and classified.
struct AttachmentPart {
    filename: String,
    media_type: &'static str,
    content: Vec<u8>,
}

/// Renders a message into transport-ready bytes.
///
/// The result is dot-stuffed and terminated with the `CRLF . CRLF`
/// sentinel; the session must transmit it exactly once, unmodified.
///
/// # Errors
///
/// Fails only when an attachment cannot be read; no network or
/// protocol state is involved.
pub fn render(message: &Message) -> Result<Vec<u8>> {
    // Attachments are read up front so a failure surfaces before any
    // network interaction begins.
    let attachments = load_attachments(message)?;

    let boundary = generate_boundary();
    let mut out = String::new();

    write_headers(&mut out, message, &boundary);

    // Text part always comes first.
    out.push_str(&format!("--{boundary}\r\n"));
    out.push_str("Content-Type: text/plain; charset=utf-8\r\n");
    out.push_str("Content-Transfer-Encoding: quoted-printable\r\n");
    out.push_str("\r\n");
    out.push_str(&encode_quoted_printable(&message.body));
    out.push_str("\r\n");

    for part in &attachments {
        out.push_str(&format!("--{boundary}\r\n"));
        let _ = write!(
            out,
            "Content-Type: {}; name=\"{}\"\r\n",
            part.media_type, part.filename
        );
        out.push_str("Content-Transfer-Encoding: base64\r\n");
        let _ = write!(
            out,
            "Content-Disposition: attachment; filename=\"{}\"\r\n",
            part.filename
        );
        out.push_str("\r\n");
        // encode_base64_wrapped output is already CRLF-terminated
        out.push_str(&encode_base64_wrapped(&part.content));
    }

    out.push_str(&format!("--{boundary}--\r\n"));

    let mut bytes = stuff_dots(out.as_bytes());
    bytes.extend_from_slice(b"\r\n.\r\n");
    Ok(bytes)
}

/// Escapes the transport's end-of-data sentinel out of the payload:
/// every line-leading `.` gets one extra `.` inserted.
///
/// The escape is structural, applied to the full serialized stream
/// regardless of multipart boundaries or encoded content, and it is
/// not idempotent: callers apply it exactly once per send. ([`render`]
/// already does.)
#[must_use]
pub fn stuff_dots(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 8);
    let mut at_line_start = true;

    for &byte in data {
        if byte == b'.' && at_line_start {
            out.push(b'.');
        }
        out.push(byte);
        at_line_start = byte == b'\n';
    }

    out
}

fn write_headers(out: &mut String, message: &Message, boundary: &str) {
    let _ = write!(out, "From: {}\r\n", message.from.header_value());
    write_address_list(out, "To", &message.to);
    write_address_list(out, "Cc", &message.cc);
    write_address_list(out, "Bcc", &message.bcc);
    let _ = write!(out, "Subject: {}\r\n", message.subject);
    let _ = write!(out, "Date: {}\r\n", chrono::Utc::now().to_rfc2822());
    out.push_str("MIME-Version: 1.0\r\n");
    let _ = write!(out, "Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n");
    out.push_str("\r\n");
}

/// Writes a recipient header, folding the address list at commas when
/// a line would exceed the soft limit. Empty lists emit no header.
fn write_address_list(out: &mut String, name: &str, mailboxes: &[Mailbox]) {
    if mailboxes.is_empty() {
        return;
    }

    let _ = write!(out, "{name}: ");
    let mut line_length = name.len() + 2;

    for (i, mailbox) in mailboxes.iter().enumerate() {
        let value = mailbox.header_value();
        if i > 0 {
            if line_length + value.len() + 2 > FOLD_LENGTH {
                out.push_str(",\r\n ");
                line_length = 1;
            } else {
                out.push_str(", ");
                line_length += 2;
            }
        }
        out.push_str(&value);
        line_length += value.len();
    }

    out.push_str("\r\n");
}

fn load_attachments(message: &Message) -> Result<Vec<AttachmentPart>> {
    message
        .attachments
        .iter()
        .map(|path| {
            let content = fs::read(path).map_err(|source| Error::Attachment {
                path: path.clone(),
                source,
            })?;
            Ok(AttachmentPart {
                filename: display_filename(path),
                media_type: media_type_for(path),
                content,
            })
        })
        .collect()
}

/// Final path segment, used as the attachment's display name.
fn display_filename(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

fn media_type_for(path: &Path) -> &'static str {
    path.extension()
        .map_or(mediatype::DEFAULT_MEDIA_TYPE, |ext| {
            mediatype::from_extension(&ext.to_string_lossy())
        })
}

/// Generates a multipart boundary unlikely to collide with content.
///
/// The `=_` prefix cannot appear in quoted-printable output, and the
/// counter keeps boundaries distinct within one process.
fn generate_boundary() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    format!("=_mailship_{:08x}_{nanos:08x}_{count:04x}", std::process::id())
}
