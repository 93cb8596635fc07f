//! Outgoing message model.

use std::path::PathBuf;

/// Mailbox: an email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address.
    pub email: String,
}

impl Mailbox {
    /// Creates a mailbox with just an address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Creates a mailbox with a display name and address.
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    /// Renders the mailbox as a header value: `Name <addr>` or the
    /// bare address.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.name.as_ref().map_or_else(
            || self.email.clone(),
            |name| format!("{name} <{}>", self.email),
        )
    }
}

/// An email message to render and send.
///
/// Immutable input to the renderer; attachments are referenced by
/// path and read at render time.
#[derive(Debug, Clone)]
pub struct Message {
    /// Sender mailbox.
    pub from: Mailbox,
    /// Primary recipients.
    pub to: Vec<Mailbox>,
    /// Carbon-copy recipients.
    pub cc: Vec<Mailbox>,
    /// Blind carbon-copy recipients.
    pub bcc: Vec<Mailbox>,
    /// Subject line, rendered verbatim.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// Attachment file paths.
    pub attachments: Vec<PathBuf>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(from: Mailbox, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    /// Adds a recipient.
    #[must_use]
    pub fn to(mut self, recipient: Mailbox) -> Self {
        self.to.push(recipient);
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, recipient: Mailbox) -> Self {
        self.cc.push(recipient);
        self
    }

    /// Adds a BCC recipient.
    #[must_use]
    pub fn bcc(mut self, recipient: Mailbox) -> Self {
        self.bcc.push(recipient);
        self
    }

    /// Adds an attachment by path.
    #[must_use]
    pub fn attach(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }
}
