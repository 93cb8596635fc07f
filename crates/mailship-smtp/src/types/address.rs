//! Email address and envelope types.

use crate::error::{Error, Result};

/// Email address for the SMTP envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates a new address from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        Self::validate(&addr)?;
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates an email address (basic validation).
    fn validate(addr: &str) -> Result<()> {
        if addr.is_empty() {
            return Err(Error::InvalidAddress("address cannot be empty".into()));
        }

        let Some((local, domain)) = addr.split_once('@') else {
            return Err(Error::InvalidAddress("address must contain @".into()));
        };

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(Error::InvalidAddress(format!(
                "malformed address: {addr}"
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SMTP envelope: the sender and recipient lists for one transaction.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Sender address (MAIL FROM).
    pub from: Address,
    /// Primary recipients.
    pub to: Vec<Address>,
    /// Carbon-copy recipients.
    pub cc: Vec<Address>,
    /// Blind carbon-copy recipients.
    pub bcc: Vec<Address>,
}

impl Envelope {
    /// Creates an envelope with a sender and no recipients.
    #[must_use]
    pub const fn new(from: Address) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
        }
    }

    /// Selects the single RCPT TO recipient: the first of to, then cc,
    /// then bcc. `None` when all three lists are empty, in which case
    /// the session sends an empty angle-bracket pair.
    ///
    /// Only one RCPT command is ever issued per session, whatever the
    /// list lengths.
    #[must_use]
    pub fn recipient(&self) -> Option<&Address> {
        self.to
            .first()
            .or_else(|| self.cc.first())
            .or_else(|| self.bcc.first())
    }
}
