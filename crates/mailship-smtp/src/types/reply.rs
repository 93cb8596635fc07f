//! SMTP reply types.

/// One parsed reply line from the server.
///
/// Multi-line replies are aggregated by the session; each line parses
/// independently into one of these fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code as the digit string the server sent (e.g. `"250"`).
    /// `None` when the line had no leading digits.
    pub code: Option<String>,
    /// Reply text after the code and separator.
    pub text: String,
    /// True when the separator after the code was `-`, meaning more
    /// lines of the same reply follow.
    pub continues: bool,
}

impl Reply {
    /// Creates a new reply fragment.
    #[must_use]
    pub fn new(code: Option<String>, text: impl Into<String>, continues: bool) -> Self {
        Self {
            code,
            text: text.into(),
            continues,
        }
    }

    /// Returns true iff the fragment carries the given code.
    ///
    /// An empty expected code never matches: a code-less verification
    /// would silently skip the check, so it is unsatisfiable instead.
    #[must_use]
    pub fn has_code(&self, expected: &str) -> bool {
        !expected.is_empty() && self.code.as_deref() == Some(expected)
    }
}
