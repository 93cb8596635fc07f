//! SMTP reply line parser.

use crate::types::Reply;

/// Parses one raw reply line into a [`Reply`] fragment.
///
/// The code is the maximal leading run of ASCII digits. A `-`
/// immediately after the code marks a continuation line of a
/// multi-line reply; a space separator (consumed) or end of line marks
/// the final line:
///
/// - `250 OK` → code `250`, text `OK`, final
/// - `250-ENHANCEDSTATUSCODES` → code `250`, text
///   `ENHANCEDSTATUSCODES`, continues
///
/// Never fails: a line with no leading digits yields `code = None`
/// with the whole line as text.
#[must_use]
pub fn parse_line(line: &str) -> Reply {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return Reply::new(None, line, false);
    }

    let code = line[..digits].to_string();
    let rest = &line[digits..];

    match rest.as_bytes().first() {
        Some(b'-') => Reply::new(Some(code), &rest[1..], true),
        Some(b' ') => Reply::new(Some(code), &rest[1..], false),
        _ => Reply::new(Some(code), rest, false),
    }
}
