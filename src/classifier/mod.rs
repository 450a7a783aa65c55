//! Severity classification from an optional `[LEVEL]` message prefix.

use crate::domain::Severity;

/// Shortest raw string that can carry a level prefix (`[INFO]`).
const MIN_PREFIXED_LEN: usize = 6;

/// A closing bracket further out than `[WARNING]` cannot end a level prefix.
const MAX_PREFIX_SPAN: usize = 9;

/// Result of classifying a raw message. Borrows from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub severity: Severity,
    pub body: &'a str,
}

/// Classify `raw` by its optional `[LEVEL]` prefix.
///
/// A recognised prefix (one of the three severity names, case-insensitive)
/// yields that severity, with the prefix and any whitespace after it
/// stripped from the body. Everything else, including an unknown bracketed
/// token or a missing closing bracket, is `Info` with the body returned
/// untouched. Classifying an already-stripped body a second time therefore
/// yields `Info` with no further stripping.
///
/// Pure function: no I/O, no shared state.
pub fn classify(raw: &str) -> Classified<'_> {
    let bytes = raw.as_bytes();
    if bytes.len() >= MIN_PREFIXED_LEN && bytes[0] == b'[' {
        // Prefix characters are all ASCII, so byte positions are char
        // boundaries and slicing below cannot split a UTF-8 sequence.
        if let Some(end) = bytes
            .iter()
            .take(MAX_PREFIX_SPAN)
            .position(|&b| b == b']')
            && let Ok(severity) = raw[1..end].parse::<Severity>()
        {
            return Classified {
                severity,
                body: raw[end + 1..].trim_start(),
            };
        }
    }

    Classified {
        severity: Severity::Info,
        body: raw,
    }
}
