//! Failure taxonomy shared by every decoder.

use thiserror::Error;

/// Why a parse rejected its input.
///
/// Every decoder in this crate is a pure function returning `Result`; on
/// failure no output is produced, not even partially computed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A byte fell outside the allowed character set, or outside the range
    /// permitted at its exact position in the grammar.
    #[error("byte outside the allowed character set or positional range")]
    Grammar,
    /// The total input length does not match any recognized form.
    #[error("input length does not match any recognized form")]
    Length,
    /// A field matched its digit pattern but its numeric value violates a
    /// semantic bound (e.g. minute >= 60).
    #[error("field value outside its permitted range")]
    Range,
    /// The magnitude does not fit the target integer type.
    #[error("magnitude exceeds the representable range")]
    Overflow,
}

/// Diagnostic error produced by the generic [`parse`](crate::parse()) entry
/// point and the `FromStr` implementations.
///
/// Carries the expected type's name and a truncated view of the rejected
/// input, suitable for log lines and error chains.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}; got {snippet:?} (len = {len}): {kind}")]
pub struct ParseFailure {
    /// Human-readable name of the value type that was expected.
    pub expected: &'static str,
    /// The underlying rejection.
    pub kind: ParseError,
    /// At most the first 32 bytes of the input, lossily decoded.
    pub snippet: String,
    /// Full length of the rejected input in bytes.
    pub len: usize,
}

impl ParseFailure {
    pub(crate) fn new(expected: &'static str, kind: ParseError, input: &[u8]) -> Self {
        let head = &input[..input.len().min(32)];
        Self {
            expected,
            kind,
            snippet: String::from_utf8_lossy(head).into_owned(),
            len: input.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_truncates_long_input() {
        let input = vec![b'x'; 100];
        let failure = ParseFailure::new("decimal integer", ParseError::Grammar, &input);
        assert_eq!(failure.snippet.len(), 32);
        assert_eq!(failure.len, 100);
    }

    #[test]
    fn failure_message_names_type() {
        let failure = ParseFailure::new("UUID", ParseError::Length, b"abc");
        let text = failure.to_string();
        assert!(text.contains("UUID"));
        assert!(text.contains("abc"));
        assert!(text.contains("len = 3"));
    }
}
