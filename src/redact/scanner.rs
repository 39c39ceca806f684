//! Content-stream line scanning
//!
//! Identifies the lines of a decompressed PDF body that render text with a
//! single-string text-show operator: a line that, apart from surrounding
//! whitespace, wraps its payload between `(` and `) Tj`.
//!
//! This is a deliberate limitation, not a bug: split strings, array-form
//! shows (`[...] TJ`), and payloads spanning multiple physical lines are
//! never candidates. Such lines are silently ineligible for redaction no
//! matter how similar their text is to a watermark.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Matches a complete line showing a single parenthesized string:
/// optional leading whitespace, `(payload)`, the `Tj` operator, optional
/// trailing whitespace. Group 2 is the payload.
static TEXT_SHOW_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*\()(.*)(\)[ \t]*Tj[ \t]*)$").unwrap());

/// A line eligible for redaction, addressed by byte spans into the body.
///
/// The spans carry enough position information for exact in-place
/// replacement: substituting an equal-length payload leaves the leading
/// whitespace, the parentheses, the operator token, and every neighboring
/// line untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine {
    /// Byte range of the whole line within the body (newline excluded)
    pub line: Range<usize>,
    /// Byte range of the payload, strictly between `(` and `)`
    pub payload: Range<usize>,
}

impl CandidateLine {
    /// The payload text of this line within `body`.
    ///
    /// `body` must be the same string the line was scanned from.
    pub fn payload_text<'a>(&self, body: &'a str) -> &'a str {
        &body[self.payload.clone()]
    }

    /// The full line text within `body`.
    pub fn line_text<'a>(&self, body: &'a str) -> &'a str {
        &body[self.line.clone()]
    }
}

/// Scan `body` for candidate text-show lines, in document order.
///
/// The scan is restartable: it holds no state between calls and always
/// reflects the body it is given.
pub fn find_candidate_lines(body: &str) -> Vec<CandidateLine> {
    TEXT_SHOW_LINE
        .captures_iter(body)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            let payload = caps.get(2).unwrap();
            CandidateLine {
                line: whole.start()..whole.end(),
                payload: payload.start()..payload.end(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_simple_text_show_line() {
        let body = "BT\n(Hello World) Tj\nET\n";
        let lines = find_candidate_lines(body);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].payload_text(body), "Hello World");
        assert_eq!(lines[0].line_text(body), "(Hello World) Tj");
    }

    #[test]
    fn test_preserves_leading_and_trailing_whitespace_in_line_span() {
        let body = "BT\n   (Downloaded via University X) Tj  \nET\n";
        let lines = find_candidate_lines(body);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_text(body), "   (Downloaded via University X) Tj  ");
        assert_eq!(lines[0].payload_text(body), "Downloaded via University X");
    }

    #[test]
    fn test_payload_span_is_strictly_between_parens() {
        let body = "(abc) Tj\n";
        let lines = find_candidate_lines(body);
        assert_eq!(lines.len(), 1);
        // Slicing the body at the span reproduces the payload exactly
        assert_eq!(&body[lines[0].payload.clone()], "abc");
        assert_eq!(body.as_bytes()[lines[0].payload.start - 1], b'(');
        assert_eq!(body.as_bytes()[lines[0].payload.end], b')');
    }

    #[test]
    fn test_document_order() {
        let body = "(first) Tj\nq 1 0 0 1 0 0 cm\n(second) Tj\n";
        let lines = find_candidate_lines(body);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].payload_text(body), "first");
        assert_eq!(lines[1].payload_text(body), "second");
    }

    #[test]
    fn test_ignores_tj_array_form() {
        // Array shows use the TJ operator and are never candidates, even
        // though the watermark text is right there
        let body = "[(Downloaded via )(University X)] TJ\n";
        assert!(find_candidate_lines(body).is_empty());
    }

    #[test]
    fn test_ignores_line_without_operator() {
        let body = "(just a string)\n";
        assert!(find_candidate_lines(body).is_empty());
    }

    #[test]
    fn test_ignores_operator_without_string() {
        let body = "/F1 12 Tf\n72 712 Td\nET\n";
        assert!(find_candidate_lines(body).is_empty());
    }

    #[test]
    fn test_ignores_multiline_payload() {
        // The string is opened on one line and closed on the next; neither
        // physical line matches the pattern on its own
        let body = "(split across\nlines) Tj\n";
        assert!(find_candidate_lines(body).is_empty());
    }

    #[test]
    fn test_inner_parens_extend_payload_to_last_close() {
        // Greedy payload: everything up to the last `)` before Tj
        let body = "((nested) text) Tj\n";
        let lines = find_candidate_lines(body);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].payload_text(body), "(nested) text");
    }

    #[test]
    fn test_no_candidates_in_empty_body() {
        assert!(find_candidate_lines("").is_empty());
    }

    #[test]
    fn test_restartable() {
        let body = "(once) Tj\n";
        assert_eq!(find_candidate_lines(body), find_candidate_lines(body));
    }
}
