//! Redaction application
//!
//! Orchestrates the scanner and matcher: for each watermark candidate, scan
//! the current body, compare every candidate payload, and blank the matching
//! payloads with spaces of identical length. Everything outside the matched
//! payloads stays byte-for-byte identical, so line boundaries and the byte
//! offsets of untouched content never move.

use tracing::debug;

use super::matcher;
use super::scanner::find_candidate_lines;

pub use super::matcher::DEFAULT_THRESHOLD;

/// One applied redaction: which watermark matched which line, and what the
/// line became. Returned for logging and testing; never persisted.
#[derive(Debug, Clone)]
pub struct RedactionRecord {
    /// The watermark candidate that matched
    pub watermark: String,
    /// The full line as it was before blanking
    pub matched_line: String,
    /// The full line after its payload was blanked
    pub replacement_line: String,
}

/// Result of one redaction run over a document body.
#[derive(Debug, Clone)]
pub struct Redaction {
    /// The possibly-modified body
    pub body: String,
    /// True iff the body differs from the input
    pub changed: bool,
    /// One record per blanked line, in processing order
    pub records: Vec<RedactionRecord>,
}

/// Blank every text-show line whose payload matches one of `watermarks`.
///
/// Watermarks are processed strictly in input order; within one watermark,
/// candidate lines are visited in document order and every match in the
/// pass is redacted. Each pass re-scans the current body, so a line blanked
/// by an earlier watermark no longer matches later ones (its payload is all
/// spaces, far below threshold for any non-trivial watermark).
///
/// This is a pure function of its inputs: it cannot fail, holds no state
/// across invocations, and a body without candidate lines (or an empty
/// watermark list) comes back unchanged with zero records.
///
/// # Example
///
/// ```
/// use pdf_dewatermark::redact::{redact, DEFAULT_THRESHOLD};
///
/// let body = "BT\n(Downloaded via University X) Tj\nET\n";
/// let watermarks = vec!["Downloaded via University X".to_string()];
/// let result = redact(body, &watermarks, DEFAULT_THRESHOLD);
///
/// assert!(result.changed);
/// assert_eq!(result.body.len(), body.len());
/// ```
pub fn redact(body: &str, watermarks: &[String], threshold: u32) -> Redaction {
    let mut current = body.to_string();
    let mut records = Vec::new();

    for watermark in watermarks {
        let matched: Vec<_> = find_candidate_lines(&current)
            .into_iter()
            .filter(|line| matcher::matches(watermark, line.payload_text(&current), threshold))
            .collect();

        // Blank width is the payload's char count, not its UTF-8 byte
        // count: the body is Latin-1 decoded, one char per original byte.
        let mut replacements = Vec::with_capacity(matched.len());
        for line in &matched {
            let payload = line.payload_text(&current);
            let blank = " ".repeat(payload.chars().count());

            let matched_line = line.line_text(&current).to_string();
            let replacement_line = format!(
                "{}{}{}",
                &current[line.line.start..line.payload.start],
                blank,
                &current[line.payload.end..line.line.end],
            );
            debug!(%watermark, line = %matched_line, "blanked content-stream line");

            records.push(RedactionRecord {
                watermark: watermark.clone(),
                matched_line,
                replacement_line,
            });
            replacements.push((line.payload.clone(), blank));
        }

        // Apply right-to-left so byte offsets from this pass's scan stay
        // valid even where a blank is narrower than the payload it replaces.
        for (range, blank) in replacements.into_iter().rev() {
            current.replace_range(range, &blank);
        }
    }

    Redaction {
        changed: current != body,
        body: current,
        records,
    }
}
