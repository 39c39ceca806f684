//! Watermark removal pipeline
//!
//! Ties the round-trip and the redaction engine together: decompress the
//! input into a temporary QDF file, blank every matching watermark line,
//! and recompress into the output. When nothing matched, no output file is
//! written and the caller gets `Error::NothingToDo`, a benign outcome
//! rather than a failure.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};
use crate::qdf;
use crate::redact::{redact, RedactionRecord};

/// Remove watermark lines from `input`, writing the cleaned PDF to
/// `output`.
///
/// Returns one record per blanked line. Returns `Error::NothingToDo` when
/// no watermark matched any content-stream line (including the trivial case
/// of an empty watermark list); in that case `output` is not created.
///
/// # Example
///
/// ```no_run
/// use pdf_dewatermark::clean::clean_pdf;
/// use pdf_dewatermark::redact::DEFAULT_THRESHOLD;
/// use std::path::Path;
///
/// let watermarks = vec!["Downloaded via University X on March 3, 2021".to_string()];
/// clean_pdf(
///     Path::new("paper.pdf"),
///     Path::new("paper-clean.pdf"),
///     &watermarks,
///     DEFAULT_THRESHOLD,
/// ).expect("Failed to clean PDF");
/// ```
pub fn clean_pdf(
    input: &Path,
    output: &Path,
    watermarks: &[String],
    threshold: u32,
) -> Result<Vec<RedactionRecord>> {
    // Keep the handle alive for the whole pipeline; the file is removed on
    // drop.
    let qdf_file = NamedTempFile::new()?;
    let qdf_path = qdf_file.path();

    qdf::decompress(input, qdf_path)?;
    let body = qdf::read_body(qdf_path)?;

    let result = redact(&body, watermarks, threshold);
    if !result.changed {
        return Err(Error::NothingToDo);
    }

    for record in &result.records {
        info!(
            watermark = %record.watermark,
            matched = %record.matched_line.trim_start(),
            "redacted watermark line"
        );
    }

    qdf::write_body(qdf_path, &result.body)?;
    qdf::recompress(qdf_path, output)?;

    Ok(result.records)
}
