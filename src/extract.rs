//! First-page text extraction
//!
//! The watermark proposal step works from the rendered text of the first
//! page, where publisher watermarks live in practice.

use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};

/// Extract the rendered text of the first page of a PDF.
///
/// A document with no pages yields an empty string rather than an error;
/// whether empty text is acceptable is the caller's decision.
pub fn extract_first_page_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;

    if doc.get_pages().is_empty() {
        return Ok(String::new());
    }

    let text = doc.extract_text(&[1])?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonexistent_file() {
        let result = extract_first_page_text(Path::new("nonexistent.pdf"));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }
}
