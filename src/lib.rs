//! PDF Dewatermark Library
//!
//! Locates publisher watermark lines in a PDF's content streams and blanks
//! them out without disturbing the rest of the file. This library provides
//! functionality to:
//! - Fuzzy-match watermark candidates against content-stream text lines
//! - Scan decompressed content streams for `(...) Tj` text-show lines
//! - Blank matched payloads with equal-length space fill
//! - Round-trip a PDF through qpdf so its streams are text-editable
//! - Propose watermark candidates and paper filenames via an LLM tool loop
//!
//! # Example
//!
//! ```no_run
//! use pdf_dewatermark::clean::clean_pdf;
//! use pdf_dewatermark::redact::DEFAULT_THRESHOLD;
//! use std::path::Path;
//!
//! let watermarks = vec![
//!     "Downloaded via University X on March 3, 2021".to_string(),
//! ];
//!
//! clean_pdf(
//!     Path::new("paper.pdf"),
//!     Path::new("paper-clean.pdf"),
//!     &watermarks,
//!     DEFAULT_THRESHOLD,
//! ).expect("Failed to clean PDF");
//! ```
//!
//! # Known limitation
//!
//! Only the single-line, single-string text-show form `(payload) Tj` is
//! recognized. Watermarks rendered via images, vector paths, array shows
//! (`[...] TJ`), or strings split across lines are left untouched.

pub mod agent;
pub mod clean;
pub mod error;
pub mod extract;
pub mod qdf;
pub mod redact;

// Re-export commonly used items
pub use error::{Error, Result};
