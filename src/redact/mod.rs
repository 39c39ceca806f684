//! Watermark localization-and-redaction engine

pub mod apply;
pub mod matcher;
pub mod scanner;

// Re-export commonly used items
pub use apply::{redact, Redaction, RedactionRecord};
pub use matcher::{matches, similarity_ratio, DEFAULT_THRESHOLD};
pub use scanner::{find_candidate_lines, CandidateLine};
