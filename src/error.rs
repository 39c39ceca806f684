//! Error types for the pdf-dewatermark library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-dewatermark library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error talking to the chat API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No watermark matched any content-stream line; benign, no output written
    #[error("no watermark matched any content-stream line")]
    NothingToDo,

    /// External tool (qpdf) failed to spawn or exited non-zero
    #[error("external tool failed: {command}: {reason}")]
    ExternalTool { command: String, reason: String },

    /// OPENAI_API_KEY is not set
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// Chat API returned an error or an unusable response
    #[error("chat API error: {0}")]
    Api(String),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Output path already exists
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// General error
    #[error("{0}")]
    General(String),
}
