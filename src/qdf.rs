//! qpdf round-trip
//!
//! A compressed PDF is not safely text-editable, so the redaction engine
//! never sees the raw container. Instead the file is round-tripped through
//! qpdf: decompressed into QDF form (object streams disabled, content
//! streams normalized one operator per line), edited as text, and
//! recompressed into a valid PDF. qpdf is free to renumber objects during
//! recompression; that is its concern, not ours.
//!
//! The QDF body is read and written as Latin-1: every byte maps to exactly
//! one `char`, so the body survives binary stream sections unchanged and
//! equal-length payload replacement preserves every byte offset.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Decompress `input` into editable QDF form at `qdf`.
///
/// Runs `qpdf --qdf --object-streams=disable`, which expands object streams
/// so no text-show operation stays hidden inside a compressed object
/// stream.
pub fn decompress(input: &Path, qdf: &Path) -> Result<()> {
    run_qpdf(&[
        "--qdf".as_ref(),
        "--object-streams=disable".as_ref(),
        input.as_os_str(),
        qdf.as_os_str(),
    ])
}

/// Recompress the (possibly modified) QDF file at `qdf` into `output`.
pub fn recompress(qdf: &Path, output: &Path) -> Result<()> {
    run_qpdf(&[
        "--object-streams=generate".as_ref(),
        qdf.as_os_str(),
        output.as_os_str(),
    ])
}

/// Read a QDF file as a Latin-1 text body (1 byte = 1 char).
pub fn read_body(qdf: &Path) -> Result<String> {
    let bytes = std::fs::read(qdf)?;
    Ok(latin1_decode(&bytes))
}

/// Write a Latin-1 text body back to the QDF file.
pub fn write_body(qdf: &Path, body: &str) -> Result<()> {
    std::fs::write(qdf, latin1_encode(body))?;
    Ok(())
}

/// Run qpdf with the given arguments, treating spawn failure and non-zero
/// exit alike as a fatal external-tool error.
fn run_qpdf(args: &[&std::ffi::OsStr]) -> Result<()> {
    let command = format!(
        "qpdf {}",
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let status = Command::new("qpdf")
        .args(args)
        .status()
        .map_err(|e| Error::ExternalTool {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::ExternalTool {
            command,
            reason: format!("exited with {}", status),
        });
    }

    Ok(())
}

/// Decode bytes as Latin-1: each byte becomes the char with the same code
/// point. Never fails.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode a Latin-1 string back to bytes.
///
/// The body only ever contains chars that came from `latin1_decode` or
/// ASCII spaces inserted by redaction, so every char fits in one byte.
pub fn latin1_encode(body: &str) -> Vec<u8> {
    body.chars()
        .map(|c| {
            debug_assert!((c as u32) < 256, "non-Latin-1 char in body");
            c as u8
        })
        .collect()
}
