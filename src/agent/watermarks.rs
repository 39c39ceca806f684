//! Watermark proposal
//!
//! Asks the assistant to read the first page's text and call
//! `record_watermark` once per watermark it finds, then `finished`. The
//! collected candidates come back as a plain list; how they were produced
//! is invisible to the redaction engine.

use serde_json::{json, Value};

use crate::error::{Error, Result};

use super::client::{function_schema, ChatClient};
use super::driver::{run_tool_loop, ToolFlow, ToolSet};

const SYSTEM: &str = "You are an assistant that extracts watermarks from text.";

const INSTRUCTIONS: &str = "\
Extract the watermark from the PDFCONTENT.

Examples of watermarks are:
 - Downloaded via Institution on March .....
 - See ..... for options on how to share published articles.

Bad examples are:
 - International Conference on Acoustics, Speech and Signal
 - DOI: 10.1109/ICASSP48485.2023.13446412

Just call the `record_watermark` tool on each watermark in PDFCONTENT, don't talk.
Call the `finished` tool when you're done.
If you can't find any watermarks in PDFCONTENT, call `finished` immediately.";

struct WatermarkTools {
    found: Vec<String>,
}

impl ToolSet for WatermarkTools {
    fn schemas(&self) -> Vec<Value> {
        vec![
            function_schema(
                "record_watermark",
                "Record one watermark string found in the text.",
                json!({"watermark_text": {"type": "string"}}),
                &["watermark_text"],
            ),
            function_schema(
                "finished",
                "Signal that every watermark has been recorded.",
                json!({}),
                &[],
            ),
        ]
    }

    fn call(&mut self, name: &str, arguments: &Value) -> Result<ToolFlow> {
        match name {
            "record_watermark" => {
                let text = arguments
                    .get("watermark_text")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        Error::Api("record_watermark: missing watermark_text".to_string())
                    })?;
                self.found.push(text.to_string());
                Ok(ToolFlow::Continue(format!("Recorded watermark: {}", text)))
            }
            "finished" => Ok(ToolFlow::Finish),
            other => Err(Error::Api(format!("unknown tool: {}", other))),
        }
    }
}

/// Propose watermark candidates for a PDF from its first-page text.
///
/// May legitimately return an empty list when the page carries no
/// watermark; the caller decides what that means.
pub fn propose_watermarks(client: &ChatClient, first_page_text: &str) -> Result<Vec<String>> {
    let mut tools = WatermarkTools { found: Vec::new() };

    let messages = vec![
        json!({
            "role": "user",
            "content": format!("<PDFCONTENT>{}</PDFCONTENT>", first_page_text),
        }),
        json!({"role": "user", "content": INSTRUCTIONS}),
    ];

    run_tool_loop(client, SYSTEM, messages, &mut tools)?;

    Ok(tools.found)
}
