//! Filename generation
//!
//! Builds a `"{year}-{authors} ({title})"` filename for a scientific paper
//! from its first-page text via a `set_filename` tool. The generated value
//! is held by the toolset and read out after the loop; `None` means the
//! assistant never produced one.

use serde_json::{json, Value};

use crate::error::{Error, Result};

use super::client::{function_schema, ChatClient};
use super::driver::{run_tool_loop, ToolFlow, ToolSet};

const SYSTEM: &str = "You construct filenames for scientific paper PDFs.";

const INSTRUCTIONS: &str = "\
Construct a filename for the scientific paper whose first page is given in FIRSTPAGE.

Call the `set_filename` tool with the publication year, the complete list of
author last names in paper order, and the full paper title.
Call the `finished` tool when you're done.";

struct FilenameTools {
    filename: Option<String>,
}

impl ToolSet for FilenameTools {
    fn schemas(&self) -> Vec<Value> {
        vec![
            function_schema(
                "set_filename",
                "Set the filename from the paper's year, authors, and title.",
                json!({
                    "year": {"type": "integer"},
                    "author_name_list": {"type": "array", "items": {"type": "string"}},
                    "title": {"type": "string"},
                }),
                &["year", "author_name_list", "title"],
            ),
            function_schema(
                "finished",
                "Signal that the filename has been set.",
                json!({}),
                &[],
            ),
        ]
    }

    fn call(&mut self, name: &str, arguments: &Value) -> Result<ToolFlow> {
        match name {
            "set_filename" => {
                let year = arguments
                    .get("year")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| Error::Api("set_filename: missing year".to_string()))?;
                let authors = author_list(arguments.get("author_name_list"))?;
                let title = arguments
                    .get("title")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::Api("set_filename: missing title".to_string()))?;

                let filename = format_filename(year, &authors, title);
                self.filename = Some(filename.clone());
                Ok(ToolFlow::Continue(format!("Filename set: {}", filename)))
            }
            "finished" => Ok(ToolFlow::Finish),
            other => Err(Error::Api(format!("unknown tool: {}", other))),
        }
    }
}

/// Accept either an array of strings or, as models sometimes send, a single
/// string standing in for a one-element list.
fn author_list(value: Option<&Value>) -> Result<Vec<String>> {
    match value {
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::Api("set_filename: author_name_list entries must be strings".to_string())
                })
            })
            .collect(),
        _ => Err(Error::Api(
            "set_filename: missing author_name_list".to_string(),
        )),
    }
}

/// Apply the filename formatting rules.
///
/// Author names lose dashes and apostrophes; more than three authors
/// collapse to `first-second-...-last`; `": "` in the title becomes
/// `" -- "` so the result stays a legal filename.
fn format_filename(year: i64, authors: &[String], title: &str) -> String {
    let cleaned: Vec<String> = authors
        .iter()
        .map(|name| name.replace('-', "").replace('\'', ""))
        .collect();

    let authors_str = if cleaned.len() > 3 {
        format!(
            "{}-{}-...-{}",
            cleaned[0],
            cleaned[1],
            cleaned[cleaned.len() - 1]
        )
    } else {
        cleaned.join("-")
    };

    let processed_title = title.replace(": ", " -- ");

    format!("{}-{} ({})", year, authors_str, processed_title)
}

/// Generate a filename for a paper from its first-page text.
///
/// Returns `Ok(None)` when the loop completed without the assistant ever
/// calling `set_filename`.
pub fn generate_filename(client: &ChatClient, first_page_text: &str) -> Result<Option<String>> {
    let mut tools = FilenameTools { filename: None };

    let messages = vec![json!({
        "role": "user",
        "content": format!(
            "<FIRSTPAGE>{}</FIRSTPAGE>\n\n{}",
            first_page_text, INSTRUCTIONS
        ),
    })];

    run_tool_loop(client, SYSTEM, messages, &mut tools)?;

    Ok(tools.filename)
}
