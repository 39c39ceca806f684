//! Tool-calling loop driver
//!
//! Runs a conversation with the chat API as an explicit state machine:
//! await the assistant's reply, execute any requested tool calls, repeat
//! until something finishes the loop. A tool signals termination by
//! returning `ToolFlow::Finish`; a reply without tool calls also finishes.
//! No exceptions-as-control-flow, no global state: each tool feeds its
//! result back through the returned tag.

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::client::{ChatClient, ToolCall};

/// What a tool invocation tells the driver to do next.
pub enum ToolFlow {
    /// Feed this result back to the assistant and keep going
    Continue(String),
    /// Terminal transition: stop the loop immediately
    Finish,
}

/// A set of tools the assistant may call during one loop.
pub trait ToolSet {
    /// Tool declarations in chat-API wire format.
    fn schemas(&self) -> Vec<Value>;

    /// Invoke a tool by name. Unknown names are an API error.
    fn call(&mut self, name: &str, arguments: &Value) -> Result<ToolFlow>;
}

/// Outcome of one turn of the loop.
enum Turn {
    Continue,
    Finished,
}

/// Drive the tool loop to completion.
///
/// Results accumulate inside the `ToolSet`; inspect it after this returns.
pub fn run_tool_loop(
    client: &ChatClient,
    system: &str,
    mut messages: Vec<Value>,
    tools: &mut dyn ToolSet,
) -> Result<()> {
    loop {
        match step(client, system, &mut messages, tools)? {
            Turn::Continue => {}
            Turn::Finished => return Ok(()),
        }
    }
}

/// One turn: awaiting-response, then executing-tool for each requested
/// call, then either done or back around.
fn step(
    client: &ChatClient,
    system: &str,
    messages: &mut Vec<Value>,
    tools: &mut dyn ToolSet,
) -> Result<Turn> {
    let reply = client.chat(system, messages, &tools.schemas())?;

    if let Some(content) = reply.content.as_deref() {
        if !content.is_empty() {
            debug!(%content, "assistant said");
        }
    }

    let calls = reply.tool_calls.clone().unwrap_or_default();
    messages.push(serde_json::to_value(&reply)?);

    if calls.is_empty() {
        return Ok(Turn::Finished);
    }

    execute_calls(&calls, messages, tools)
}

/// Execute the requested tool calls in order, appending each result to the
/// conversation, until one of them finishes the loop.
fn execute_calls(
    calls: &[ToolCall],
    messages: &mut Vec<Value>,
    tools: &mut dyn ToolSet,
) -> Result<Turn> {
    for call in calls {
        let arguments: Value = serde_json::from_str(&call.function.arguments)
            .map_err(|e| Error::Api(format!("bad tool arguments for {}: {}", call.function.name, e)))?;

        info!(tool = %call.function.name, args = %arguments, "executing tool call");

        match tools.call(&call.function.name, &arguments)? {
            ToolFlow::Continue(result) => messages.push(json!({
                "role": "tool",
                "tool_call_id": call.id,
                "content": result,
            })),
            ToolFlow::Finish => return Ok(Turn::Finished),
        }
    }

    Ok(Turn::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::client::FunctionCall;

    struct Recorder {
        seen: Vec<String>,
        finish_on: &'static str,
    }

    impl ToolSet for Recorder {
        fn schemas(&self) -> Vec<Value> {
            Vec::new()
        }

        fn call(&mut self, name: &str, arguments: &Value) -> Result<ToolFlow> {
            match name {
                "record" => {
                    let text = arguments["text"].as_str().unwrap_or_default();
                    self.seen.push(text.to_string());
                    Ok(ToolFlow::Continue(format!("recorded {}", text)))
                }
                n if n == self.finish_on => Ok(ToolFlow::Finish),
                other => Err(Error::Api(format!("unknown tool: {}", other))),
            }
        }
    }

    fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[test]
    fn test_continue_appends_tool_result_message() {
        let mut tools = Recorder { seen: Vec::new(), finish_on: "finished" };
        let calls = vec![tool_call("call_1", "record", r#"{"text":"wm"}"#)];
        let mut messages = Vec::new();

        let turn = execute_calls(&calls, &mut messages, &mut tools).unwrap();
        assert!(matches!(turn, Turn::Continue));
        assert_eq!(tools.seen, vec!["wm".to_string()]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "tool");
        assert_eq!(messages[0]["tool_call_id"], "call_1");
    }

    #[test]
    fn test_finish_stops_mid_batch() {
        let mut tools = Recorder { seen: Vec::new(), finish_on: "finished" };
        let calls = vec![
            tool_call("call_1", "finished", "{}"),
            tool_call("call_2", "record", r#"{"text":"late"}"#),
        ];
        let mut messages = Vec::new();

        let turn = execute_calls(&calls, &mut messages, &mut tools).unwrap();
        assert!(matches!(turn, Turn::Finished));
        // The call after the finish transition never executes
        assert!(tools.seen.is_empty());
        assert!(messages.is_empty());
    }

    #[test]
    fn test_unknown_tool_is_api_error() {
        let mut tools = Recorder { seen: Vec::new(), finish_on: "finished" };
        let calls = vec![tool_call("call_1", "no_such_tool", "{}")];
        let mut messages = Vec::new();

        let result = execute_calls(&calls, &mut messages, &mut tools);
        assert!(matches!(result, Err(Error::Api(_))));
    }

    #[test]
    fn test_malformed_arguments_are_api_error() {
        let mut tools = Recorder { seen: Vec::new(), finish_on: "finished" };
        let calls = vec![tool_call("call_1", "record", "not json")];
        let mut messages = Vec::new();

        let result = execute_calls(&calls, &mut messages, &mut tools);
        assert!(matches!(result, Err(Error::Api(_))));
    }
}
