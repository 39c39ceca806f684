//! Chat-completions client
//!
//! Thin blocking client for an OpenAI-style chat-completions endpoint with
//! function tools. Only the fields the tool loop needs are modeled.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";

/// Blocking chat-completions client.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Build a client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| Error::MissingApiKey)?;

        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            http,
            api_key,
            model: MODEL.to_string(),
        })
    }

    /// Send one completion request and return the assistant's message.
    ///
    /// `messages` is the conversation so far (without the system message,
    /// which is prepended here on every request, as the conversation grows
    /// across tool turns).
    pub fn chat(
        &self,
        system: &str,
        messages: &[Value],
        tools: &[Value],
    ) -> Result<AssistantMessage> {
        let mut all_messages = vec![json!({"role": "system", "content": system})];
        all_messages.extend(messages.iter().cloned());

        let mut request = json!({
            "model": self.model,
            "messages": all_messages,
        });
        if !tools.is_empty() {
            request["tools"] = Value::Array(tools.to_vec());
        }

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Api(format!("{}: {}", status, body)));
        }

        let completion: ChatCompletion = response.json()?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| Error::Api("response contained no choices".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

/// The assistant's reply. Serializes back into the wire format so it can be
/// appended to the conversation for the next turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// One requested tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, exactly as the API delivers them
    pub arguments: String,
}

/// Declare a function tool in the wire format the chat API expects.
pub fn function_schema(
    name: &str,
    description: &str,
    properties: Value,
    required: &[&str],
) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": name,
            "description": description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_schema_shape() {
        let schema = function_schema(
            "record_watermark",
            "Record one watermark.",
            json!({"watermark_text": {"type": "string"}}),
            &["watermark_text"],
        );

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "record_watermark");
        assert_eq!(
            schema["function"]["parameters"]["properties"]["watermark_text"]["type"],
            "string"
        );
        assert_eq!(schema["function"]["parameters"]["required"][0], "watermark_text");
    }

    #[test]
    fn test_assistant_message_deserializes_tool_calls() {
        let raw = r#"{
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "finished", "arguments": "{}"}
            }]
        }"#;

        let message: AssistantMessage = serde_json::from_str(raw).unwrap();
        assert!(message.content.is_none());
        let calls = message.tool_calls.unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "finished");
    }

    #[test]
    fn test_assistant_message_round_trips_to_wire_format() {
        let message = AssistantMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                kind: "function".to_string(),
                function: FunctionCall {
                    name: "record_watermark".to_string(),
                    arguments: r#"{"watermark_text":"x"}"#.to_string(),
                },
            }]),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["tool_calls"][0]["type"], "function");
        // null content is omitted, not sent
        assert!(value.get("content").is_none());
    }
}
