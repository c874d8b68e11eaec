use serde::Deserialize;
use serde_json::Value;

use crate::core::lib::{AgentError, AgentResult};
use crate::core::prompt::FALLBACK_THOUGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shell,
    Speak,
    /// Missing, misspelled, or not a string at all.
    Unrecognized,
}

/// The JSON envelope the model is asked to reply with.
///
/// Fields stay loosely typed so that a missing or odd `action` can still be
/// reported as unrecognized instead of failing the whole parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    thought: Option<Value>,
    #[serde(default)]
    action: Option<Value>,
    #[serde(default)]
    command_or_speak_text: Option<Value>,
}

impl AgentResponse {
    /// Parses model output. Anything other than a JSON object is an error.
    pub fn parse(raw: &str) -> AgentResult<Self> {
        // derived struct impls also accept positional arrays
        let value: Value = serde_json::from_str(raw)?;
        if value.is_object() {
            return Ok(serde_json::from_value(value)?);
        }
        let kind = match value {
            Value::Object(_) => "an object",
            Value::Array(_) => "an array",
            Value::String(_) => "a string",
            Value::Number(_) => "a number",
            Value::Bool(_) => "a boolean",
            Value::Null => "null",
        };
        Err(AgentError::NotAnObject(kind))
    }

    pub fn thought(&self) -> String {
        match &self.thought {
            None | Some(Value::Null) => FALLBACK_THOUGHT.to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn action(&self) -> Action {
        match self.action.as_ref().and_then(Value::as_str) {
            Some("shell") => Action::Shell,
            Some("speak") => Action::Speak,
            _ => Action::Unrecognized,
        }
    }

    pub fn text(&self) -> AgentResult<&str> {
        self.command_or_speak_text
            .as_ref()
            .and_then(Value::as_str)
            .ok_or(AgentError::MissingField("command_or_speak_text"))
    }
}
