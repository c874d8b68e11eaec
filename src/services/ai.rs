use crate::core::lib::{AIProcessor, AgentError, AgentResult};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug)]
pub struct OllamaProcessor {
    client: Client,
    model: String,
    api_url: String,
}

impl OllamaProcessor {
    pub fn new(model: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            api_url: api_url.into(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new("qwen2:1.5b", "http://localhost:11434/api/chat")
    }

    fn chat_request(&self, system: &str, utterance: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": utterance }
            ],
            "format": "json",
            "stream": false
        })
    }

    /// Pulls `message.content` out of a chat reply, translating Ollama's
    /// `{"error": ...}` bodies along the way.
    fn reply_content(&self, body: &str) -> AgentResult<String> {
        let reply: Value = serde_json::from_str(body)
            .map_err(|e| AgentError::ModelRequest(format!("Unreadable reply from Ollama: {}", e)))?;

        if let Some(error) = reply.get("error") {
            let error_msg = error.as_str().unwrap_or("Unknown error");
            if error_msg.contains("model") {
                return Err(AgentError::ModelRequest(
                    format!("Model '{}' not found. To install the model:\n", self.model)
                        + "1. Ensure Ollama is running\n"
                        + format!("2. Run 'ollama pull {}' to download the model", self.model).as_str(),
                ));
            }
            return Err(AgentError::ModelRequest(format!("Ollama error: {}", error_msg)));
        }

        reply
            .pointer("/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AgentError::ModelRequest("Ollama reply has no message content".to_string()))
    }
}

#[async_trait::async_trait]
impl AIProcessor for OllamaProcessor {
    async fn process<'a>(&'a self, system: &'a str, utterance: &'a str) -> AgentResult<String> {
        debug!(model = %self.model, url = %self.api_url, "sending chat request");

        let response = self
            .client
            .post(&self.api_url)
            .json(&self.chat_request(system, utterance))
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "chat request failed");
                if e.is_connect() {
                    AgentError::ModelUnavailable(
                        "Ollama service is not running. To install and start Ollama:\n".to_string()
                            + "1. Visit https://ollama.ai to download and install Ollama\n"
                            + "2. Start the Ollama service\n"
                            + format!("3. Run 'ollama pull {}' to download the model", self.model).as_str(),
                    )
                } else {
                    AgentError::ModelRequest(format!("Failed to reach Ollama: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AgentError::ModelRequest(format!("Failed to read Ollama reply: {}", e)))?;
        debug!(%status, bytes = text.len(), "chat reply received");

        // Error bodies come with 4xx/5xx, so let the body speak first.
        match self.reply_content(&text) {
            Ok(content) if status.is_success() => Ok(content),
            Ok(_) => Err(AgentError::ModelRequest(format!("Ollama returned HTTP {}", status))),
            Err(e) => Err(e),
        }
    }
}
