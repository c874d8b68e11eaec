use thiserror::Error;

/// Sends one system instruction plus one user utterance to a chat model and
/// returns the raw text of its reply.
#[async_trait::async_trait]
pub trait AIProcessor {
    async fn process<'a>(&'a self, system: &'a str, utterance: &'a str) -> AgentResult<String>;
}

/// Runs a command line through the platform shell.
///
/// `Ok` carries stdout of a zero exit. A non-zero exit is
/// [`AgentError::CommandFailed`].
#[async_trait::async_trait]
pub trait CommandExecutor {
    async fn execute<'a>(&'a self, command: &'a str) -> AgentResult<String>;
}

pub trait TerminalInterface {
    /// `Ok(None)` means the user closed or interrupted input.
    fn read_line(&mut self, prompt: &str) -> AgentResult<Option<String>>;
    fn add_history(&mut self, line: &str);
    fn display(&mut self, event: &AgentEvent);
}

/// Everything the agent tells the user during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    Online,
    Thinking,
    Thought(String),
    RunningCommand(String),
    CommandOutput(String),
    CommandError(String),
    Speak(String),
    Unrecognized,
    Error(String),
    Farewell,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    ModelUnavailable(String),
    #[error("Model request failed: {0}")]
    ModelRequest(String),
    #[error("Malformed agent response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Malformed agent response: expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("Agent response is missing a usable '{0}' field")]
    MissingField(&'static str),
    #[error("Failed to start shell: {0}")]
    CommandSpawn(#[from] std::io::Error),
    #[error("Command failed (exit code: {}): {stderr}", exit_label(.code))]
    CommandFailed { code: Option<i32>, stderr: String },
    #[error("Input error: {0}")]
    InputError(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}
