use colored::*;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, EditMode, Editor};
use std::borrow::Cow;

use crate::core::{AgentError, AgentEvent, AgentResult, TerminalInterface};

/// Filename completion and history hints. Every line is accepted as typed.
pub struct AgentHelper {
    completer: FilenameCompleter,
    hinter: HistoryHinter,
}

impl AgentHelper {
    fn new() -> Self {
        Self {
            completer: FilenameCompleter::new(),
            hinter: HistoryHinter {},
        }
    }
}

impl rustyline::Helper for AgentHelper {}

impl Completer for AgentHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>)
        -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for AgentHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for AgentHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for AgentHelper {}

pub struct AgentTerminal {
    editor: Editor<AgentHelper, DefaultHistory>,
}

impl AgentTerminal {
    pub fn new() -> AgentResult<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config)
            .map_err(|e| AgentError::InputError(format!("Failed to initialise line editor: {}", e)))?;
        editor.set_helper(Some(AgentHelper::new()));
        Ok(Self { editor })
    }
}

impl TerminalInterface for AgentTerminal {
    fn read_line(&mut self, prompt: &str) -> AgentResult<Option<String>> {
        println!();
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(AgentError::InputError(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        // only fails on file-backed history
        let _ = self.editor.add_history_entry(line);
    }

    fn display(&mut self, event: &AgentEvent) {
        match event {
            AgentEvent::CommandError(_) | AgentEvent::Error(_) => eprintln!("{}", render(event)),
            _ => println!("{}", render(event)),
        }
    }
}

fn agent_says(text: &str) -> String {
    format!("\n🤖 Agent: {}", text)
}

/// Formats one event the way it appears on screen.
pub fn render(event: &AgentEvent) -> String {
    match event {
        AgentEvent::Online => agent_says(
            &"Agent is online. Type your commands below. Type 'exit' or 'quit' to end."
                .green()
                .bold()
                .to_string(),
        ),
        AgentEvent::Thinking => format!("\n{}", "🤔 Agent: Thinking...".yellow()),
        AgentEvent::Thought(thought) => format!("{} {}", "🧠 Agent's Thought:".blue(), thought),
        AgentEvent::RunningCommand(command) => format!(
            "{}\n   💻 `{}`",
            agent_says("Okay, I will run this command:"),
            command.yellow()
        ),
        AgentEvent::CommandOutput(output) => {
            agent_says(&format!("Here is the result:\n\n---\n{}\n---", output))
        }
        AgentEvent::CommandError(stderr) => {
            agent_says(&format!("An error occurred: {}", stderr).red().to_string())
        }
        AgentEvent::Speak(text) => agent_says(text),
        AgentEvent::Unrecognized => agent_says("I'm sorry, I wasn't sure how to respond to that."),
        AgentEvent::Error(details) => {
            agent_says(&format!("I encountered an error: {}", details).red().to_string())
        }
        AgentEvent::Farewell => agent_says(&"Goodbye!".green().to_string()),
    }
}
