use crate::core::prompt::is_farewell;
use crate::core::{AIProcessor, AgentEvent, AgentResult, CommandExecutor, TerminalInterface};
use crate::services::{Dispatcher, Outcome};
use tracing::debug;

pub const USER_PROMPT: &str = "👤 You: ";

/// Reads utterances until the user says goodbye, dispatching each one in turn.
///
/// Closed or interrupted input counts as an empty line. Returns how many
/// utterances were dispatched.
pub async fn run<T, P, E>(terminal: &mut T, dispatcher: &Dispatcher<P, E>) -> AgentResult<usize>
where
    T: TerminalInterface + ?Sized,
    P: AIProcessor,
    E: CommandExecutor,
{
    terminal.display(&AgentEvent::Online);

    let mut turns = 0;
    loop {
        let line = terminal.read_line(USER_PROMPT)?.unwrap_or_default();
        if is_farewell(&line) {
            terminal.display(&AgentEvent::Farewell);
            return Ok(turns);
        }

        terminal.add_history(&line);
        let outcome: Outcome = dispatcher.dispatch(&line, terminal).await;
        turns += 1;
        debug!(turn = turns, ?outcome, "utterance handled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AgentError;
    use crate::services::dispatcher::tests::{FakeTerminal, RecordingExecutor, ScriptedProcessor};

    const SPEAK: &str = r#"{"thought": "Chat.", "action": "speak", "command_or_speak_text": "Hi!"}"#;

    #[tokio::test]
    async fn test_exit_keywords_end_without_dispatching() {
        for word in ["exit", "QUIT", "Goodbye", ""] {
            let dispatcher = Dispatcher::new(ScriptedProcessor::new(vec![]), RecordingExecutor::unused());
            let mut terminal = FakeTerminal::with_lines(&[word]);

            let turns = run(&mut terminal, &dispatcher).await.unwrap();

            assert_eq!(turns, 0);
            assert_eq!(dispatcher.processor().calls(), 0);
            assert_eq!(terminal.events, vec![AgentEvent::Online, AgentEvent::Farewell]);
            assert!(terminal.history.is_empty());
        }
    }

    #[tokio::test]
    async fn test_closed_input_says_goodbye() {
        let dispatcher = Dispatcher::new(ScriptedProcessor::new(vec![]), RecordingExecutor::unused());
        let mut terminal = FakeTerminal::default();
        terminal.lines.push_back(None);

        assert_eq!(run(&mut terminal, &dispatcher).await.unwrap(), 0);
        assert_eq!(terminal.events.last(), Some(&AgentEvent::Farewell));
    }

    #[tokio::test]
    async fn test_each_utterance_dispatches_once_then_reprompts() {
        let dispatcher = Dispatcher::new(
            ScriptedProcessor::new(vec![Ok(SPEAK.to_string()), Ok(SPEAK.to_string())]),
            RecordingExecutor::unused(),
        );
        let mut terminal = FakeTerminal::with_lines(&["hello", " exit", "quit"]);

        let turns = run(&mut terminal, &dispatcher).await.unwrap();

        assert_eq!(turns, 2);
        assert_eq!(terminal.prompts, 3);
        assert_eq!(dispatcher.processor().calls(), 2);
        assert_eq!(terminal.history, vec!["hello", " exit"]);
        assert_eq!(
            terminal
                .events
                .iter()
                .filter(|e| matches!(e, AgentEvent::Speak(_)))
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_session() {
        let dispatcher = Dispatcher::new(
            ScriptedProcessor::new(vec![
                Ok("not json at all".to_string()),
                Ok(r#"{"thought": "??"}"#.to_string()),
                Ok(r#"{"action": "shell", "command_or_speak_text": "false"}"#.to_string()),
                Err(AgentError::ModelUnavailable("down".to_string())),
                Ok(SPEAK.to_string()),
            ]),
            RecordingExecutor::new(|_| {
                Err(AgentError::CommandFailed {
                    code: Some(1),
                    stderr: " boom \n".to_string(),
                })
            }),
        );
        let mut terminal = FakeTerminal::with_lines(&["a", "b", "c", "d", "e", "exit"]);

        let turns = run(&mut terminal, &dispatcher).await.unwrap();

        assert_eq!(turns, 5);
        assert!(terminal.events.contains(&AgentEvent::Unrecognized));
        assert!(terminal.events.contains(&AgentEvent::CommandError("boom".to_string())));
        assert!(terminal.events.contains(&AgentEvent::Error("down".to_string())));
        assert_eq!(terminal.events.last(), Some(&AgentEvent::Farewell));
        assert_eq!(dispatcher.executor().commands.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_input_failure_propagates() {
        let dispatcher = Dispatcher::new(ScriptedProcessor::new(vec![]), RecordingExecutor::unused());
        let mut terminal = FakeTerminal::default();

        assert!(matches!(
            run(&mut terminal, &dispatcher).await,
            Err(AgentError::InputError(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_shell_round() {
        use crate::services::ShellCommandExecutor;

        let dispatcher = Dispatcher::new(
            ScriptedProcessor::new(vec![
                Ok(r#"{"action": "shell", "command_or_speak_text": "printf '  up 2 days  \\n'"}"#.to_string()),
                Ok(r#"{"action": "shell", "command_or_speak_text": "echo ' denied ' >&2; exit 1"}"#.to_string()),
            ]),
            ShellCommandExecutor::new(),
        );
        let mut terminal = FakeTerminal::with_lines(&["uptime?", "secret?", "exit"]);

        assert_eq!(run(&mut terminal, &dispatcher).await.unwrap(), 2);

        assert!(terminal.events.contains(&AgentEvent::CommandOutput("up 2 days".to_string())));
        assert!(terminal.events.contains(&AgentEvent::CommandError("denied".to_string())));
    }
}
