use crate::core::prompt::SYSTEM_PROMPT;
use crate::core::{
    AIProcessor, Action, AgentError, AgentEvent, AgentResponse, AgentResult, CommandExecutor,
    TerminalInterface,
};
use tracing::debug;

/// How a single utterance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ShellSucceeded,
    ShellFailed,
    Spoke,
    Unrecognized,
    Errored,
}

/// Turns one utterance into a model call and acts on the reply.
///
/// Nothing is remembered between calls to [`Dispatcher::dispatch`].
pub struct Dispatcher<P, E> {
    processor: P,
    executor: E,
}

impl<P: AIProcessor, E: CommandExecutor> Dispatcher<P, E> {
    pub fn new(processor: P, executor: E) -> Self {
        Self { processor, executor }
    }

    #[cfg(test)]
    pub(crate) fn processor(&self) -> &P {
        &self.processor
    }

    #[cfg(test)]
    pub(crate) fn executor(&self) -> &E {
        &self.executor
    }

    /// Never fails: every problem is shown to the user and folded into
    /// [`Outcome::Errored`].
    pub async fn dispatch<T>(&self, utterance: &str, ui: &mut T) -> Outcome
    where
        T: TerminalInterface + ?Sized,
    {
        ui.display(&AgentEvent::Thinking);
        match self.respond(utterance, ui).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "turn failed");
                ui.display(&AgentEvent::Error(e.to_string()));
                Outcome::Errored
            }
        }
    }

    async fn respond<T>(&self, utterance: &str, ui: &mut T) -> AgentResult<Outcome>
    where
        T: TerminalInterface + ?Sized,
    {
        let raw = self.processor.process(SYSTEM_PROMPT, utterance).await?;
        let response = AgentResponse::parse(&raw)?;
        let action = response.action();
        debug!(?action, "model replied");

        ui.display(&AgentEvent::Thought(response.thought()));

        match action {
            Action::Shell => {
                let command = response.text()?;
                ui.display(&AgentEvent::RunningCommand(command.to_string()));
                match self.executor.execute(command).await {
                    Ok(stdout) => {
                        ui.display(&AgentEvent::CommandOutput(stdout.trim().to_string()));
                        Ok(Outcome::ShellSucceeded)
                    }
                    Err(AgentError::CommandFailed { stderr, .. }) => {
                        ui.display(&AgentEvent::CommandError(stderr.trim().to_string()));
                        Ok(Outcome::ShellFailed)
                    }
                    Err(e) => Err(e),
                }
            }
            Action::Speak => {
                ui.display(&AgentEvent::Speak(response.text()?.to_string()));
                Ok(Outcome::Spoke)
            }
            Action::Unrecognized => {
                ui.display(&AgentEvent::Unrecognized);
                Ok(Outcome::Unrecognized)
            }
        }
    }
}
