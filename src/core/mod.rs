pub mod lib;
pub mod prompt;
pub mod response;

pub use self::lib::{
    AIProcessor, AgentError, AgentEvent, AgentResult, CommandExecutor, TerminalInterface,
};
pub use self::response::{Action, AgentResponse};
