pub mod ai;
pub mod command;
pub mod dispatcher;

pub use self::ai::OllamaProcessor;
pub use self::command::ShellCommandExecutor;
pub use self::dispatcher::{Dispatcher, Outcome};
