pub mod session;
pub mod terminal;

pub use self::terminal::AgentTerminal;
