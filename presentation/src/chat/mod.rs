//! Interactive chat module
//!
//! Line-based chat over stdin. Every prompt starts a new query session and
//! supersedes the one still in flight.

mod command;
mod repl;

pub use command::{parse_command, ChatCommand};
pub use repl::ChatRepl;
