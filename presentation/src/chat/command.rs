//! Slash commands understood by the chat REPL

use querydash_domain::{Model, ResponseMode};

/// A parsed `/command` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Quit,
    Cancel,
    Status,
    Models,
    /// `/model` alone shows the current model
    Model(Option<Model>),
    /// `/mode` alone shows the current mode
    Mode(Option<ResponseMode>),
}

/// Parse a line starting with `/`. `Err` carries the message to show.
pub fn parse_command(line: &str) -> Result<ChatCommand, String> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();

    let command = match name {
        "/quit" | "/exit" | "/q" => ChatCommand::Quit,
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/cancel" | "/c" => ChatCommand::Cancel,
        "/status" => ChatCommand::Status,
        "/models" => ChatCommand::Models,
        "/model" => ChatCommand::Model(parts.next().map(Model::from_name)),
        "/mode" => ChatCommand::Mode(
            parts
                .next()
                .map(str::parse::<ResponseMode>)
                .transpose()?,
        ),
        _ => {
            return Err(format!(
                "Unknown command: {}\nType /help for available commands",
                name
            ));
        }
    };

    if parts.next().is_some() {
        return Err(format!("Too many arguments for {}", name));
    }
    Ok(command)
}

pub(crate) const HELP: &str = "\
Commands:
  /help, /h, /?          - Show this help
  /cancel, /c            - Cancel the running query
  /status                - Show the current session
  /models                - List known models
  /model [NAME]          - Show or switch the model
  /mode [streaming|single-shot]
                         - Show or switch the response mode
  /quit, /exit, /q       - Exit chat

Anything else is sent as a query. A new query cancels the running one.";
