//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{parse_command, ChatCommand, HELP};
use crate::config::OutputConfig;
use crate::ConsoleFormatter;
use querydash_application::{QueryController, SessionWatch};
use querydash_domain::{Model, SessionSnapshot};
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

type Finished = Pin<Box<dyn Future<Output = SessionSnapshot> + Send>>;

/// Interactive chat REPL
pub struct ChatRepl {
    controller: QueryController,
    output: OutputConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl around a controller whose observer prints
    /// streamed output.
    pub fn new(controller: QueryController, output: OutputConfig) -> Self {
        Self { controller, output }
    }

    pub fn controller(&self) -> &QueryController {
        &self.controller
    }

    /// Run the REPL on stdin until `/quit` or end of input, then stop the
    /// session still in flight.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let result = self.run_with(BufReader::new(tokio::io::stdin())).await;
        if let Some(snapshot) = self.controller.shutdown().await {
            debug!("Chat closed with session {} {}", snapshot.id, snapshot.status);
        }
        result
    }

    /// Run the REPL on any line source. At end of input the running
    /// session is allowed to finish.
    pub async fn run_with<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut pending: Option<Finished> = None;
        let mut input_open = true;

        self.print_welcome();
        prompt();

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c() => {
                    if self.controller.cancel() {
                        debug!("Query cancelled from keyboard");
                    } else {
                        println!("^C");
                        prompt();
                    }
                }
                snapshot = finished(&mut pending) => {
                    pending = None;
                    if self.output.is_json() {
                        println!("{}", ConsoleFormatter::format_json(&snapshot));
                    }
                    if !input_open {
                        break;
                    }
                    println!();
                    prompt();
                }
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        if pending.is_none() {
                            println!("Bye!");
                            break;
                        }
                        continue;
                    };
                    let line = line.trim();

                    if line.is_empty() {
                        if pending.is_none() {
                            prompt();
                        }
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        if pending.is_none() {
                            prompt();
                        }
                        continue;
                    }

                    if let Some(watch) = self.submit(line) {
                        pending = Some(Box::pin(watch.finished()));
                    } else if pending.is_none() {
                        prompt();
                    }
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             querydash - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_settings();
        println!();
        println!("Type /help for commands. A new query cancels the running one.");
        println!();
    }

    fn print_settings(&self) {
        let params = self.controller.params();
        println!("Provider: {}", self.controller.generator_name());
        println!("Model:    {}", params.model);
        println!("Mode:     {}", params.mode);
    }

    fn submit(&mut self, query: &str) -> Option<SessionWatch> {
        match self.controller.start(query) {
            Ok(watch) => Some(watch),
            Err(e) => {
                if let Some(message) = e.user_message() {
                    eprintln!("{}", ConsoleFormatter::format_error(&message));
                }
                None
            }
        }
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, line: &str) -> bool {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                return false;
            }
        };

        match command {
            ChatCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ChatCommand::Help => {
                println!();
                println!("{}", HELP);
                println!();
            }
            ChatCommand::Cancel => {
                if !self.controller.cancel() {
                    println!("Nothing to cancel");
                }
            }
            ChatCommand::Status => match self.controller.snapshot() {
                Some(snapshot) => {
                    println!(
                        "Session {}: {}",
                        snapshot.id,
                        ConsoleFormatter::status_line(&snapshot)
                    );
                }
                None => println!("No query yet"),
            },
            ChatCommand::Models => {
                let current = &self.controller.params().model;
                println!();
                println!("Known models:");
                for model in Model::known_models() {
                    let marker = if &model == current { "*" } else { " " };
                    println!("{} {}", marker, model);
                }
                if current.is_custom() {
                    println!("* {}", current);
                }
                println!();
            }
            ChatCommand::Model(None) => println!("Model: {}", self.controller.params().model),
            ChatCommand::Model(Some(model)) => {
                println!("Model set to {}", model);
                let params = self.controller.params().clone().with_model(model);
                self.controller.set_params(params);
            }
            ChatCommand::Mode(None) => println!("Mode: {}", self.controller.params().mode),
            ChatCommand::Mode(Some(mode)) => {
                println!("Mode set to {}", mode);
                let params = self.controller.params().clone().with_mode(mode);
                self.controller.set_params(params);
            }
        }
        false
    }
}

async fn finished(pending: &mut Option<Finished>) -> SessionSnapshot {
    match pending {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

fn prompt() {
    print!(">>> ");
    let _ = std::io::stdout().flush();
}
