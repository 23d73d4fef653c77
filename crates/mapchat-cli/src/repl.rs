//! Interactive chat loop: one input line → one handler run.

use mapchat_agent::{ObserveOutcome, SessionManager};
use mapchat_core::{MapchatError, MapchatResult};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const HELP: &str = "\
Type a question to ask it, or one of:
  /load <map id>               switch to another map (resets the chat)
  /ask [question]              ask (defaults to the suggested question)
  /follow <n>                  ask the n-th numbered suggestion from the replies
  /status                      tokens used and estimated cost
  /map                         show the map title and text
  /history                     show questions and replies so far
  /export replies|chat [path]  export the conversation
  /help                        this text
  /quit                        leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Replies,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(Option<String>),
    Load(String),
    Follow(usize),
    Status,
    Map,
    History,
    Export {
        kind: ExportKind,
        path: Option<PathBuf>,
    },
    Help,
    Quit,
    Invalid(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Ask(Some(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let cmd = match name {
        "ask" if arg.is_empty() => Command::Ask(None),
        "ask" => Command::Ask(Some(arg.to_string())),
        "load" if arg.is_empty() => Command::Invalid("usage: /load <map id>".to_string()),
        "load" => Command::Load(arg.to_string()),
        "follow" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Command::Follow(n),
            _ => Command::Invalid("usage: /follow <n>, counting from 1".to_string()),
        },
        "status" => Command::Status,
        "map" => Command::Map,
        "history" => Command::History,
        "export" => {
            let (kind, path) = match arg.split_once(char::is_whitespace) {
                Some((kind, path)) => (kind, Some(PathBuf::from(path.trim()))),
                None => (arg, None),
            };
            match kind {
                "replies" => Command::Export {
                    kind: ExportKind::Replies,
                    path,
                },
                "chat" => Command::Export {
                    kind: ExportKind::Chat,
                    path,
                },
                _ => Command::Invalid("usage: /export replies|chat [path]".to_string()),
            }
        }
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{other}', try /help")),
    };
    Some(cmd)
}

/// Drives a [`SessionManager`] from parsed commands, writing to `out`.
pub struct Repl {
    manager: SessionManager,
    usd_per_1k: f64,
}

impl Repl {
    pub fn new(manager: SessionManager, usd_per_1k: f64) -> Self {
        Self {
            manager,
            usd_per_1k,
        }
    }

    #[cfg(test)]
    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Loads `map_id` and reports the outcome.
    pub async fn load(&mut self, map_id: &str, out: &mut dyn Write) -> MapchatResult<()> {
        match self.manager.observe(map_id).await {
            ObserveOutcome::Unchanged => writeln!(out, "Map {map_id} is already loaded.")?,
            ObserveOutcome::NoDocument => writeln!(out, "No map selected.")?,
            ObserveOutcome::Loaded { map_id, title } => {
                let title = title.as_deref().unwrap_or("(untitled)");
                writeln!(out, "Loaded map {map_id}: {title}")?;
                writeln!(out, "Try: {}", self.manager.suggested_question())?;
            }
            ObserveOutcome::FetchFailed(e) => writeln!(out, "warning: {e}")?,
        }
        Ok(())
    }

    /// Runs one command. Returns `false` when the loop should stop.
    ///
    /// Recoverable failures, including a failed export write, are printed;
    /// only I/O errors on `out` escape.
    pub async fn handle(&mut self, cmd: Command, out: &mut dyn Write) -> MapchatResult<bool> {
        match cmd {
            Command::Ask(question) => {
                let question = question.unwrap_or_else(|| self.manager.suggested_question().to_string());
                self.ask(&question, out).await?;
            }
            Command::Load(map_id) => self.load(&map_id, out).await?,
            Command::Follow(n) => {
                let picked = self
                    .manager
                    .session()
                    .zip(n.checked_sub(1))
                    .and_then(|(s, i)| s.follow_ups().get(i).map(|q| q.to_string()));
                match picked {
                    Some(question) => self.ask(&question, out).await?,
                    None => writeln!(out, "No follow-up question #{n}.")?,
                }
            }
            Command::Status => self.status(out)?,
            Command::Map => match self.manager.session() {
                Some(session) => {
                    if let Some(title) = session.title() {
                        writeln!(out, "### {title}")?;
                    }
                    writeln!(out, "{}", session.map_text)?;
                }
                None => writeln!(out, "No map loaded.")?,
            },
            Command::History => match self.manager.session() {
                Some(session) if !session.exchanges().is_empty() => {
                    for (i, ex) in session.exchanges().iter().enumerate() {
                        writeln!(out, "[{}] Q: {}", i + 1, ex.query)?;
                        writeln!(out, "{}\n", ex.reply)?;
                    }
                }
                _ => writeln!(out, "Nothing asked yet.")?,
            },
            Command::Export { kind, path } => self.export(kind, path, out).await?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Invalid(msg) => writeln!(out, "{msg}")?,
        }
        Ok(true)
    }

    async fn ask(&mut self, question: &str, out: &mut dyn Write) -> MapchatResult<()> {
        eprintln!("Thinking... this can take a while...");
        match self.manager.ask(question).await {
            Ok(outcome) => {
                writeln!(out, "{}", outcome.reply)?;
                writeln!(
                    out,
                    "[tokens: {} this turn, {} total]",
                    outcome.usage.last_turn_tokens, outcome.usage.total_tokens
                )?;
            }
            Err(e @ (MapchatError::Completion(_) | MapchatError::Session(_))) => {
                writeln!(out, "error: {e}")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn status(&self, out: &mut dyn Write) -> MapchatResult<()> {
        match self.manager.session() {
            Some(session) => {
                let usage = session.usage();
                writeln!(
                    out,
                    "Map: {} ({})",
                    session.map_id,
                    session.title().unwrap_or("untitled")
                )?;
                writeln!(out, "Last turn tokens: {}", usage.last_turn_tokens)?;
                writeln!(out, "Total Tokens Used: {}", usage.total_tokens)?;
                writeln!(out, "Total Cost: ${:.4}", usage.estimated_cost(self.usd_per_1k))?;
            }
            None => writeln!(out, "No map loaded.")?,
        }
        Ok(())
    }

    async fn export(
        &self,
        kind: ExportKind,
        path: Option<PathBuf>,
        out: &mut dyn Write,
    ) -> MapchatResult<()> {
        let Some(session) = self.manager.session() else {
            writeln!(out, "No map loaded.")?;
            return Ok(());
        };
        let text = match kind {
            ExportKind::Replies => session.export_replies(),
            ExportKind::Chat => session.export_chat(),
        };
        match path {
            Some(path) => match tokio::fs::write(&path, &text).await {
                Ok(()) => writeln!(out, "Wrote {} bytes to {}", text.len(), path.display())?,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Export failed");
                    writeln!(out, "error: cannot write {}: {e}", path.display())?;
                }
            },
            None => writeln!(out, "{text}")?,
        }
        Ok(())
    }

    /// Reads commands from stdin until EOF or `/quit`.
    pub async fn run(&mut self) -> MapchatResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = std::io::stdout();
        writeln!(stdout, "Type /help for commands.")?;

        loop {
            write!(stdout, "> ")?;
            stdout.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let Some(cmd) = parse_command(&line) else {
                continue;
            };
            if !self.handle(cmd, &mut stdout).await? {
                break;
            }
        }
        Ok(())
    }
}
