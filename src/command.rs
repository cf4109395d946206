//! Command table and dispatch boundary.
//!
//! A submitted line is split on whitespace into a command name and its
//! arguments, then routed through a [`CommandSet`]. Everything that can go
//! wrong past that point is contained here: an unknown name or a handler
//! failure comes back as a [`DispatchError`] for the shell to render, and
//! never tears down the session.

use std::collections::HashMap;

use thiserror::Error;

/// What a handler asks the shell to do after it returns successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading lines.
    Continue,
    /// Shut the session down cleanly.
    Exit,
}

/// Failure reported by a command handler.
///
/// Handlers return this instead of panicking; the shell renders it and the
/// session continues.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CommandError(pub String);

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Result returned by command handlers.
pub type CommandResult = std::result::Result<Outcome, CommandError>;

/// A registered command handler.
///
/// Receives the whitespace-split arguments, without the command name itself.
/// Boxed so handlers can capture state; plain functions coerce as well.
pub type Command = Box<dyn FnMut(&[&str]) -> CommandResult>;

/// Errors surfaced at the dispatch boundary.
///
/// These are reported to the user and are never fatal to the session.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The first token of the line names no registered command.
    #[error("{0}: command not found")]
    UnknownCommand(String),
    /// The handler ran and reported a failure.
    #[error("{name}: {source}")]
    Failed {
        name: String,
        source: CommandError,
    },
}

/// Name → handler table.
///
/// # Examples
///
/// ```
/// use lineshell::{CommandSet, Outcome};
///
/// let mut commands = CommandSet::new();
/// commands.register("echo", |args: &[&str]| {
///     println!("{}", args.join(" "));
///     Ok(Outcome::Continue)
/// });
///
/// assert_eq!(commands.dispatch("echo hello world").unwrap(), Outcome::Continue);
/// ```
#[derive(Default)]
pub struct CommandSet {
    table: HashMap<String, Command>,
}

impl CommandSet {
    /// Creates an empty command table.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Registers `handler` under `name`, replacing any previous handler of
    /// the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[&str]) -> CommandResult + 'static,
    {
        self.table.insert(name.into(), Box::new(handler));
    }

    /// Returns `true` if a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Splits `line` on whitespace and invokes the named handler.
    ///
    /// The first token is the command name, the remaining tokens its
    /// arguments; a line with no tokens dispatches nothing. Handler failures
    /// come back as [`DispatchError::Failed`] — they are never allowed to
    /// propagate any further.
    pub fn dispatch(&mut self, line: &str) -> std::result::Result<Outcome, DispatchError> {
        let mut tokens = line.split_whitespace();
        let name = match tokens.next() {
            Some(name) => name,
            None => return Ok(Outcome::Continue),
        };
        let args: Vec<&str> = tokens.collect();

        match self.table.get_mut(name) {
            None => Err(DispatchError::UnknownCommand(name.to_string())),
            Some(handler) => handler(&args).map_err(|source| DispatchError::Failed {
                name: name.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_splits_name_and_args() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut commands = CommandSet::new();
        commands.register("ls", move |args: &[&str]| {
            sink.borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect::<Vec<_>>());
            Ok(Outcome::Continue)
        });

        let outcome = commands.dispatch("ls -la /tmp").unwrap();

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(
            *seen.borrow(),
            [vec!["-la".to_string(), "/tmp".to_string()]]
        );
    }

    #[test]
    fn test_dispatch_unknown_command() {
        let mut commands = CommandSet::new();

        let err = commands.dispatch("missing arg").unwrap_err();

        assert_eq!(err.to_string(), "missing: command not found");
    }

    #[test]
    fn test_dispatch_blank_line_is_inert() {
        let mut commands = CommandSet::new();

        assert_eq!(commands.dispatch("   ").unwrap(), Outcome::Continue);
        assert_eq!(commands.dispatch("").unwrap(), Outcome::Continue);
    }

    #[test]
    fn test_dispatch_reports_handler_failure() {
        let mut commands = CommandSet::new();
        commands.register("boom", |_: &[&str]| Err(CommandError::from("went sideways")));

        let err = commands.dispatch("boom now").unwrap_err();

        assert_eq!(err.to_string(), "boom: went sideways");
    }

    #[test]
    fn test_register_replaces_existing_handler() {
        let mut commands = CommandSet::new();
        commands.register("go", |_: &[&str]| Ok(Outcome::Continue));
        commands.register("go", |_: &[&str]| Ok(Outcome::Exit));

        assert!(commands.contains("go"));
        assert_eq!(commands.dispatch("go").unwrap(), Outcome::Exit);
    }
}
