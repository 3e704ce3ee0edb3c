//! Command dispatch table.
//!
//! Maps a command name to a handler that receives the remaining
//! arguments. The empty name registers a default command, selected
//! whenever the first argument names no other command.
//!
//! # Examples
//!
//! ```
//! use argbind_core::Commands;
//!
//! let commands = Commands::new()
//!     .command("ping", |args| {
//!         assert_eq!(args, ["-v"]);
//!         Ok(())
//!     })
//!     .default_command(|args| {
//!         assert_eq!(args, ["pong"]);
//!         Ok(())
//!     });
//!
//! commands.handle_commands_from_args(["ping", "-v"]).unwrap();
//! commands.handle_commands_from_args(["pong"]).unwrap();
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{CommandError, HandlerError};

/// Name under which the default command is registered.
pub const DEFAULT_COMMAND: &str = "";

/// Outcome of a command handler.
pub type HandlerResult = Result<(), HandlerError>;

type Handler = Box<dyn Fn(&[String]) -> HandlerResult + Send + Sync>;

/// Command name to handler table.
#[derive(Default)]
pub struct Commands {
    handlers: HashMap<String, Handler>,
}

impl Commands {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
        self
    }

    /// Registers the default command.
    pub fn default_command<F>(self, handler: F) -> Self
    where
        F: Fn(&[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.command(DEFAULT_COMMAND, handler)
    }

    /// Returns `true` if a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatches the process arguments (without the program name).
    ///
    /// # Errors
    ///
    /// See [`handle_commands_from_args`](Self::handle_commands_from_args).
    pub fn handle_commands(&self) -> Result<(), CommandError> {
        self.handle_commands_from_args(std::env::args().skip(1))
    }

    /// Selects a handler by the first argument and runs it on the rest.
    ///
    /// # Errors
    ///
    /// [`CommandError::MissingCommand`] when `args` is empty and there is
    /// no default command, [`CommandError::UnknownCommand`] when the first
    /// argument matches nothing, and [`CommandError::Handler`] wrapping the
    /// handler's own error.
    pub fn handle_commands_from_args<I>(&self, args: I) -> Result<(), CommandError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let (name, rest) = match args.split_first() {
            Some((first, rest)) if self.contains(first) => (first.as_str(), rest),
            _ if self.contains(DEFAULT_COMMAND) => (DEFAULT_COMMAND, args.as_slice()),
            Some((first, _)) => return Err(CommandError::UnknownCommand(first.clone())),
            None => return Err(CommandError::MissingCommand),
        };

        let Some(handler) = self.handlers.get(name) else {
            return Err(CommandError::UnknownCommand(name.to_string()));
        };
        debug!(command = name, args = rest.len(), "Dispatching command");
        handler(rest).map_err(|source| CommandError::Handler {
            name: name.to_string(),
            source,
        })
    }
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Commands").field("names", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recording(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Handler {
        let log = Arc::clone(log);
        Box::new(move |args: &[String]| {
            log.lock().unwrap().push(format!("{tag}:{}", args.join(" ")));
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_by_first_argument() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let commands = Commands::new()
            .command("add", recording(&log, "add"))
            .command("hello", recording(&log, "hello"));

        commands.handle_commands_from_args(["add", "--", "-1", "2"]).unwrap();
        commands.handle_commands_from_args(["hello"]).unwrap();
        assert_eq!(*log.lock().unwrap(), ["add:-- -1 2", "hello:"]);
    }

    #[test]
    fn test_default_command_receives_all_arguments() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let commands = Commands::new()
            .command("add", recording(&log, "add"))
            .default_command(recording(&log, "default"));

        commands.handle_commands_from_args(["--lang=fr", "mon ami"]).unwrap();
        commands.handle_commands_from_args(Vec::<String>::new()).unwrap();
        commands.handle_commands_from_args(["add", "1"]).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            ["default:--lang=fr mon ami", "default:", "add:1"]
        );
    }

    #[test]
    fn test_missing_and_unknown_commands() {
        let commands = Commands::new().command("add", |_| Ok(()));

        let err = commands.handle_commands_from_args(Vec::<String>::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing command");

        let err = commands.handle_commands_from_args(["foo", "bar"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown command: foo");
    }

    #[test]
    fn test_handler_error_is_wrapped_with_command_name() {
        let commands = Commands::new().command("fail", |_| Err("boom".into()));

        let err = commands.handle_commands_from_args(["fail"]).unwrap_err();
        assert_eq!(err.to_string(), "command 'fail': boom");
        assert!(matches!(err, CommandError::Handler { ref name, .. } if name == "fail"));
    }
}
