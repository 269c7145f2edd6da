//! Command Interpreter Interface
//!
//! The dispatcher never interprets commands itself; it hands a parsed
//! invocation plus a pair of output buffers to the embedding process'
//! interpreter. Used by the IPC request adapter, by rule re-application,
//! and by automatic monitor detection.

use tracing::{info, warn};

/// A parsed command invocation: name plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandInput {
    pub command: String,
    pub args: Vec<String>,
}

impl CommandInput {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

/// String-buffered stdout/stderr for one command invocation.
///
/// Collaborators append with `push_str` / `write!`; whoever created the
/// channels decides where the text ends up (IPC reply, log, discard).
#[derive(Debug, Default)]
pub struct OutputChannels {
    pub command: String,
    pub output: String,
    pub error: String,
}

impl OutputChannels {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            output: String::new(),
            error: String::new(),
        }
    }

    /// Forward buffered output to the log and drop it.
    ///
    /// Output lines go out at info level, error lines at warn level,
    /// tagged with the command that produced them.
    pub fn forward_to_log(self) {
        if !self.output.is_empty() {
            info!(command = %self.command, "{}", self.output.trim_end());
        }
        if !self.error.is_empty() {
            warn!(command = %self.command, "{}", self.error.trim_end());
        }
    }
}

/// The command interpreter.
pub trait CommandRunner {
    /// Run `input`, writing to `channels`, and return the exit code.
    fn call(&mut self, input: &CommandInput, channels: &mut OutputChannels) -> i32;
}
