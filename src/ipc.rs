//! IPC Server Interface & Request Adapter
//!
//! IPC clients talk to the window manager through X properties on
//! dedicated windows; the server behind `IpcServer` owns the transport.
//! The dispatcher's contribution is the adapter: turn one request (a
//! sequence of strings) into a command invocation with captured output.

use x11rb::protocol::xproto::Window;

use crate::commands::{CommandInput, CommandRunner, OutputChannels};

/// Result of one IPC command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallResult {
    pub exit_code: i32,
    pub output: String,
    pub error: String,
}

/// The X-property IPC server.
pub trait IpcServer {
    /// Whether `window` declares itself an IPC endpoint.
    fn is_connectable(&self, window: Window) -> bool;

    /// Register a new IPC connection window.
    fn add_connection(&mut self, window: Window);

    /// Service pending requests of the connection, resolving each call
    /// through `dispatch`.
    fn handle_connection(
        &mut self,
        window: Window,
        dispatch: &mut dyn FnMut(&[String]) -> CallResult,
    );
}

/// Run one IPC call through the command interpreter.
///
/// The head of `call` is the command name, the rest its arguments; an
/// empty call is passed through as an empty command name so the
/// interpreter can report it. Output and error text are captured
/// verbatim.
pub fn call_command(runner: &mut dyn CommandRunner, call: &[String]) -> CallResult {
    let (command, args) = match call.split_first() {
        Some((head, tail)) => (head.clone(), tail.to_vec()),
        None => (String::new(), Vec::new()),
    };
    let input = CommandInput::new(command.clone(), args);
    let mut channels = OutputChannels::new(command);
    let exit_code = runner.call(&input, &mut channels);
    CallResult {
        exit_code,
        output: channels.output,
        error: channels.error,
    }
}
