use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// The binary signal every command hands back to the read loop.
///
/// `Continue` means the loop should print another prompt and keep reading;
/// `Exit` means the shell should terminate with a success status. This is the
/// only control-flow channel between a command and the loop: exit statuses of
/// external programs are reaped but not surfaced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Exit,
}

/// Object-safe trait for any command the shell can execute.
///
/// Implemented by built-ins via a blanket impl and by the external-command
/// launcher. `stdout` carries normal command output, `stderr` carries
/// diagnostics; both are injected so tests can capture them.
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Status>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. The
/// interpreter queries its factories in registration order; the external
/// launcher is registered last and accepts any name.
pub trait CommandFactory {
    /// The fixed command name this factory recognizes, or `None` for
    /// catch-all factories such as the external launcher.
    fn name(&self) -> Option<&'static str> {
        None
    }

    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
