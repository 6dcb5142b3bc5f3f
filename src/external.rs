use crate::command::{CommandFactory, ExecutableCommand, Status};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::Result;
use std::ffi::OsString;
use std::io::Write;
use std::process::Command;

/// Command that is not a builtin: launched as a child process.
///
/// The launcher is strictly synchronous: the child inherits the shell's
/// standard streams and the parent blocks in [`std::process::Child::wait`]
/// until the child terminates, so at most one external process is ever
/// outstanding. The child's exit status is reaped and discarded.
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Accepts any name. Register this factory last: whether the program
    /// actually exists is discovered at spawn time, and a failed spawn is
    /// reported without stopping the loop.
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(
            name.into(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Status> {
        let spawned = Command::new(&self.name)
            .args(&self.args)
            .current_dir(&env.current_dir)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                // Command not found or not executable: report and keep going.
                writeln!(stderr, "{}: {}", self.name.to_string_lossy(), e)?;
                return Ok(Status::Continue);
            }
        };

        // Blocks until the child exits or is killed by a signal; job-control
        // stops do not wake it.
        child.wait()?;
        Ok(Status::Continue)
    }
}
