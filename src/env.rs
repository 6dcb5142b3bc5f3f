use std::env as stdenv;
use std::path::PathBuf;

/// Mutable, user-level view of the process state used by the interpreter.
///
/// The only state the shell carries across loop iterations is the working
/// directory, and even that is really owned by the OS process; this cache
/// exists so `pwd` and relative `cd` targets don't have to re-query it.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    ///
    /// Initializes `current_dir` from `std::env::current_dir()`, falling back
    /// to `.` when the cwd is unreadable.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { current_dir }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
