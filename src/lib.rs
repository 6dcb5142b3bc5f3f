//! A tiny interactive shell.
//!
//! This crate provides a minimal read-tokenize-dispatch-execute loop: lines
//! are split on whitespace (no quoting or escaping of any kind), the first
//! token selects either a builtin implemented in-process or an external
//! program launched as a foreground child, and the loop repeats until `exit`
//! or end-of-input. It is intentionally small and easy to read.
//!
//! The main entry point is [`Interpreter`], which dispatches commands through
//! a set of pluggable factories. The public modules [`command`] and [`env`]
//! expose the traits and types needed to implement your own commands.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod lexer;

#[cfg(test)]
pub(crate) mod testutil;

/// Convenient re-exports of the interactive command runner and the
/// continue/stop signal its commands return.
pub use command::Status;
pub use interpreter::Interpreter;
