use crate::command::{CommandFactory, Status};
use crate::env::Environment;
use crate::lexer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — the builtins and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell interpreter: builtins plus an external-command launcher.
///
/// The interpreter maintains an [`Environment`] and a list of
/// [`CommandFactory`] objects that are queried in order to create commands by
/// name. See [`Default`] for the factories included out of the box.
///
/// Example
/// ```
/// use minish::{Interpreter, Status};
/// let mut sh = Interpreter::default();
/// let status = sh.run("echo", &["hello", "world"]).unwrap();
/// assert_eq!(status, Status::Continue);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Run a single command invocation by name with arguments, writing to the
    /// process's standard streams.
    ///
    /// Returns the command's continue/stop signal, or an error if no factory
    /// recognizes the name (which cannot happen with the default set: the
    /// external launcher accepts anything).
    pub fn run(&mut self, name: &str, args: &[&str]) -> anyhow::Result<Status> {
        let mut stdout = std::io::stdout();
        let mut stderr = std::io::stderr();
        let status = self.run_with_streams(name, args, &mut stdout, &mut stderr)?;
        stdout.flush()?;
        Ok(status)
    }

    /// Names of the builtins registered with this interpreter, in
    /// registration order. Catch-all factories (the external launcher) are
    /// not named.
    pub fn builtin_names(&self) -> Vec<&'static str> {
        self.commands.iter().filter_map(|f| f.name()).collect()
    }

    /// Like [`run`](Self::run), but with injected output streams.
    pub fn run_with_streams(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<Status> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(stdout, stderr, &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Dispatch one tokenized line: an empty token list is a no-op, otherwise
    /// `tokens[0]` names the command and the rest are its arguments.
    pub fn dispatch(&mut self, tokens: &[String]) -> anyhow::Result<Status> {
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Status::Continue);
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(name, &args)
    }

    /// The interactive read loop: prompt, read, tokenize, dispatch, repeat.
    ///
    /// Terminates when a command returns [`Status::Exit`]. End-of-input exits
    /// the process immediately with a success status. An interrupt (^C)
    /// abandons the current line and prints a fresh prompt.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let tokens = lexer::split_line(&line);
                    match self.dispatch(&tokens) {
                        Ok(Status::Exit) => break,
                        Ok(Status::Continue) => {}
                        Err(e) => eprintln!("minish: {:#}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => std::process::exit(0),
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the full builtin table followed by the
    /// external command launcher.
    fn default() -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Echo>::default()),
            Box::new(Factory::<Ls>::default()),
            Box::new(Factory::<Mkdir>::default()),
            Box::new(Factory::<Touch>::default()),
            Box::new(Factory::<Rm>::default()),
            Box::new(Factory::<Rmdir>::default()),
            Box::new(Factory::<Clear>::default()),
            Box::new(Factory::<Cp>::default()),
            Box::new(Factory::<Mv>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
