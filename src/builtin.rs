use crate::command::{CommandFactory, ExecutableCommand, Status};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Names of every builtin, in registration order.
///
/// `help` prints this table, and the default interpreter registers one
/// factory per entry. Names must be unique; a test enforces it.
pub(crate) const BUILTIN_NAMES: &[&str] = &[
    "cd", "help", "exit", "pwd", "echo", "ls", "mkdir", "touch", "rm", "rmdir", "clear", "cp",
    "mv",
];

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Executes the command using the provided output streams and environment.
    ///
    /// Every builtin except `exit` resolves to [`Status::Continue`]; failures
    /// are reported as errors and never stop the read loop.
    fn execute(
        self,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Status>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Status> {
        match <T as BuiltinCommand>::execute(*self, stdout, stderr, env) {
            Ok(status) => Ok(status),
            Err(e) => {
                writeln!(stderr, "{}: {:#}", T::name(), e)?;
                Ok(Status::Continue)
            }
        }
    }
}

/// Fallback command produced when argument parsing fails (or `--help` is
/// requested): prints argh's generated text and keeps the loop running.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        if self.is_error {
            writeln!(stderr, "{}", self.output.trim_end())?;
        } else {
            writeln!(stdout, "{}", self.output.trim_end())?;
        }
        Ok(Status::Continue)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> Option<&'static str> {
        Some(T::name())
    }

    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        // Tokens are arbitrary strings: a leading dash is data, not an
        // option. Prepending "--" makes argh parse everything after it as
        // positionals; a lone leading "--help" keeps its usual meaning.
        let parsed = if args.first() == Some(&"--help") {
            T::from_args(&[name], args)
        } else {
            let mut forced = Vec::with_capacity(args.len() + 1);
            forced.push("--");
            forced.extend_from_slice(args);
            T::from_args(&[name], &forced)
        };
        Some(match parsed {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Status> {
        let target = PathBuf::from(&self.target);
        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&new_dir)
            .with_context(|| format!("can't resolve {}", new_dir.display()))?;

        env::set_current_dir(&canonical)
            .with_context(|| format!("can't chdir to {}", canonical.display()))?;
        env.current_dir = canonical;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Status> {
        writeln!(stdout, "{}", env.current_dir.to_string_lossy())?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Write the arguments to standard output, separated by spaces and followed
/// by a newline.
pub struct Echo {
    #[argh(positional, greedy)]
    /// values to print as-is, separated by spaces.
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        writeln!(stdout, "{}", self.args.join(" "))?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// List directory entries, one per line. `.` and `..` are not listed.
pub struct Ls {
    #[argh(positional)]
    /// directory to list; defaults to the current directory.
    pub path: Option<String>,
}

impl BuiltinCommand for Ls {
    fn name() -> &'static str {
        "ls"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        let path = self.path.as_deref().unwrap_or(".");
        let entries =
            fs::read_dir(path).with_context(|| format!("can't open directory {}", path))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("can't read directory {}", path))?;
            writeln!(stdout, "{}", entry.file_name().to_string_lossy())?;
        }
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Create a directory with permission mode 0755.
pub struct Mkdir {
    #[argh(positional)]
    /// path of the directory to create.
    pub path: String,
}

impl BuiltinCommand for Mkdir {
    fn name() -> &'static str {
        "mkdir"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(&self.path)
            .with_context(|| format!("can't create directory {}", self.path))?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Create an empty file with permission mode 0755. An existing file is left
/// untouched.
pub struct Touch {
    #[argh(positional)]
    /// path of the file to create.
    pub path: String,
}

impl BuiltinCommand for Touch {
    fn name() -> &'static str {
        "touch"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        let mut opts = fs::OpenOptions::new();
        opts.write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o755);
        }
        // The handle is dropped right away; creation is the whole point.
        opts.open(&self.path)
            .map(drop)
            .with_context(|| format!("can't create {}", self.path))?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Delete a file.
pub struct Rm {
    #[argh(positional)]
    /// path of the file to delete.
    pub path: String,
}

impl BuiltinCommand for Rm {
    fn name() -> &'static str {
        "rm"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        fs::remove_file(&self.path).with_context(|| format!("can't delete {}", self.path))?;
        writeln!(stdout, "deleted {}", self.path)?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Delete an empty directory.
pub struct Rmdir {
    #[argh(positional)]
    /// path of the directory to delete.
    pub path: String,
}

impl BuiltinCommand for Rmdir {
    fn name() -> &'static str {
        "rmdir"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        fs::remove_dir(&self.path).with_context(|| format!("can't delete {}", self.path))?;
        writeln!(stdout, "deleted {}", self.path)?;
        Ok(Status::Continue)
    }
}

/// Stream `source` into a freshly created `dest`, byte for byte.
///
/// Both handles are scoped to this call and released on every path.
fn copy_bytes(source: &str, dest: &str) -> Result<()> {
    let mut from = fs::File::open(source).with_context(|| format!("can't open {}", source))?;
    let mut to = fs::File::create(dest).with_context(|| format!("can't create {}", dest))?;
    io::copy(&mut from, &mut to)
        .with_context(|| format!("can't copy {} to {}", source, dest))?;
    Ok(())
}

#[derive(FromArgs)]
/// Copy a file byte-for-byte.
pub struct Cp {
    #[argh(positional)]
    /// file to copy from.
    pub source: String,

    #[argh(positional)]
    /// file to copy to; created or truncated.
    pub dest: String,
}

impl BuiltinCommand for Cp {
    fn name() -> &'static str {
        "cp"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        copy_bytes(&self.source, &self.dest)?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Copy a file byte-for-byte, then delete the source.
pub struct Mv {
    #[argh(positional)]
    /// file to move from.
    pub source: String,

    #[argh(positional)]
    /// file to move to; created or truncated.
    pub dest: String,
}

impl BuiltinCommand for Mv {
    fn name() -> &'static str {
        "mv"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        copy_bytes(&self.source, &self.dest)?;
        fs::remove_file(&self.source)
            .with_context(|| format!("can't delete {}", self.source))?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Clear the terminal screen.
pub struct Clear {}

impl BuiltinCommand for Clear {
    fn name() -> &'static str {
        "clear"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        // ANSI: erase display, then move the cursor home.
        write!(stdout, "\x1b[2J\x1b[1;1H")?;
        stdout.flush()?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Print a usage banner and the list of builtin commands.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        writeln!(stdout, "minish: a minimal shell")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in BUILTIN_NAMES {
            writeln!(stdout, "  {}", name)?;
        }
        writeln!(stdout, "Anything else is run as an external program.")?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Terminate the shell.
pub struct Exit {
    #[allow(dead_code)]
    #[argh(positional, greedy)]
    /// accepted and ignored.
    pub args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Status> {
        Ok(Status::Exit)
    }
}
