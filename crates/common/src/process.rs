//! External process invocation.
//!
//! All real work happens in external programs: RetroArch for capturing,
//! ImageMagick for cropping and compositing. Commands are assembled as
//! plain argv values so they can be built and inspected without side
//! effects, and executed through the [`CommandRunner`] seam so tests can
//! substitute a fake.

use std::fmt;
use std::process::Command;

use crate::error::{ShadershotError, ShadershotResult};

/// A fully assembled external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Start an invocation of the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Trait for executing external commands.
pub trait CommandRunner {
    /// Run the command to completion.
    ///
    /// Returns an error only when the process could not be started. The
    /// exit status of a process that did run is logged but deliberately not
    /// treated as a success signal: the emulator is flaky about flush
    /// timing, and existence of the expected output file is the only
    /// evidence the callers trust.
    fn run(&mut self, invocation: &Invocation) -> ShadershotResult<()>;
}

/// Runs commands on the real system via `std::process`.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> ShadershotResult<()> {
        tracing::debug!(command = %invocation, "Running external command");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|e| {
                ShadershotError::process(format!("Failed to start {}: {e}", invocation.program))
            })?;

        if !status.success() {
            tracing::debug!(
                program = %invocation.program,
                status = %status,
                "External command exited non-zero"
            );
        }

        Ok(())
    }
}
