//! Process launching for external converters

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::Tool;

/// Arguments whose following value must never reach a log line.
const SECRET_FLAGS: &[&str] = &["-storepass", "-keypass"];

/// A fully built command: program plus argument vector.
///
/// Arguments are passed to the OS as discrete elements, never through a
/// shell, so spaces or metacharacters in paths and passwords are inert.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub tool: Tool,
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new(tool: Tool, program: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Position of `flag` in the argument vector, if present.
    pub fn position_of(&self, flag: &str) -> Option<usize> {
        self.args.iter().position(|a| a == flag)
    }

    /// Value following `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.position_of(flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }
}

/// Renders the command line with keystore secrets masked.
impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        let mut mask_next = false;
        for arg in &self.args {
            if mask_next {
                write!(f, " ******")?;
                mask_next = false;
                continue;
            }
            let arg = arg.to_string_lossy();
            mask_next = SECRET_FLAGS.contains(&&*arg);
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Exit status of an external tool; `None` when terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus(pub Option<i32>);

impl ToolStatus {
    pub const SUCCESS: ToolStatus = ToolStatus(Some(0));

    pub fn success(self) -> bool {
        self.0 == Some(0)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "status {code}"),
            None => write!(f, "no status (terminated by signal)"),
        }
    }
}

/// Captured result of a finished tool process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ToolStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// A successful run with no output.
    pub fn success() -> Self {
        Self {
            status: ToolStatus::SUCCESS,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: ToolStatus(Some(code)),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Executes a [`ToolInvocation`] and waits for it to finish.
///
/// The converter only ever talks to tools through this trait, so tests can
/// substitute a recording fake and never need a JVM.
pub trait ToolRunner: Send + Sync {
    fn run(&self, invocation: &ToolInvocation) -> std::io::Result<ToolOutput>;
}

/// Runs tools as blocking child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> std::io::Result<ToolOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()?;

        let result = ToolOutput {
            status: ToolStatus(output.status.code()),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!("{} finished with {}", invocation.tool, result.status);
        Ok(result)
    }
}
