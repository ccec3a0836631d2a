//! Conversion orchestration
//!
//! Every transform is delegated to an external tool; this module only builds
//! argument vectors, checks inputs and outputs, and keeps intermediate files
//! from leaking:
//! - APK ↔ project directory - apktool (`d` / `b` / `if`)
//! - class/jar → DEX - dx
//! - DEX/APK → smali, smali → DEX - baksmali / smali
//! - class/jar → smali - dx then baksmali, through a scratch DEX
//! - DEX/APK ↔ JAR, APK → ZIP - dex2jar
//! - APK signing - jarsigner on a copy stripped of `META-INF/`

mod apk;
mod dex;
mod dex2jar;
mod sign;
mod smali;

pub use apk::default_build_output;
pub use sign::{SIGNATURE_PREFIX, signed_output_path};
pub use smali::{cap_jobs, disassembly_jobs};

use std::path::Path;

use crate::error::{Error, Result};
use crate::toolchain::{ProcessRunner, ToolInvocation, ToolOutput, ToolRunner, Toolchain};
use crate::utils::path::{discard, ensure_parent, remove_stale};

/// Failure callback type for conversion operations.
/// Receives the error of a failed operation, once, before it is returned.
pub type FailureCallback<'a> = &'a dyn Fn(&Error);

/// Longest tool diagnostic carried inside an error, in lines.
const MAX_DIAGNOSTIC_LINES: usize = 20;

static PROCESS_RUNNER: ProcessRunner = ProcessRunner;

/// Runs conversions against a [`Toolchain`].
///
/// ```no_run
/// use apkforge::prelude::*;
///
/// let toolchain = Toolchain::initialize(&ToolchainConfig::discover(None)?)?;
/// let converter = Converter::new(&toolchain)
///     .on_failure(&|e| eprintln!("conversion failed: {e}"));
///
/// converter.decompile("app.apk".as_ref(), "app_src".as_ref())?;
/// let rebuilt = converter.recompile("app_src".as_ref(), None)?;
/// println!("rebuilt {}", rebuilt.display());
/// # Ok::<(), apkforge::Error>(())
/// ```
pub struct Converter<'a> {
    toolchain: &'a Toolchain,
    runner: &'a dyn ToolRunner,
    on_failure: Option<FailureCallback<'a>>,
}

impl<'a> Converter<'a> {
    /// Converter that launches tools as child processes.
    pub fn new(toolchain: &'a Toolchain) -> Self {
        Self::with_runner(toolchain, &PROCESS_RUNNER)
    }

    /// Converter with a custom process launcher.
    pub fn with_runner(toolchain: &'a Toolchain, runner: &'a dyn ToolRunner) -> Self {
        Self {
            toolchain,
            runner,
            on_failure: None,
        }
    }

    /// Register a diagnostics hook. It does not change what operations return.
    #[must_use]
    pub fn on_failure(mut self, callback: FailureCallback<'a>) -> Self {
        self.on_failure = Some(callback);
        self
    }

    pub fn toolchain(&self) -> &'a Toolchain {
        self.toolchain
    }

    /// Log the outcome of a public operation and notify the failure hook.
    fn report<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => tracing::info!("{operation}: done"),
            Err(e) => {
                tracing::warn!("{operation}: {e}");
                if let Some(callback) = self.on_failure {
                    callback(e);
                }
            }
        }
        result
    }

    /// Run a tool once and require a successful exit status.
    fn execute(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        tracing::debug!("Running {invocation}");
        let output = self
            .runner
            .run(invocation)
            .map_err(|source| Error::ToolLaunch {
                tool: invocation.tool,
                program: invocation.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: invocation.tool,
                status: output.status,
                stderr: diagnostic(&output),
            });
        }
        Ok(output)
    }

    /// Run a tool whose product is the single file `output`.
    ///
    /// A stale `output` is removed first; if the tool fails or does not
    /// produce `output`, whatever it left behind is removed again.
    fn produce_file(&self, invocation: &ToolInvocation, output: &Path) -> Result<()> {
        clear_output(output)?;

        let result = self.execute(invocation).and_then(|_| {
            if output.is_file() {
                Ok(())
            } else {
                Err(Error::PostconditionUnmet {
                    tool: invocation.tool,
                    path: output.to_path_buf(),
                })
            }
        });
        if result.is_err() {
            discard(output);
        }
        result
    }
}

/// Create the parent of `output` and remove any previous `output`.
///
/// Called as soon as the inputs are validated, so a failure while resolving
/// the tool or staging inputs cannot leave an earlier product in place.
fn clear_output(output: &Path) -> Result<()> {
    ensure_parent(output)?;
    remove_stale(output)
}

/// Tail of stderr (or stdout, for tools that report errors there).
fn diagnostic(output: &ToolOutput) -> String {
    let text = if output.stderr.trim().is_empty() {
        output.stdout.trim()
    } else {
        output.stderr.trim()
    };
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(MAX_DIAGNOSTIC_LINES);
    lines[start..].join("\n")
}
