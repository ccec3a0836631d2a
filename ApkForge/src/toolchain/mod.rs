//! Resolved locations of the external converters
//!
//! A [`Toolchain`] is built once from a [`ToolchainConfig`] and then passed by
//! reference to every conversion. It holds no mutable state, so it can be
//! shared freely between threads.

mod runner;

pub use runner::{ProcessRunner, ToolInvocation, ToolOutput, ToolRunner, ToolStatus};

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{MAX_DISASSEMBLY_JOBS, SigningConfig, ToolchainConfig};
use crate::error::{Error, Result};

/// Entry class of the dx dexer inside `dx.jar`.
pub const DX_MAIN: &str = "com.android.dx.command.Main";
/// dex2jar entry classes.
pub const DEX2JAR_MAIN: &str = "com.googlecode.dex2jar.tools.Dex2jarCmd";
pub const JAR2DEX_MAIN: &str = "com.googlecode.dex2jar.tools.Jar2Dex";
pub const STD_APK_MAIN: &str = "com.googlecode.dex2jar.tools.StdApkCmd";

/// External programs the converter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Java,
    Apktool,
    Dx,
    Baksmali,
    Smali,
    Dex2jar,
    Jarsigner,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Java,
        Tool::Apktool,
        Tool::Dx,
        Tool::Baksmali,
        Tool::Smali,
        Tool::Dex2jar,
        Tool::Jarsigner,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Java => "java",
            Tool::Apktool => "apktool",
            Tool::Dx => "dx",
            Tool::Baksmali => "baksmali",
            Tool::Smali => "smali",
            Tool::Dex2jar => "dex2jar",
            Tool::Jarsigner => "jarsigner",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a tool's artifact was found on disk.
#[derive(Debug, Clone)]
pub struct ToolAvailability {
    pub tool: Tool,
    pub path: PathBuf,
    pub available: bool,
}

/// Resolved toolchain.
#[derive(Debug, Clone)]
pub struct Toolchain {
    java: PathBuf,
    jarsigner: PathBuf,
    apktool: PathBuf,
    dx: PathBuf,
    baksmali: PathBuf,
    smali: PathBuf,
    dex2jar_lib: PathBuf,
    api_level: u32,
    max_jobs: usize,
    signing: SigningConfig,
}

impl Toolchain {
    /// Resolve every path in `config`.
    ///
    /// Missing artifacts are not an error here; an operation that needs one
    /// fails with [`Error::ToolMissing`] when it runs.
    pub fn initialize(config: &ToolchainConfig) -> Result<Self> {
        if config.api_level == 0 {
            return Err(Error::InvalidConfig("api_level must be at least 1".into()));
        }
        if config.max_jobs == 0 {
            return Err(Error::InvalidConfig("max_jobs must be at least 1".into()));
        }
        if config.max_jobs > MAX_DISASSEMBLY_JOBS {
            tracing::warn!(
                "max_jobs = {} exceeds the limit of {MAX_DISASSEMBLY_JOBS}; using {MAX_DISASSEMBLY_JOBS}",
                config.max_jobs
            );
        }

        let tools_dir = expand(non_empty("tools_dir", &config.tools_dir)?);
        let artifact = |key: &str, value: &str| -> Result<PathBuf> {
            let path = expand(non_empty(key, value)?);
            Ok(if path.is_absolute() { path } else { tools_dir.join(path) })
        };

        let toolchain = Self {
            java: resolve_program(non_empty("java", &config.java)?),
            jarsigner: resolve_program(non_empty("jarsigner", &config.jarsigner)?),
            apktool: artifact("apktool", &config.apktool)?,
            dx: artifact("dx", &config.dx)?,
            baksmali: artifact("baksmali", &config.baksmali)?,
            smali: artifact("smali", &config.smali)?,
            dex2jar_lib: artifact("dex2jar_lib", &config.dex2jar_lib)?,
            api_level: config.api_level,
            max_jobs: config.max_jobs.min(MAX_DISASSEMBLY_JOBS),
            signing: config.signing.clone(),
        };
        tracing::debug!("Toolchain initialized: {toolchain:?}");
        Ok(toolchain)
    }

    /// Path of the artifact (jar, directory or program) behind `tool`.
    pub fn path(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Java => &self.java,
            Tool::Apktool => &self.apktool,
            Tool::Dx => &self.dx,
            Tool::Baksmali => &self.baksmali,
            Tool::Smali => &self.smali,
            Tool::Dex2jar => &self.dex2jar_lib,
            Tool::Jarsigner => &self.jarsigner,
        }
    }

    pub fn api_level(&self) -> u32 {
        self.api_level
    }

    pub fn max_jobs(&self) -> usize {
        self.max_jobs
    }

    pub fn signing(&self) -> &SigningConfig {
        &self.signing
    }

    fn is_available(&self, tool: Tool) -> bool {
        let path = self.path(tool);
        match tool {
            Tool::Dex2jar => path.is_dir(),
            Tool::Java | Tool::Jarsigner => which::which(path).is_ok(),
            _ => path.is_file(),
        }
    }

    /// Availability of every tool, in [`Tool::ALL`] order.
    pub fn availability(&self) -> Vec<ToolAvailability> {
        Tool::ALL
            .iter()
            .map(|&tool| ToolAvailability {
                tool,
                path: self.path(tool).to_path_buf(),
                available: self.is_available(tool),
            })
            .collect()
    }

    /// Artifact path of `tool`, or [`Error::ToolMissing`] if it is not installed.
    ///
    /// `java` and `jarsigner` are not checked: a bare name that is not on
    /// `PATH` fails at launch with [`Error::ToolLaunch`] instead.
    pub fn require(&self, tool: Tool) -> Result<&Path> {
        if matches!(tool, Tool::Java | Tool::Jarsigner) || self.is_available(tool) {
            Ok(self.path(tool))
        } else {
            Err(Error::ToolMissing {
                tool,
                path: self.path(tool).to_path_buf(),
            })
        }
    }

    /// `java -jar <jar>` for tools shipped as runnable jars.
    pub fn java_jar(&self, tool: Tool) -> Result<ToolInvocation> {
        let jar = self.require(tool)?;
        Ok(ToolInvocation::new(tool, &self.java).arg("-jar").arg(jar))
    }

    /// `java -cp <classpath> <main_class>` for tools addressed by entry class.
    pub fn java_main(&self, tool: Tool, main_class: &str) -> Result<ToolInvocation> {
        let artifact = self.require(tool)?;
        let classpath: OsString = if tool == Tool::Dex2jar {
            // The JVM expands `dir/*` to every jar in the directory
            artifact.join("*").into_os_string()
        } else {
            artifact.as_os_str().to_os_string()
        };
        Ok(ToolInvocation::new(tool, &self.java)
            .arg("-cp")
            .arg(classpath)
            .arg(main_class))
    }

    /// Bare `jarsigner` invocation.
    pub fn jarsigner(&self) -> ToolInvocation {
        ToolInvocation::new(Tool::Jarsigner, &self.jarsigner)
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(Error::InvalidConfig(format!("{key} must not be empty")))
    } else {
        Ok(value)
    }
}

fn expand(value: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(value).as_ref())
}

/// Bare program names are searched on `PATH`, then `$JAVA_HOME/bin`.
/// Anything with a directory component is taken as given.
fn resolve_program(value: &str) -> PathBuf {
    let path = expand(value);
    if path.components().count() > 1 || path.is_absolute() {
        return path;
    }
    which::which(value)
        .ok()
        .or_else(|| find_in_java_home(value))
        .unwrap_or(path)
}

fn find_in_java_home(bin: &str) -> Option<PathBuf> {
    let home = env::var_os("JAVA_HOME")?;
    let cwd = env::current_dir().ok()?;
    which::which_in(bin, Some(PathBuf::from(home).join("bin")), cwd).ok()
}
