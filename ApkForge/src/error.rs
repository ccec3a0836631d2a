//! Error types for `ApkForge`

use std::path::PathBuf;

use thiserror::Error;

use crate::toolchain::{Tool, ToolStatus};

/// Coarse classification of an [`Error`].
///
/// Every failed operation maps onto exactly one of these, which lets callers
/// react to "the input was missing" without matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required input artifact does not exist or has the wrong shape.
    InputMissing,
    /// An output directory (or an output's parent) could not be created.
    PathCreationFailed,
    /// The external tool could not be launched or reported failure.
    ToolInvocationFailed,
    /// The tool finished but the expected output artifact is absent.
    PostconditionUnmet,
    /// The toolchain configuration is unusable.
    Configuration,
    /// Any other filesystem or archive error.
    Io,
}

/// The error type for `ApkForge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Input Errors ====================
    /// A required input path does not exist.
    #[error("input not found: {path}")]
    InputMissing {
        /// The missing path.
        path: PathBuf,
    },

    /// The input exists but is a directory where a regular file is required.
    #[error("input is not a regular file: {path}")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// The input exists but is a file where a directory is required.
    #[error("input is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    // ==================== Output Errors ====================
    /// An output directory could not be created.
    #[error("failed to create {path}: {source}")]
    PathCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The tool completed but did not produce the expected artifact.
    #[error("{tool} finished but {path} was not produced")]
    PostconditionUnmet {
        /// The tool that was expected to produce the artifact.
        tool: Tool,
        /// The expected artifact path.
        path: PathBuf,
    },

    // ==================== Tool Errors ====================
    /// A converter artifact required for this operation is not installed.
    #[error("{tool} not found at {path}")]
    ToolMissing {
        /// The tool whose artifact is missing.
        tool: Tool,
        /// Where the artifact was expected.
        path: PathBuf,
    },

    /// The external process could not be started.
    #[error("failed to launch {tool} ({program}): {source}")]
    ToolLaunch {
        /// The tool being launched.
        tool: Tool,
        /// The program that was executed.
        program: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The external process exited unsuccessfully.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        /// The tool that failed.
        tool: Tool,
        /// Exit status reported by the process.
        status: ToolStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    // ==================== Configuration Errors ====================
    /// The configuration file could not be parsed.
    #[error("invalid toolchain config {path}: {source}")]
    ConfigParse {
        /// The configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value could not be interpreted.
    #[error("invalid toolchain config: {0}")]
    InvalidConfig(String),

    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InputMissing { .. } | Error::NotAFile { .. } | Error::NotADirectory { .. } => {
                ErrorKind::InputMissing
            }
            Error::PathCreation { .. } => ErrorKind::PathCreationFailed,
            Error::PostconditionUnmet { .. } => ErrorKind::PostconditionUnmet,
            Error::ToolMissing { .. } | Error::ToolLaunch { .. } | Error::ToolFailed { .. } => {
                ErrorKind::ToolInvocationFailed
            }
            Error::ConfigParse { .. } | Error::InvalidConfig(_) => ErrorKind::Configuration,
            Error::Io(_) | Error::Zip(_) => ErrorKind::Io,
        }
    }
}

/// A specialized Result type for `ApkForge` operations.
pub type Result<T> = std::result::Result<T, Error>;
