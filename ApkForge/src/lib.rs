//! # `ApkForge`
//!
//! Android package conversion and signing on top of the standard reverse
//! engineering toolchain.
//!
//! ## Supported Conversions
//!
//! - **APK ↔ project directory** - apktool decode / build, framework install
//! - **class / jar → DEX** - dx
//! - **DEX ↔ smali** - baksmali / smali, with a class → smali pipeline
//! - **DEX ↔ JAR, APK → ZIP** - dex2jar
//! - **APK signing** - jarsigner on a copy with the old signature stripped
//!
//! Every format-level transform runs in an external tool. This crate locates
//! the tools, builds their argument vectors, validates inputs and outputs,
//! and cleans up intermediate files.
//!
//! ## Quick Start
//!
//! ```no_run
//! use apkforge::prelude::*;
//!
//! let config = ToolchainConfig::discover(None)?;
//! let toolchain = Toolchain::initialize(&config)?;
//! let converter = Converter::new(&toolchain);
//!
//! converter.dex_to_smali("classes.dex".as_ref(), "smali/".as_ref())?;
//! converter.smali_to_dex("smali/".as_ref(), "rebuilt/classes.dex".as_ref())?;
//!
//! let keystore = KeystoreConfig::load("signing.toml")?;
//! let signed = converter.sign_apk("app.apk".as_ref(), &keystore)?;
//! println!("signed: {}", signed.display());
//! # Ok::<(), apkforge::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `apkforge` command-line binary

pub mod config;
pub mod converter;
pub mod error;
pub mod keystore;
pub mod toolchain;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{SigningConfig, ToolchainConfig};
    pub use crate::converter::{Converter, FailureCallback};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::keystore::KeystoreConfig;
    pub use crate::toolchain::{
        Tool, ToolAvailability, ToolInvocation, ToolOutput, ToolRunner, ToolStatus, Toolchain,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
