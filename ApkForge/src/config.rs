//! Toolchain configuration (`toolchain.toml`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "APKFORGE_CONFIG";

/// Upper bound on disassembly workers, whatever the host or config says.
pub const MAX_DISASSEMBLY_JOBS: usize = 6;

/// API level dex files are loaded at when disassembling.
pub const DEFAULT_API_LEVEL: u32 = 15;

fn default_tools_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("ApkForge").join("tools").to_string_lossy().into_owned())
        .unwrap_or_else(|| "tools".to_string())
}

fn default_java() -> String {
    "java".to_string()
}

fn default_jarsigner() -> String {
    "jarsigner".to_string()
}

fn default_apktool() -> String {
    "apktool.jar".to_string()
}

fn default_dx() -> String {
    "dx.jar".to_string()
}

fn default_baksmali() -> String {
    "baksmali.jar".to_string()
}

fn default_smali() -> String {
    "smali.jar".to_string()
}

fn default_dex2jar_lib() -> String {
    "dex2jar/lib".to_string()
}

fn default_api_level() -> u32 {
    DEFAULT_API_LEVEL
}

fn default_max_jobs() -> usize {
    MAX_DISASSEMBLY_JOBS
}

fn default_digest_alg() -> String {
    "SHA-256".to_string()
}

fn default_sig_alg() -> String {
    "SHA256withRSA".to_string()
}

/// Where the external converters live and how they are driven.
///
/// Relative artifact paths are resolved against `tools_dir`. `java` and
/// `jarsigner` may be bare program names, in which case they are looked up
/// on `PATH` and under `$JAVA_HOME/bin`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolchainConfig {
    #[serde(default = "default_tools_dir")]
    pub tools_dir: String,
    #[serde(default = "default_java")]
    pub java: String,
    #[serde(default = "default_jarsigner")]
    pub jarsigner: String,
    #[serde(default = "default_apktool")]
    pub apktool: String,
    #[serde(default = "default_dx")]
    pub dx: String,
    #[serde(default = "default_baksmali")]
    pub baksmali: String,
    #[serde(default = "default_smali")]
    pub smali: String,
    /// Directory holding the dex2jar jars (`d2j-*.jar`, `dex-tools-*.jar`, ...)
    #[serde(default = "default_dex2jar_lib")]
    pub dex2jar_lib: String,
    #[serde(default = "default_api_level")]
    pub api_level: u32,
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,
    #[serde(default)]
    pub signing: SigningConfig,
}

/// Digest and signature algorithms handed to `jarsigner`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SigningConfig {
    #[serde(default = "default_digest_alg")]
    pub digest_alg: String,
    #[serde(default = "default_sig_alg")]
    pub sig_alg: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            digest_alg: default_digest_alg(),
            sig_alg: default_sig_alg(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            tools_dir: default_tools_dir(),
            java: default_java(),
            jarsigner: default_jarsigner(),
            apktool: default_apktool(),
            dx: default_dx(),
            baksmali: default_baksmali(),
            smali: default_smali(),
            dex2jar_lib: default_dex2jar_lib(),
            api_level: default_api_level(),
            max_jobs: default_max_jobs(),
            signing: SigningConfig::default(),
        }
    }
}

impl ToolchainConfig {
    /// Platform default location: `<config dir>/ApkForge/toolchain.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ApkForge").join("toolchain.toml"))
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputMissing {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }

    /// Locate and load the configuration.
    ///
    /// Order: `explicit`, then `$APKFORGE_CONFIG`, then [`Self::default_path`]
    /// if that file exists, then built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(PathBuf::from(path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Using toolchain config {}", path.display());
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Serialize back to TOML (used by `apkforge tools --print-config`).
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
