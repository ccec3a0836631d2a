//! Keystore credentials for APK signing

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Keystore location plus the credentials `jarsigner` needs.
///
/// Loaded from a small TOML file:
///
/// ```toml
/// keystore_path = "~/keys/release.jks"
/// keystore_password = "..."
/// alias = "release"
/// alias_password = "..."
/// ```
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct KeystoreConfig {
    pub keystore_path: PathBuf,
    pub keystore_password: String,
    pub alias: String,
    pub alias_password: String,
}

impl KeystoreConfig {
    pub fn new(
        keystore_path: impl Into<PathBuf>,
        keystore_password: impl Into<String>,
        alias: impl Into<String>,
        alias_password: impl Into<String>,
    ) -> Self {
        Self {
            keystore_path: keystore_path.into(),
            keystore_password: keystore_password.into(),
            alias: alias.into(),
            alias_password: alias_password.into(),
        }
    }

    /// Load credentials from a TOML file. `keystore_path` is tilde-expanded
    /// and, when relative, resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputMissing {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        let expanded = PathBuf::from(
            shellexpand::tilde(&config.keystore_path.to_string_lossy()).as_ref(),
        );
        config.keystore_path = match path.parent() {
            Some(base) if expanded.is_relative() => base.join(expanded),
            _ => expanded,
        };
        Ok(config)
    }
}

impl fmt::Debug for KeystoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreConfig")
            .field("keystore_path", &self.keystore_path)
            .field("keystore_password", &"******")
            .field("alias", &self.alias)
            .field("alias_password", &"******")
            .finish()
    }
}
