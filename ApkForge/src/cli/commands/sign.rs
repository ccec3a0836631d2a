//! Keystore selection for `apkforge sign`
use std::path::Path;

use crate::keystore::KeystoreConfig;

/// Build signing credentials from either a keystore TOML file or the four
/// individual flags.
pub fn credentials(
    config_file: Option<&Path>,
    keystore: Option<&Path>,
    storepass: Option<&str>,
    alias: Option<&str>,
    keypass: Option<&str>,
) -> anyhow::Result<KeystoreConfig> {
    if let Some(file) = config_file {
        return Ok(KeystoreConfig::load(file)?);
    }
    match (keystore, storepass, alias, keypass) {
        (Some(keystore), Some(storepass), Some(alias), Some(keypass)) => {
            Ok(KeystoreConfig::new(keystore, storepass, alias, keypass))
        }
        _ => anyhow::bail!(
            "Signing needs --keystore-config <file>, or all of --keystore, --storepass, --alias and --keypass"
        ),
    }
}
