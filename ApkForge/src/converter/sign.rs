//! jarsigner: APK signing

use std::path::{Path, PathBuf};

use super::Converter;
use crate::error::{Error, Result};
use crate::keystore::KeystoreConfig;
use crate::utils::archive::strip_entries;
use crate::utils::path::{file_stem_string, require_file};

/// Archive prefix holding the manifest and signature blocks of a signed jar.
pub const SIGNATURE_PREFIX: &str = "META-INF/";

/// `<dir>/<stem>_signed.apk` next to `apk`.
pub fn signed_output_path(apk: &Path) -> PathBuf {
    let name = format!("{}_signed.apk", file_stem_string(apk));
    match apk.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

impl Converter<'_> {
    /// Sign `apk` with the given keystore, writing `<stem>_signed.apk`
    /// beside it. Returns the signed path.
    ///
    /// Any existing signature is stripped on a scratch copy first, so the
    /// input APK itself is never modified.
    pub fn sign_apk(&self, apk: &Path, keystore: &KeystoreConfig) -> Result<PathBuf> {
        tracing::info!("sign: {} with alias {}", apk.display(), keystore.alias);
        let result = self.sign_apk_inner(apk, keystore);
        self.report("sign", result)
    }

    fn sign_apk_inner(&self, apk: &Path, keystore: &KeystoreConfig) -> Result<PathBuf> {
        require_file(apk)?;
        require_file(&keystore.keystore_path)?;

        let signed = signed_output_path(apk);
        let dir = signed
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut scratch = tempfile::Builder::new()
            .prefix("copy_")
            .suffix(".apk")
            .tempfile_in(dir)
            .map_err(|source| Error::PathCreation {
                path: dir.to_path_buf(),
                source,
            })?;
        let removed = strip_entries(apk, scratch.as_file_mut(), SIGNATURE_PREFIX)?;
        tracing::debug!("Stripped {removed} signature entries into {}", scratch.path().display());

        let signing = self.toolchain.signing();
        let invocation = self
            .toolchain
            .jarsigner()
            .arg("-digestalg")
            .arg(&signing.digest_alg)
            .arg("-sigalg")
            .arg(&signing.sig_alg)
            .arg("-keystore")
            .arg(&keystore.keystore_path)
            .arg("-storepass")
            .arg(&keystore.keystore_password)
            .arg("-keypass")
            .arg(&keystore.alias_password)
            .arg("-signedjar")
            .arg(&signed)
            .arg(scratch.path())
            .arg(&keystore.alias);

        let result = self.produce_file(&invocation, &signed);
        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove scratch copy: {e}");
        }
        result.map(|()| signed)
    }
}
