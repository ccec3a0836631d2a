//! apktool: APK decoding, rebuilding and framework installation

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::Converter;
use crate::error::{Error, Result};
use crate::toolchain::Tool;
use crate::utils::path::{ensure_dir, require_dir, require_file};

/// Metadata file apktool writes at the root of every decoded project.
const APKTOOL_YML: &str = "apktool.yml";

impl Converter<'_> {
    /// Decode `apk` into `out_dir`, overwriting any previous decode there.
    ///
    /// Runs `apktool d <apk> -o <out_dir> -f`.
    pub fn decompile(&self, apk: &Path, out_dir: &Path) -> Result<()> {
        tracing::info!("decompile: {} → {}", apk.display(), out_dir.display());
        let result = self.decompile_inner(apk, out_dir);
        self.report("decompile", result)
    }

    fn decompile_inner(&self, apk: &Path, out_dir: &Path) -> Result<()> {
        require_file(apk)?;
        let invocation = self
            .toolchain
            .java_jar(Tool::Apktool)?
            .arg("d")
            .arg(apk)
            .arg("-o")
            .arg(out_dir)
            .arg("-f");

        ensure_dir(out_dir)?;
        self.execute(&invocation)?;

        let marker = out_dir.join(APKTOOL_YML);
        if marker.is_file() {
            Ok(())
        } else {
            Err(Error::PostconditionUnmet {
                tool: Tool::Apktool,
                path: marker,
            })
        }
    }

    /// Rebuild a decoded project directory into an APK.
    ///
    /// Without `out_apk` apktool writes to its default location, see
    /// [`default_build_output`]. Returns the path of the built APK.
    pub fn recompile(&self, folder: &Path, out_apk: Option<&Path>) -> Result<PathBuf> {
        tracing::info!("recompile: {}", folder.display());
        let result = self.recompile_inner(folder, out_apk);
        self.report("recompile", result)
    }

    fn recompile_inner(&self, folder: &Path, out_apk: Option<&Path>) -> Result<PathBuf> {
        require_dir(folder)?;
        let mut invocation = self.toolchain.java_jar(Tool::Apktool)?.arg("b").arg(folder);
        if let Some(out) = out_apk {
            invocation = invocation.arg("-o").arg(out);
        }
        let expected = out_apk.map_or_else(|| default_build_output(folder), Path::to_path_buf);

        self.produce_file(&invocation, &expected)?;
        Ok(expected)
    }

    /// Register a framework APK (e.g. a vendor `framework-res.apk`) with apktool.
    ///
    /// Runs `apktool if <framework_apk>`.
    pub fn install_framework(&self, framework_apk: &Path) -> Result<()> {
        tracing::info!("install-framework: {}", framework_apk.display());
        let result = self.install_framework_inner(framework_apk);
        self.report("install-framework", result)
    }

    fn install_framework_inner(&self, framework_apk: &Path) -> Result<()> {
        require_file(framework_apk)?;
        let invocation = self
            .toolchain
            .java_jar(Tool::Apktool)?
            .arg("if")
            .arg(framework_apk);
        self.execute(&invocation).map(|_| ())
    }
}

/// Where `apktool b <folder>` places its output when no `-o` is given:
/// `<folder>/dist/<apkFileName>`, with `apkFileName` read from
/// `apktool.yml` and falling back to `<folder name>.apk`.
pub fn default_build_output(folder: &Path) -> PathBuf {
    let file_name = read_apk_file_name(&folder.join(APKTOOL_YML))
        .unwrap_or_else(|| format!("{}.apk", folder_name(folder)));
    folder.join("dist").join(file_name)
}

/// Last path component; `.` and `..` are resolved first.
fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            folder
                .canonicalize()
                .ok()?
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "out".to_string())
}

/// The part of apktool's `MetaInfo` document needed to locate the build output.
#[derive(Deserialize)]
struct ApktoolMeta {
    #[serde(rename = "apkFileName")]
    apk_file_name: Option<String>,
}

fn read_apk_file_name(yml: &Path) -> Option<String> {
    let content = std::fs::read_to_string(yml).ok()?;
    // apktool writes the document under a `!!brut.androlib.meta.MetaInfo` tag
    let value = match serde_yaml::from_str::<serde_yaml::Value>(&content) {
        Ok(serde_yaml::Value::Tagged(tagged)) => tagged.value,
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Unreadable {}: {e}", yml.display());
            return None;
        }
    };
    let meta: ApktoolMeta = serde_yaml::from_value(value).ok()?;
    meta.apk_file_name.filter(|name| !name.is_empty())
}
