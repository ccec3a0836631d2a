//! dex2jar: DEX ↔ JAR and APK → ZIP

use std::path::Path;

use super::{Converter, clear_output};
use crate::error::Result;
use crate::toolchain::{DEX2JAR_MAIN, JAR2DEX_MAIN, STD_APK_MAIN, Tool};
use crate::utils::path::require_file;

impl Converter<'_> {
    /// Translate a DEX (or APK) into a JAR of JVM classes.
    pub fn dex_to_jar(&self, dex_or_apk: &Path, out_jar: &Path) -> Result<()> {
        tracing::info!("dex2jar: {} → {}", dex_or_apk.display(), out_jar.display());
        let result = self.dex2jar_tool(DEX2JAR_MAIN, dex_or_apk, out_jar);
        self.report("dex2jar", result)
    }

    /// Translate a JAR into a DEX.
    ///
    /// A stale `out_dex` is removed before the run and `--force` is passed,
    /// so the tool never refuses to overwrite.
    pub fn jar_to_dex(&self, jar: &Path, out_dex: &Path) -> Result<()> {
        tracing::info!("jar2dex: {} → {}", jar.display(), out_dex.display());
        let result = self.dex2jar_tool(JAR2DEX_MAIN, jar, out_dex);
        self.report("jar2dex", result)
    }

    /// Rewrite an APK as a plain ZIP archive.
    pub fn apk_to_zip(&self, apk: &Path, out_zip: &Path) -> Result<()> {
        tracing::info!("apk2zip: {} → {}", apk.display(), out_zip.display());
        let result = self.apk_to_zip_inner(apk, out_zip);
        self.report("apk2zip", result)
    }

    fn apk_to_zip_inner(&self, apk: &Path, out_zip: &Path) -> Result<()> {
        require_file(apk)?;
        clear_output(out_zip)?;
        let invocation = self
            .toolchain
            .java_main(Tool::Dex2jar, STD_APK_MAIN)?
            .arg(apk)
            .arg("-o")
            .arg(out_zip);
        self.produce_file(&invocation, out_zip)
    }

    /// `<main> <input> --output <output> --force`
    fn dex2jar_tool(&self, main_class: &str, input: &Path, output: &Path) -> Result<()> {
        require_file(input)?;
        clear_output(output)?;
        let invocation = self
            .toolchain
            .java_main(Tool::Dex2jar, main_class)?
            .arg(input)
            .arg("--output")
            .arg(output)
            .arg("--force");
        self.produce_file(&invocation, output)
    }
}
