//! baksmali / smali: DEX ↔ smali, plus the class → smali pipeline

use std::num::NonZeroUsize;
use std::path::Path;

use super::{Converter, clear_output};
use crate::config::MAX_DISASSEMBLY_JOBS;
use crate::error::{Error, Result};
use crate::toolchain::Tool;
use crate::utils::archive::extract_archive;
use crate::utils::path::{ensure_dir, require_exists, require_file, scratch_dir_beside};

/// Name of the intermediate DEX inside the class → smali scratch directory.
const SCRATCH_DEX: &str = "classes.dex";

/// Clamp a host's parallelism to `limit`, never exceeding
/// [`MAX_DISASSEMBLY_JOBS`] and never dropping below one worker.
pub fn cap_jobs(available: usize, limit: usize) -> usize {
    available.min(limit).min(MAX_DISASSEMBLY_JOBS).max(1)
}

/// Worker count for baksmali on this host.
pub fn disassembly_jobs(limit: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    cap_jobs(available, limit)
}

impl Converter<'_> {
    /// Disassemble a DEX (or the primary DEX inside an APK) into `out_dir`.
    pub fn dex_to_smali(&self, dex_or_apk: &Path, out_dir: &Path) -> Result<()> {
        tracing::info!("dex2smali: {} → {}", dex_or_apk.display(), out_dir.display());
        let result = self.dex_to_smali_inner(dex_or_apk, out_dir);
        self.report("dex2smali", result)
    }

    pub(super) fn dex_to_smali_inner(&self, dex_or_apk: &Path, out_dir: &Path) -> Result<()> {
        require_file(dex_or_apk)?;

        let jobs = disassembly_jobs(self.toolchain.max_jobs());
        tracing::debug!("baksmali with {jobs} job(s)");
        let invocation = self
            .toolchain
            .java_jar(Tool::Baksmali)?
            .arg("d")
            .arg("-a")
            .arg(self.toolchain.api_level().to_string())
            .arg("-j")
            .arg(jobs.to_string())
            .arg("-o")
            .arg(out_dir)
            .arg(dex_or_apk);

        ensure_dir(out_dir)?;
        self.execute(&invocation)?;
        Ok(())
    }

    /// Convert a class directory (or jar) to smali by way of a scratch DEX.
    ///
    /// The scratch DEX lives in a uniquely named directory beside
    /// `class_src` and is removed whether or not either stage succeeds.
    pub fn class_to_smali(&self, class_src: &Path, out_dir: &Path) -> Result<()> {
        tracing::info!("class2smali: {} → {}", class_src.display(), out_dir.display());
        let result = self.class_to_smali_inner(class_src, out_dir);
        self.report("class2smali", result)
    }

    fn class_to_smali_inner(&self, class_src: &Path, out_dir: &Path) -> Result<()> {
        require_exists(class_src)?;

        let scratch = scratch_dir_beside(class_src)?;
        let dex = scratch.path().join(SCRATCH_DEX);

        let result = self
            .class_to_dex_inner(class_src, &dex)
            .and_then(|()| self.dex_to_smali_inner(&dex, out_dir));

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove scratch directory: {e}");
        }
        result
    }

    /// Convert a jar to smali. Directories are rejected; use
    /// [`Converter::class_to_smali`] for those.
    pub fn jar_to_smali(&self, jar: &Path, out_dir: &Path) -> Result<()> {
        tracing::info!("jar2smali: {} → {}", jar.display(), out_dir.display());
        let result = require_file(jar).and_then(|()| self.class_to_smali_inner(jar, out_dir));
        self.report("jar2smali", result)
    }

    /// Assemble smali sources into a DEX.
    ///
    /// `smali_src` is either a directory tree of `.smali` files or a ZIP
    /// archive of one, which is unpacked into a scratch directory first.
    pub fn smali_to_dex(&self, smali_src: &Path, out_dex: &Path) -> Result<()> {
        tracing::info!("smali2dex: {} → {}", smali_src.display(), out_dex.display());
        let result = self.smali_to_dex_inner(smali_src, out_dex);
        self.report("smali2dex", result)
    }

    fn smali_to_dex_inner(&self, smali_src: &Path, out_dex: &Path) -> Result<()> {
        require_exists(smali_src)?;
        clear_output(out_dex)?;
        let invocation = self
            .toolchain
            .java_jar(Tool::Smali)?
            .arg("a")
            .arg("-a")
            .arg(self.toolchain.api_level().to_string())
            .arg("-o")
            .arg(out_dex);

        if smali_src.is_dir() {
            return self.produce_file(&invocation.arg(smali_src), out_dex);
        }

        let scratch = scratch_dir_beside(smali_src)?;
        extract_archive(smali_src, scratch.path()).map_err(|e| {
            tracing::warn!("{} is neither a directory nor a readable archive", smali_src.display());
            match e {
                Error::Zip(_) => Error::NotADirectory {
                    path: smali_src.to_path_buf(),
                },
                other => other,
            }
        })?;
        let result = self.produce_file(&invocation.arg(scratch.path()), out_dex);

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove scratch directory: {e}");
        }
        result
    }
}
