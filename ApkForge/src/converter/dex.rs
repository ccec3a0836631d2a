//! dx: class files → DEX

use std::ffi::OsString;
use std::path::Path;

use super::{Converter, clear_output};
use crate::error::Result;
use crate::toolchain::{DX_MAIN, Tool};
use crate::utils::path::require_exists;

impl Converter<'_> {
    /// Compile a class directory (or a jar of classes) into a single DEX.
    ///
    /// Name checking is non-strict, so classes whose package does not match
    /// their directory are still accepted. The parent of `out_dex` is created
    /// when missing.
    pub fn class_to_dex(&self, class_src: &Path, out_dex: &Path) -> Result<()> {
        tracing::info!("class2dex: {} → {}", class_src.display(), out_dex.display());
        let result = self.class_to_dex_inner(class_src, out_dex);
        self.report("class2dex", result)
    }

    pub(super) fn class_to_dex_inner(&self, class_src: &Path, out_dex: &Path) -> Result<()> {
        require_exists(class_src)?;
        clear_output(out_dex)?;

        let mut output_arg = OsString::from("--output=");
        output_arg.push(out_dex);

        let invocation = self
            .toolchain
            .java_main(Tool::Dx, DX_MAIN)?
            .args(["--dex", "--no-strict"])
            .arg(output_arg)
            .arg(class_src);
        self.produce_file(&invocation, out_dex)
    }
}
