//! `apkforge tools`: toolchain status
use console::style;

use crate::config::ToolchainConfig;
use crate::toolchain::Toolchain;

pub fn execute(config: &ToolchainConfig, print_config: bool) -> anyhow::Result<()> {
    if print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let toolchain = Toolchain::initialize(config)?;
    println!("API level: {}", toolchain.api_level());
    println!("Max baksmali jobs: {}", toolchain.max_jobs());
    println!();

    let mut missing = 0;
    for entry in toolchain.availability() {
        let mark = if entry.available {
            style("found").green()
        } else {
            missing += 1;
            style("missing").red()
        };
        println!("  {:<10} {:<8} {}", entry.tool.name(), mark, entry.path.display());
    }

    if missing > 0 {
        println!();
        println!("{missing} tool(s) missing; set their paths in the toolchain config (--print-config shows it).");
    }
    Ok(())
}
