//! Shared runner for the conversion subcommands
use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{GEAR, print_done, print_step, simple_spinner};

/// Run one conversion with a spinner, then report where the result went.
pub fn run(
    quiet: bool,
    verb: &str,
    source: &Path,
    destination: &Path,
    op: impl FnOnce() -> crate::Result<()>,
) -> anyhow::Result<()> {
    run_with(quiet, verb, source, op)?;
    report_output(quiet, destination);
    Ok(())
}

/// Run one conversion with a spinner and hand back its value.
pub fn run_with<T>(
    quiet: bool,
    verb: &str,
    source: &Path,
    op: impl FnOnce() -> crate::Result<T>,
) -> anyhow::Result<T> {
    let message = format!("{verb} {}", source.display());
    if quiet {
        return op().with_context(|| format!("{message} failed"));
    }

    let start = Instant::now();
    print_step(1, 1, GEAR, &format!("{message}..."));
    let pb = simple_spinner(&message);
    let result = op();
    pb.finish_and_clear();

    let value = result.with_context(|| format!("{message} failed"))?;
    print_done(start.elapsed());
    Ok(value)
}

/// Print the path a command produced.
pub fn report_output(quiet: bool, path: &Path) {
    if !quiet {
        println!("  → {}", path.display());
    }
}
