//! `ApkForge` CLI - Command-line interface for the Android conversion toolchain

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apkforge", version)]
#[command(about = "ApkForge: apktool, smali, dex2jar and jarsigner behind one interface", long_about = None)]
struct Cli {
    /// Toolchain configuration file (defaults to $APKFORGE_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log filter, e.g. `info` or `apkforge=debug`
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `ApkForge` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    cli.command.execute(cli.config.as_deref(), cli.quiet)?;

    Ok(())
}
