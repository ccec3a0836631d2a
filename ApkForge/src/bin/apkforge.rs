fn main() -> anyhow::Result<()> {
    apkforge::cli::run_cli()
}
