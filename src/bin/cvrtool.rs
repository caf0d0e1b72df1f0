fn main() -> anyhow::Result<()> {
    cvrtool::cli::run_cli()
}
