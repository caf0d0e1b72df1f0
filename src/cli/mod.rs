//! `cvrtool` CLI - command-line interface for Castlevania: Resurrection
//! archive extraction and conversion.

pub mod progress;
pub mod sink;

use std::path::PathBuf;

use clap::Parser;

use crate::driver::process_archive_file;
use sink::FsSink;

#[derive(Parser)]
#[command(name = "cvrtool")]
#[command(about = "Extract and convert Castlevania: Resurrection asset archives", long_about = None)]
struct Cli {
    /// Archive file(s) to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "contents")]
    prefix: PathBuf,

    /// Write only the raw per-entry dump, skipping texture/mesh/actor conversion
    #[arg(long, overrides_with = "no_raw")]
    raw: bool,

    /// Run the full conversion pipeline (default)
    #[arg(long, overrides_with = "raw")]
    no_raw: bool,
}

/// Run the `cvrtool` CLI.
///
/// # Errors
/// Returns an error if every input archive fails to open; a single bad
/// archive among several is reported as a warning instead.
pub fn run_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let raw_only = cli.raw;

    let mut opened = 0usize;
    for file in &cli.files {
        let pb = progress::simple_spinner(&format!("{}", file.display()));
        let basename = file.file_stem().map_or_else(|| file.display().to_string(), |s| s.to_string_lossy().into_owned());
        let mut sink = FsSink::new(cli.prefix.join(basename));

        match process_archive_file(file, &mut sink, raw_only) {
            Ok(report) => {
                opened += 1;
                pb.finish_with_message(format!(
                    "{}: {} files, {} textures, {} meshes, {} actors, {} warnings",
                    file.display(),
                    report.files,
                    report.textures_written,
                    report.meshes_written,
                    report.actors_written,
                    report.warnings.len()
                ));
                for warning in &report.warnings {
                    tracing::warn!("{warning}");
                }
            }
            Err(e) => {
                pb.finish_with_message(format!("{}: failed to open ({e})", file.display()));
                tracing::error!(file = %file.display(), error = %e, "archive failed");
            }
        }
    }

    if opened == 0 {
        anyhow::bail!("no input archive could be opened");
    }

    Ok(())
}
