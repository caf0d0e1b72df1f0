//! PIPELINE-DRIVER: ties every component into one call per archive,
//! accumulating a warnings report instead of aborting on the first
//! recoverable failure.

use std::io::Write;
use std::path::Path;

use crate::archive::{self, ArchiveEntry};
use crate::assembler;
use crate::error::Result;
use crate::gltf::write_gltf_pair;
use crate::scripts::{self, Actor, AnimSet};
use crate::symbols::{self, SymbolIndex};
use crate::texture;

/// A byte sink the driver writes every output file through. The library
/// never touches `std::fs`; a caller (typically the CLI binary) supplies an
/// implementation that creates directories and opens files as needed.
pub trait OutputSink {
    /// Open a writer for `relative_path` (forward-slash separated, relative
    /// to this archive's output root).
    ///
    /// # Errors
    /// Propagates whatever I/O failure prevented opening the sink.
    fn create(&mut self, relative_path: &str) -> Result<Box<dyn Write>>;
}

/// Per-archive counts and the non-fatal warnings accumulated along the way.
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    pub directories: usize,
    pub files: usize,
    pub textures_written: usize,
    pub meshes_written: usize,
    pub actors_written: usize,
    pub warnings: Vec<String>,
}

fn stem(file_name: &str) -> &str {
    file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem)
}

/// Read `path` and process it as one archive.
///
/// # Errors
/// Propagates the I/O failure if `path` can't be read, or a fatal
/// [`crate::error::Error::Truncated`] if the archive's header stream is
/// corrupt (see [`archive::read_entries`]).
pub fn process_archive_file(path: &Path, sink: &mut dyn OutputSink, raw_only: bool) -> Result<ArchiveReport> {
    let data = std::fs::read(path)?;
    process_archive(&data, sink, raw_only)
}

/// Process one archive already read into memory.
///
/// # Errors
/// Propagates only the fatal case from [`archive::read_entries`]: a stream
/// truncated mid-directory-header. Every other failure (bad texture,
/// unresolved actor, malformed material, ...) is caught locally and folded
/// into `ArchiveReport::warnings`.
pub fn process_archive(data: &[u8], sink: &mut dyn OutputSink, raw_only: bool) -> Result<ArchiveReport> {
    let entries = archive::read_entries(data)?;
    let mut report = ArchiveReport::default();

    persist_and_decode(&entries, sink, raw_only, &mut report);

    if raw_only {
        return Ok(report);
    }

    let symbol_index = symbols::index(&entries);
    transcode_standalone_meshes(&symbol_index, sink, &mut report);
    assemble_actors(&symbol_index, sink, &mut report);

    Ok(report)
}

fn persist_and_decode(entries: &[ArchiveEntry], sink: &mut dyn OutputSink, raw_only: bool, report: &mut ArchiveReport) {
    let mut directories = std::collections::HashSet::new();

    for entry in entries {
        directories.insert(entry.directory.clone());
        report.files += 1;

        let raw_path = format!("{}/{}", entry.directory, entry.file_name);
        match sink.create(&raw_path) {
            Ok(mut w) => {
                if let Err(e) = w.write_all(&entry.payload) {
                    report.warnings.push(format!("{raw_path}: {e}"));
                }
            }
            Err(e) => report.warnings.push(format!("{raw_path}: {e}")),
        }

        if raw_only || entry.directory != "textures" {
            continue;
        }

        tracing::debug!(file = %entry.file_name, "decoding texture");
        match texture::decode(&entry.payload) {
            Ok(matrix) => {
                let png_path = format!("textures/{}.png", stem(&entry.file_name));
                match sink.create(&png_path) {
                    Ok(mut w) => match texture::write_png(&matrix, &mut w) {
                        Ok(()) => report.textures_written += 1,
                        Err(e) => report.warnings.push(format!("{png_path}: {e}")),
                    },
                    Err(e) => report.warnings.push(format!("{png_path}: {e}")),
                }
            }
            Err(e) => report.warnings.push(format!("{}: {e}", entry.file_name)),
        }
    }

    report.directories = directories.len();
}

fn transcode_standalone_meshes(idx: &SymbolIndex, sink: &mut dyn OutputSink, report: &mut ArchiveReport) {
    for (symbol, payload) in &idx.meshes {
        if idx.skeletons.contains_key(symbol) {
            continue; // rigged; handled via actor assembly instead
        }

        tracing::debug!(symbol = %symbol, "transcoding standalone mesh");
        match assembler::transcode_standalone_mesh(symbol, payload, idx) {
            Ok((document, buffer)) => {
                if write_pair(sink, &format!("smf/{symbol}.gltf"), &format!("smf/{symbol}.bin"), &document, &buffer, report) {
                    report.meshes_written += 1;
                }
            }
            Err(e) => report.warnings.push(format!("mesh {symbol}: {e}")),
        }
    }
}

fn parse_scripts(idx: &SymbolIndex, report: &mut ArchiveReport) -> (Vec<AnimSet>, Vec<Actor>) {
    let mut animsets = Vec::new();
    for bytes in &idx.animset_scripts {
        let text = String::from_utf8_lossy(bytes);
        match scripts::parse_animsets(&text) {
            Ok(sets) => animsets.extend(sets),
            Err(e) => report.warnings.push(format!("animset script: {e}")),
        }
    }

    let mut actors = Vec::new();
    for bytes in &idx.actor_scripts {
        let text = String::from_utf8_lossy(bytes);
        match scripts::parse_actors(&text) {
            Ok(parsed) => actors.extend(parsed),
            Err(e) => report.warnings.push(format!("actor script: {e}")),
        }
    }

    (animsets, actors)
}

fn assemble_actors(idx: &SymbolIndex, sink: &mut dyn OutputSink, report: &mut ArchiveReport) {
    let (animsets, actors) = parse_scripts(idx, report);

    for actor in &actors {
        let Some(animset) = animsets.iter().find(|a| a.tag == actor.animset_tag) else {
            report.warnings.push(format!("actor {}: unknown animset {}", actor.tag, actor.animset_tag));
            continue;
        };

        for anim_symbol in &animset.animations {
            tracing::debug!(actor = %actor.tag, animation = %anim_symbol, "assembling actor animation");
            match assembler::assemble_actor_animation(actor, anim_symbol, idx) {
                Ok((document, buffer)) => {
                    let gltf_path = format!("actors/{}_{anim_symbol}.gltf", actor.tag);
                    let bin_path = format!("actors/{}_{anim_symbol}.bin", actor.tag);
                    if write_pair(sink, &gltf_path, &bin_path, &document, &buffer, report) {
                        report.actors_written += 1;
                        tracing::info!(actor = %actor.tag, animation = %anim_symbol, "emitted actor animation");
                    }
                }
                Err(e) => report.warnings.push(format!("actor {}/{anim_symbol}: {e}", actor.tag)),
            }
        }
    }
}

fn write_pair(
    sink: &mut dyn OutputSink,
    gltf_path: &str,
    bin_path: &str,
    document: &crate::gltf::GltfDocument,
    buffer: &[u8],
    report: &mut ArchiveReport,
) -> bool {
    let (mut gltf_sink, mut bin_sink) = match (sink.create(gltf_path), sink.create(bin_path)) {
        (Ok(g), Ok(b)) => (g, b),
        (Err(e), _) | (_, Err(e)) => {
            report.warnings.push(format!("{gltf_path}: {e}"));
            return false;
        }
    };

    match write_gltf_pair(document, buffer, &mut gltf_sink, &mut bin_sink) {
        Ok(()) => true,
        Err(e) => {
            report.warnings.push(format!("{gltf_path}: {e}"));
            false
        }
    }
}
