//! SYMBOL-INDEXER: first pass over archive entries.
//!
//! Builds symbol -> payload maps for skeleton, skin, and character-mesh
//! files by peeking the embedded symbolic name at each format's known
//! offset, without fully parsing the record. Animation and material blobs
//! are resolved by archive filename stem instead, since they carry no
//! equivalent embedded symbol in this format family. Script files are
//! captured verbatim by filename suffix.

use std::collections::HashMap;

use crate::archive::ArchiveEntry;
use crate::bytes::ByteReader;

const SSK_SYMBOL_OFFSET: usize = 4 * 5;
const SSN_SYMBOL_OFFSET: usize = 4 * 7;
const MESH_SYMBOL_OFFSET: usize = 4 * 15 + 4 * 54;
const SYMBOL_SIZE: usize = 32;

fn peek_symbol(payload: &[u8], offset: usize) -> Option<String> {
    if payload.len() < offset + SYMBOL_SIZE {
        return None;
    }
    let mut r = ByteReader::new(payload);
    r.seek(offset as u64);
    r.fixed_ascii("symbol", SYMBOL_SIZE).ok()
}

fn stem(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
        .to_string()
}

/// Process-wide lookup tables populated during the archive-scan phase and
/// read thereafter; threaded explicitly as a context value rather than kept
/// as global state.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    pub skeletons: HashMap<String, Vec<u8>>,
    pub skins: HashMap<String, Vec<u8>>,
    pub meshes: HashMap<String, Vec<u8>>,
    pub animations_by_stem: HashMap<String, Vec<u8>>,
    pub materials_by_stem: HashMap<String, Vec<u8>>,
    pub animset_scripts: Vec<Vec<u8>>,
    pub actor_scripts: Vec<Vec<u8>>,
}

/// Build a [`SymbolIndex`] from a full set of archive entries.
#[must_use]
pub fn index(entries: &[ArchiveEntry]) -> SymbolIndex {
    let mut idx = SymbolIndex::default();

    for entry in entries {
        let name = entry.file_name.as_str();

        if name.ends_with("_animsets.txt") {
            idx.animset_scripts.push(entry.payload.clone());
            continue;
        }
        if name.ends_with("_actors.txt") {
            idx.actor_scripts.push(entry.payload.clone());
            continue;
        }

        if name.ends_with(".ssk") {
            if let Some(symbol) = peek_symbol(&entry.payload, SSK_SYMBOL_OFFSET) {
                idx.skeletons.insert(symbol, entry.payload.clone());
            } else {
                tracing::warn!(file = name, "skeleton too short to peek symbol");
            }
        } else if name.ends_with(".ssn") {
            if let Some(symbol) = peek_symbol(&entry.payload, SSN_SYMBOL_OFFSET) {
                idx.skins.insert(symbol, entry.payload.clone());
            } else {
                tracing::warn!(file = name, "skin too short to peek symbol");
            }
        } else if name.ends_with(".scf") || name.ends_with(".smf") {
            if let Some(symbol) = peek_symbol(&entry.payload, MESH_SYMBOL_OFFSET) {
                idx.meshes.insert(symbol, entry.payload.clone());
            } else {
                tracing::warn!(file = name, "mesh too short to peek symbol");
            }
        } else if name.ends_with(".saf") {
            idx.animations_by_stem.insert(stem(name), entry.payload.clone());
        } else if name.ends_with(".smt") {
            idx.materials_by_stem.insert(stem(name), entry.payload.clone());
        }
    }

    idx
}
