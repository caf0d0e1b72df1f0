//! # `cvrtool`
//!
//! A pure-Rust library for extracting and converting Castlevania:
//! Resurrection's Dreamcast archive format into modern assets: PowerVR
//! textures to PNG, and the skeleton/skin/mesh/animation quartet to glTF
//! 2.0.
//!
//! ## Supported Formats
//!
//! - **Archive containers** - page-aligned directory/file streams with no
//!   leading entry count
//! - **PowerVR textures** - twiddled and VQ-compressed ARGB1555/RGB565/ARGB4444
//! - **SSK/SSN/SCF·SMF/SAF** - skeletons, skin bindings, meshes, and
//!   animation clips, cross-linked by embedded symbol names
//! - **SMT materials** and the `animsets`/`actors` script pair that tie a
//!   skeleton to its animation clips
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvrtool::driver::{process_archive, OutputSink, ArchiveReport};
//! use std::io::Write;
//!
//! struct StdoutSink;
//! impl OutputSink for StdoutSink {
//!     fn create(&mut self, _relative_path: &str) -> cvrtool::Result<Box<dyn Write>> {
//!         Ok(Box::new(std::io::sink()))
//!     }
//! }
//!
//! let data = std::fs::read("castle.arc")?;
//! let mut sink = StdoutSink;
//! let report: ArchiveReport = process_archive(&data, &mut sink, false)?;
//! println!("textures: {}, actors: {}", report.textures_written, report.actors_written);
//! # Ok::<(), cvrtool::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `cvrtool` command-line binary

pub mod archive;
pub mod assembler;
pub mod bytes;
pub mod driver;
pub mod error;
pub mod formats;
pub mod gltf;
pub mod scripts;
pub mod symbols;
pub mod texture;

pub use error::{Error, Result};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::driver::{ArchiveReport, OutputSink, process_archive, process_archive_file};
    pub use crate::error::{Error, Result};
    pub use crate::formats::{AnimClip, Bone, Material, MeshData, Skeleton, SkinBinding};
    pub use crate::gltf::{GltfBuilder, GltfDocument, write_gltf_pair};
    pub use crate::symbols::SymbolIndex;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "cli")]
pub mod cli;
