//! Error types for cvrtool

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated {what}: needed {needed} bytes, had {available}")]
    Truncated {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("bad magic: expected {expected}, found {found:?}")]
    BadMagic { expected: &'static str, found: String },

    #[error("unsupported PVR encoding: pixel_format {pixel_format:#x}, data_layout {data_layout:#x}")]
    UnsupportedEncoding { pixel_format: u8, data_layout: u8 },

    #[error("invalid PVR dimensions: {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("malformed material: {len} bytes (need at least 120)")]
    MalformedMaterial { len: usize },

    #[error("unknown {kind} symbol: {symbol}")]
    UnknownSymbol { kind: &'static str, symbol: String },

    #[error("skeleton mismatch: animation expects {expected} bones, skeleton has {found}")]
    SkeletonMismatch { expected: usize, found: usize },

    #[error("script parse error at line {line}: {message}")]
    ScriptParse { line: usize, message: String },

    #[error("invalid animation offset table: offset {offset} out of order or exceeds blob length {blob_len}")]
    InvalidAnimationOffsets { offset: u32, blob_len: usize },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
