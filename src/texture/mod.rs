//! PowerVR texture decoding and PNG output.

pub mod png_writer;
pub mod pvr;

pub use png_writer::write_png;
pub use pvr::{decode, morton, ColorSpace, PixelMatrix};
