//! SSN skin-binding loader (SSN-LOADER).

use crate::bytes::ByteReader;
use crate::error::Result;

/// A contiguous run of vertices bound to a single bone.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub bone: u32,
    pub vertex_count: u32,
    pub vertex_offset: u32,
}

/// A blended vertex bound to up to three bones.
#[derive(Debug, Clone, Copy)]
pub struct Multiplex {
    pub count: u32,
    pub bones: [u32; 3],
    pub weights: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct SkinBinding {
    pub name: String,
    pub simple: Vec<Binding>,
    pub multiplex: Vec<Multiplex>,
}

const MULTIPLEX_PADDING: usize = 64;

/// Parse a skin blob into its simple and multiplexed bindings.
///
/// # Errors
/// Returns [`crate::error::Error::Truncated`] on any short read.
pub fn load(data: &[u8]) -> Result<SkinBinding> {
    let mut r = ByteReader::new(data);

    // Header is 7 leading u32s followed by the 32-byte skin name; fields 3
    // and 4 are the simple and multiplexed binding counts.
    r.skip("skin header fields 0-2", 4 * 3)?;
    let count = r.u32("skin binding count")? as usize;
    let multiplexed = r.u32("skin multiplex count")? as usize;
    r.skip("skin header fields 5-6", 4 * 2)?;
    let name = r.fixed_ascii("skin name", 32)?;

    let mut simple = Vec::with_capacity(count);
    for _ in 0..count {
        simple.push(Binding {
            bone: r.u32("binding bone")?,
            vertex_count: r.u32("binding vertex count")?,
            vertex_offset: r.u32("binding vertex offset")?,
        });
    }

    let mut multiplex = Vec::with_capacity(multiplexed);
    for _ in 0..multiplexed {
        let count = r.u32("multiplex count")?;
        let bones = [r.u32("multiplex bone")?, r.u32("multiplex bone")?, r.u32("multiplex bone")?];
        let weights = [r.f32("multiplex weight")?, r.f32("multiplex weight")?, r.f32("multiplex weight")?];
        r.skip("multiplex unused offsets", MULTIPLEX_PADDING)?;
        multiplex.push(Multiplex { count, bones, weights });
    }

    Ok(SkinBinding { name, simple, multiplex })
}
