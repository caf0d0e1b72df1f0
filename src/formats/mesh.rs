//! SCF/SMF mesh parsing, the data half of MESH-TRANSCODER.
//!
//! glTF accessor/bufferView emission for a parsed [`MeshData`] lives in
//! [`crate::gltf::builder`]; this module only turns the binary blob into
//! structured vertex/strip data.

use crate::bytes::ByteReader;
use crate::error::Result;

/// One triangle strip: a material slot, its raw index list, and per-index
/// UV coordinates (already truncated to `nelem`, not the 8-aligned padded
/// length the source stores).
#[derive(Debug, Clone)]
pub struct Strip {
    pub material_slot: u16,
    pub flags: u16,
    pub indices: Vec<u32>,
    pub uvs: Vec<[f32; 2]>,
}

impl Strip {
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub nverts: usize,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub strips: Vec<Strip>,
}

fn aligned8(n: usize) -> usize {
    (n + 7) & !7
}

/// Parse a mesh blob into vertex and strip data.
///
/// # Errors
/// Returns [`crate::error::Error::Truncated`] on any short read.
pub fn load(data: &[u8]) -> Result<MeshData> {
    let mut r = ByteReader::new(data);

    // Header is 15 leading u32s; field 0 is vertex count, field 1 is strip
    // count (design decision, see DESIGN.md: MESH-TRANSCODER).
    let nverts = r.u32("mesh vertex count")? as usize;
    let count = r.u32("mesh strip count")? as usize;
    r.skip("mesh header fields 2-14", 4 * 13)?;

    r.skip("mesh unknown block", 4 * 54)?;
    let name = r.fixed_ascii("mesh name", 32)?;
    r.skip("mesh unknown trailer", 4 * 13)?;

    let mut positions = Vec::with_capacity(nverts);
    for _ in 0..nverts {
        let v = r.f32_array("vertex position", 4)?;
        positions.push([v[0], v[1], v[2]]);
    }

    let mut normals = Vec::with_capacity(nverts);
    for _ in 0..nverts {
        let v = r.f32_array("vertex normal", 4)?;
        normals.push([v[0], v[1], v[2]]);
    }

    r.skip("per-vertex unknown data", nverts * 12 + count * 4)?;

    let mut strips = Vec::with_capacity(count);
    for _ in 0..count {
        r.skip("strip header field 0", 4)?;
        let material_slot = r.u16("strip material slot")?;
        let flags = r.u16("strip flags")?;
        let nelem = r.u32("strip element count")? as usize;
        let aligned = aligned8(nelem);

        let raw_indices = r.u32_array("strip indices", aligned)?;
        let indices = raw_indices[..nelem].to_vec();

        let raw_uv = r.f32_array("strip uvs", 2 * aligned)?;
        let uvs = raw_uv[..2 * nelem]
            .chunks_exact(2)
            .map(|c| [c[0], c[1]])
            .collect();

        strips.push(Strip {
            material_slot,
            flags,
            indices,
            uvs,
        });
    }

    Ok(MeshData {
        name,
        nverts,
        positions,
        normals,
        strips,
    })
}
