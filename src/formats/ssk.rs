//! SSK skeleton loader (SSK-LOADER).

use crate::bytes::ByteReader;
use crate::error::Result;

const BONE_TAG_SIZE: usize = 32;
const TRANSFORM_FLOATS: usize = 21;
const BONE_PADDING: usize = 96;

/// One bone: name, partial local transform, and child bone indices.
///
/// Invariant: every index in `children` refers to a bone appearing later in
/// [`Skeleton::bones`]; the first bone is the root.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub index: u32,
    /// 21 floats of a partial 4x4 affine matrix; `transform[0..3]` is the
    /// translation used as the glTF node translation.
    pub transform: [f32; TRANSFORM_FLOATS],
    pub children: Vec<u32>,
}

impl Bone {
    #[must_use]
    pub fn translation(&self) -> [f32; 3] {
        [self.transform[0], self.transform[1], self.transform[2]]
    }
}

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,
    pub bones: Vec<Bone>,
}

/// Parse a skeleton blob into an ordered, root-first bone list.
///
/// # Errors
/// Returns [`crate::error::Error::Truncated`] on any short read.
pub fn load(data: &[u8]) -> Result<Skeleton> {
    let mut r = ByteReader::new(data);

    // Header is 5 leading u32s followed by the 32-byte skeleton name; the
    // third field is the bone count (design decision, §DESIGN.md: SSK-LOADER).
    r.skip("skeleton header fields 0-1", 4 * 2)?;
    let nbones = r.u32("skeleton bone count")? as usize;
    r.skip("skeleton header fields 3-4", 4 * 2)?;
    let name = r.fixed_ascii("skeleton name", 32)?;

    let mut bones = Vec::with_capacity(nbones);
    let mut child_counts = Vec::with_capacity(nbones);

    for _ in 0..nbones {
        let tag = r.fixed_ascii("bone tag", BONE_TAG_SIZE)?;
        let index = r.u32("bone index")?;
        let mut transform = [0.0f32; TRANSFORM_FLOATS];
        for slot in &mut transform {
            *slot = r.f32("bone transform")?;
        }
        r.skip("bone padding", BONE_PADDING)?;
        let nchildren = r.u32("bone child count")?;
        r.skip("bone reserved", 4)?;

        child_counts.push(nchildren as usize);
        bones.push(Bone {
            name: tag,
            index,
            transform,
            children: Vec::new(),
        });
    }

    let total_children: usize = if nbones == 0 { 0 } else { nbones - 1 };
    let flat = r.u32_array("bone hierarchy list", total_children)?;

    let mut cursor = 0;
    for (bone, &count) in bones.iter_mut().zip(child_counts.iter()) {
        bone.children = flat[cursor..cursor + count].to_vec();
        cursor += count;
    }

    Ok(Skeleton { name, bones })
}
