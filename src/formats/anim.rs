//! SAF animation loader, the data half of ANIM-TRANSCODER.

use crate::bytes::ByteReader;
use crate::error::{Error, Result};

const EVENTS_FLAG: u32 = 0x02;
const FULL_POSITIONS_FLAG: u32 = 0x10;
const EVENT_RECORD_SIZE: usize = 36;

/// One keyframe: a time tick, one quaternion rotation per bone, and the
/// root translation. If the animation carries a full per-bone position
/// table, `positions` holds one translation per bone for this frame.
#[derive(Debug, Clone)]
pub struct Keyframe {
    pub time: u32,
    pub rotations: Vec<[f32; 4]>,
    pub root_translation: [f32; 3],
    pub positions: Option<Vec<[f32; 3]>>,
}

#[derive(Debug, Clone)]
pub struct AnimClip {
    pub name: String,
    pub flags: u32,
    pub fps: f32,
    /// Bone count implied by the offset table, used by the caller to check
    /// against the target skeleton's bone count before trusting this clip.
    pub expected_bones: usize,
    /// All `count + 2` keyframes including the sentinel first/last frames;
    /// callers drop the sentinels per §4.7 when building glTF samplers.
    pub keyframes: Vec<Keyframe>,
}

impl AnimClip {
    #[must_use]
    pub fn has_full_positions(&self) -> bool {
        self.flags & FULL_POSITIONS_FLAG != 0
    }
}

/// Parse an animation blob.
///
/// # Errors
/// Returns [`crate::error::Error::Truncated`] on any short read, or
/// [`crate::error::Error::InvalidAnimationOffsets`] if the offset table is
/// out of order or points past the end of `data` (used only for bone-count
/// derivation and validation, per §4.7).
pub fn load(data: &[u8]) -> Result<AnimClip> {
    let mut r = ByteReader::new(data);

    let name = r.fixed_ascii("animation name", 32)?;
    let flags = r.u32("animation flags")?;
    let fps = r.f32("animation fps")?;
    r.skip("animation version", 4)?;
    let count = r.u32("animation frame count")? as usize;

    let nframes = count + 2;
    let offsets = r.u32_array("animation offsets", nframes)?;

    let blob_len = data.len();
    for &offset in &offsets {
        if offset as usize > blob_len {
            return Err(Error::InvalidAnimationOffsets { offset, blob_len });
        }
    }
    for pair in offsets.windows(2) {
        if pair[1] < pair[0] {
            return Err(Error::InvalidAnimationOffsets { offset: pair[1], blob_len });
        }
    }

    let expected_bones = if offsets.len() >= 2 {
        ((offsets[1] - offsets[0]) / 16).saturating_sub(1) as usize
    } else {
        0
    };

    let mut keyframes = Vec::with_capacity(nframes);
    for _ in 0..nframes {
        let time = r.u32("keyframe time")?;
        let mut rotations = Vec::with_capacity(expected_bones);
        for _ in 0..expected_bones {
            let q = r.f32_array("keyframe rotation", 4)?;
            rotations.push([q[0], q[1], q[2], q[3]]);
        }
        let t = r.f32_array("keyframe root translation", 4)?;
        keyframes.push(Keyframe {
            time,
            rotations,
            root_translation: [t[0], t[1], t[2]],
            positions: None,
        });
    }

    if flags & EVENTS_FLAG != 0 {
        let nevents = r.u32("event count")? as usize;
        r.skip("event reserved", 4)?;
        r.skip("event records", nevents * EVENT_RECORD_SIZE)?;
    }

    if flags & FULL_POSITIONS_FLAG != 0 {
        for frame in &mut keyframes {
            let mut positions = Vec::with_capacity(expected_bones);
            for _ in 0..expected_bones {
                let p = r.f32_array("keyframe bone position", 4)?;
                positions.push([p[0], p[1], p[2]]);
            }
            frame.positions = Some(positions);
        }
    }

    Ok(AnimClip {
        name,
        flags,
        fps,
        expected_bones,
        keyframes,
    })
}
