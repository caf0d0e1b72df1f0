//! SMT material loader (SMT-LOADER).

use crate::bytes::ByteReader;
use crate::error::Error;

/// Four vec3 colour parameters associated with one material slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialParams {
    pub flag: u32,
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub ambient: [f32; 3],
    pub emissive: [f32; 3],
}

/// A parsed material: one texture tag and parameter set per slot.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub tags: Vec<String>,
    pub params: Vec<MaterialParams>,
}

const MIN_LEN: usize = 120;

/// Parse a material blob. Files shorter than 120 bytes yield a placeholder
/// material named `ERROR` rather than propagating, matching the malformed
/// material recovery rule; callers that want to observe the failure should
/// check the length themselves before calling, or match on the returned
/// [`Error::MalformedMaterial`] from [`load`].
pub fn load(data: &[u8]) -> Result<Material, Error> {
    if data.len() < MIN_LEN {
        return Err(Error::MalformedMaterial { len: data.len() });
    }

    let mut r = ByteReader::new(data);
    let name = r.fixed_ascii("material name", 32)?;
    let count = r.u32("material param count")? as usize;

    let mut params = Vec::with_capacity(count);
    for _ in 0..count {
        let flag = r.u32("material flag")?;
        let diffuse = r.f32_array("diffuse", 3)?;
        let specular = r.f32_array("specular", 3)?;
        let ambient = r.f32_array("ambient", 3)?;
        let emissive = r.f32_array("emissive", 3)?;
        params.push(MaterialParams {
            flag,
            diffuse: [diffuse[0], diffuse[1], diffuse[2]],
            specular: [specular[0], specular[1], specular[2]],
            ambient: [ambient[0], ambient[1], ambient[2]],
            emissive: [emissive[0], emissive[1], emissive[2]],
        });
    }

    let mut tags = Vec::with_capacity(count);
    for _ in 0..count {
        tags.push(r.fixed_ascii("texture tag", 32)?);
    }

    Ok(Material { name, tags, params })
}

/// A placeholder material emitted when [`load`] reports
/// [`Error::MalformedMaterial`], so the pipeline can continue.
#[must_use]
pub fn placeholder() -> Material {
    Material {
        name: "ERROR".to_string(),
        tags: Vec::new(),
        params: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_fixed_ascii(buf: &mut Vec<u8>, s: &str, size: usize) {
        let mut field = vec![0u8; size];
        field[..s.len()].copy_from_slice(s.as_bytes());
        buf.extend_from_slice(&field);
    }

    #[test]
    fn round_trips_tag_and_param_counts() {
        let mut data = Vec::new();
        push_fixed_ascii(&mut data, "mat1", 32);
        data.extend_from_slice(&2u32.to_le_bytes());
        for _ in 0..2 {
            data.extend_from_slice(&0u32.to_le_bytes());
            data.extend(std::iter::repeat(0.0f32.to_le_bytes()).take(12).flatten());
        }
        push_fixed_ascii(&mut data, "tex_a", 32);
        push_fixed_ascii(&mut data, "tex_b", 32);

        let material = load(&data).unwrap();
        assert_eq!(material.tags.len(), 2);
        assert_eq!(material.params.len(), 2);
        assert_eq!(material.tags, vec!["tex_a", "tex_b"]);
    }

    #[test]
    fn too_short_is_malformed() {
        let data = vec![0u8; 50];
        assert!(matches!(load(&data), Err(Error::MalformedMaterial { len: 50 })));
    }
}
