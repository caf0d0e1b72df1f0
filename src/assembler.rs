//! ACTOR-ASSEMBLER: combines a skeleton, its skin, a character mesh, and one
//! animation into a single glTF document; and the degenerate case of a
//! standalone mesh with no skeleton at all.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::formats::mesh::{self, Strip};
use crate::formats::smt::{self, Material};
use crate::formats::{anim, ssk, ssn};
use crate::gltf::mesh::SkinAttributes;
use crate::gltf::{GltfBuilder, GltfDocument};
use crate::scripts::Actor;
use crate::symbols::SymbolIndex;

/// Load the material for `symbol` (shared across a character's skeleton,
/// skin, and mesh files in this format family), falling back to the
/// placeholder the malformed-material recovery rule calls for.
fn resolve_material(symbol: &str, idx: &SymbolIndex) -> Material {
    match idx.materials_by_stem.get(symbol) {
        Some(bytes) => smt::load(bytes).unwrap_or_else(|_| smt::placeholder()),
        None => smt::placeholder(),
    }
}

/// Resolve each strip's material slot to a glTF material index, adding one
/// material per distinct slot actually used.
fn resolve_strip_materials(builder: &mut GltfBuilder, strips: &[Strip], material: &Material) -> Vec<Option<usize>> {
    let mut cache: HashMap<usize, usize> = HashMap::new();
    strips
        .iter()
        .map(|strip| {
            let slot = strip.material_slot as usize;
            material.tags.get(slot).map(|tag| *cache.entry(slot).or_insert_with(|| builder.add_external_material(tag, tag)))
        })
        .collect()
}

/// Flatten an SSN skin binding into per-vertex joint/weight arrays, in the
/// same vertex order MESH-TRANSCODER assumes: every simple binding's run
/// followed by every multiplexed vertex, in file order.
fn flatten_skin_attributes(binding: &ssn::SkinBinding) -> SkinAttributes {
    let mut joints = Vec::new();
    let mut weights = Vec::new();

    for b in &binding.simple {
        for _ in 0..b.vertex_count {
            joints.push([b.bone, 0, 0, 0]);
            weights.push([1.0, 0.0, 0.0, 0.0]);
        }
    }
    for m in &binding.multiplex {
        for _ in 0..m.count {
            joints.push([m.bones[0], m.bones[1], m.bones[2], 0]);
            weights.push([m.weights[0], m.weights[1], m.weights[2], 0.0]);
        }
    }

    SkinAttributes { joints, weights }
}

/// Transcode a standalone SMF/SCF mesh (no matching skeleton symbol) into
/// its own glTF document, landing under `smf/` per the output tree.
///
/// # Errors
/// Propagates a format error from the mesh parse.
pub fn transcode_standalone_mesh(symbol: &str, mesh_bytes: &[u8], idx: &SymbolIndex) -> Result<(GltfDocument, Vec<u8>)> {
    let mesh_data = mesh::load(mesh_bytes)?;
    let material = resolve_material(symbol, idx);

    let mut builder = GltfBuilder::new();
    let strip_materials = resolve_strip_materials(&mut builder, &mesh_data.strips, &material);
    builder.add_transcoded_mesh(&mesh_data, None, &strip_materials);

    Ok(builder.finish(&format!("{symbol}.bin")))
}

/// Assemble one `<actor>_<animation>` glTF: skeleton nodes, the skinned
/// character mesh, and one animation's channels bound to those nodes.
///
/// # Errors
/// Returns [`Error::UnknownSymbol`] if the actor's skeleton, mesh, or the
/// named animation isn't indexed, and [`Error::SkeletonMismatch`] if the
/// animation's implied bone count doesn't match the skeleton.
pub fn assemble_actor_animation(actor: &Actor, anim_symbol: &str, idx: &SymbolIndex) -> Result<(GltfDocument, Vec<u8>)> {
    let skeleton_bytes = idx
        .skeletons
        .get(&actor.skeleton_symbol)
        .ok_or_else(|| Error::UnknownSymbol { kind: "skeleton", symbol: actor.skeleton_symbol.clone() })?;
    let skeleton = ssk::load(skeleton_bytes)?;

    let anim_bytes = idx
        .animations_by_stem
        .get(anim_symbol)
        .ok_or_else(|| Error::UnknownSymbol { kind: "animation", symbol: anim_symbol.to_string() })?;
    let clip = anim::load(anim_bytes)?;
    if clip.expected_bones != skeleton.bones.len() {
        return Err(Error::SkeletonMismatch { expected: clip.expected_bones, found: skeleton.bones.len() });
    }

    let mesh_bytes = idx
        .meshes
        .get(&actor.skeleton_symbol)
        .ok_or_else(|| Error::UnknownSymbol { kind: "mesh", symbol: actor.skeleton_symbol.clone() })?;
    let mesh_data = mesh::load(mesh_bytes)?;

    let mut builder = GltfBuilder::new();
    let skel_result = builder.add_skeleton(&skeleton);
    builder.add_transcoded_animation(&clip, skel_result.bone_node_offset, anim_symbol);

    let skin_attrs =
        idx.skins.get(&actor.skeleton_symbol).map(|bytes| ssn::load(bytes)).transpose()?.map(|binding| flatten_skin_attributes(&binding));

    let material = resolve_material(&actor.skeleton_symbol, idx);
    let strip_materials = resolve_strip_materials(&mut builder, &mesh_data.strips, &material);
    let skin_arg = skin_attrs.as_ref().map(|attrs| (skel_result.skin_idx, attrs));
    builder.add_transcoded_mesh(&mesh_data, skin_arg, &strip_materials);

    let bin_name = format!("{}_{anim_symbol}.bin", actor.tag);
    Ok(builder.finish(&bin_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::Actor;

    fn push_fixed_ascii(buf: &mut Vec<u8>, s: &str, size: usize) {
        let mut field = vec![0u8; size];
        field[..s.len()].copy_from_slice(s.as_bytes());
        buf.extend_from_slice(&field);
    }

    fn build_skeleton(name: &str, nbones: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&nbones.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        push_fixed_ascii(&mut data, name, 32);
        for i in 0..nbones {
            push_fixed_ascii(&mut data, &format!("bone{i}"), 32);
            data.extend_from_slice(&i.to_le_bytes());
            for _ in 0..21 {
                data.extend_from_slice(&0.0f32.to_le_bytes());
            }
            data.extend(std::iter::repeat(0u8).take(96));
            let nchildren = u32::from(i + 1 < nbones);
            data.extend_from_slice(&nchildren.to_le_bytes());
            data.extend_from_slice(&0u32.to_le_bytes());
        }
        for i in 1..nbones {
            data.extend_from_slice(&i.to_le_bytes());
        }
        data
    }

    fn build_anim(nbones: u32, count: u32) -> Vec<u8> {
        let mut data = Vec::new();
        push_fixed_ascii(&mut data, "anim1", 32);
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&30.0f32.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        let nframes = count + 2;
        let stride = (nbones + 1) * 16;
        for i in 0..nframes {
            data.extend_from_slice(&(i * stride).to_le_bytes());
        }
        for _ in 0..nframes {
            data.extend_from_slice(&0u32.to_le_bytes());
            for _ in 0..nbones {
                for _ in 0..4 {
                    data.extend_from_slice(&0.0f32.to_le_bytes());
                }
            }
            for _ in 0..4 {
                data.extend_from_slice(&0.0f32.to_le_bytes());
            }
        }
        data
    }

    fn build_mesh(name: &str, nverts: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&nverts.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend(std::iter::repeat(0u8).take(4 * 13));
        data.extend(std::iter::repeat(0u8).take(4 * 54));
        push_fixed_ascii(&mut data, name, 32);
        data.extend(std::iter::repeat(0u8).take(4 * 13));
        for _ in 0..nverts {
            for _ in 0..4 {
                data.extend_from_slice(&1.0f32.to_le_bytes());
            }
        }
        for _ in 0..nverts {
            for _ in 0..4 {
                data.extend_from_slice(&0.0f32.to_le_bytes());
            }
        }
        data.extend(std::iter::repeat(0u8).take(nverts as usize * 12));
        data
    }

    #[test]
    fn skeleton_mismatch_is_reported_and_skipped() {
        let mut idx = SymbolIndex::default();
        idx.skeletons.insert("hero".to_string(), build_skeleton("hero", 2));
        idx.animations_by_stem.insert("walk".to_string(), build_anim(3, 4));
        idx.meshes.insert("hero".to_string(), build_mesh("hero", 3));

        let actor = Actor { tag: "hero".to_string(), skeleton_symbol: "hero".to_string(), animset_tag: "set".to_string(), extra: [0; 4] };
        let err = assemble_actor_animation(&actor, "walk", &idx).unwrap_err();
        assert!(matches!(err, Error::SkeletonMismatch { expected: 3, found: 2 }));
    }

    #[test]
    fn matching_bone_counts_assemble_successfully() {
        let mut idx = SymbolIndex::default();
        idx.skeletons.insert("hero".to_string(), build_skeleton("hero", 2));
        idx.animations_by_stem.insert("walk".to_string(), build_anim(2, 4));
        idx.meshes.insert("hero".to_string(), build_mesh("hero", 3));

        let actor = Actor { tag: "hero".to_string(), skeleton_symbol: "hero".to_string(), animset_tag: "set".to_string(), extra: [0; 4] };
        let (doc, _bin) = assemble_actor_animation(&actor, "walk", &idx).unwrap();
        assert_eq!(doc.skins.len(), 1);
        assert_eq!(doc.animations.len(), 1);
    }

    #[test]
    fn unknown_skeleton_symbol_is_reported() {
        let idx = SymbolIndex::default();
        let actor = Actor { tag: "ghost".to_string(), skeleton_symbol: "nope".to_string(), animset_tag: "set".to_string(), extra: [0; 4] };
        assert!(matches!(assemble_actor_animation(&actor, "walk", &idx), Err(Error::UnknownSymbol { .. })));
    }
}
