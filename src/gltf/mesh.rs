//! Mesh emission for [`GltfBuilder`]: MESH-TRANSCODER's glTF-side half.

use std::collections::HashMap;

use crate::formats::mesh::MeshData;

use super::builder::GltfBuilder;
use super::types::{GltfMesh, GltfNode, GltfPrimitive};

/// Rotation applied to the mesh node to fix coordinate handedness.
const HANDEDNESS_FIX: [f32; 4] = [0.5, 0.5, -0.5, 0.5];

/// Per-vertex joint/weight attributes, already flattened from an SSN
/// skin-binding by the caller (see `crate::assembler`).
pub struct SkinAttributes {
    pub joints: Vec<[u32; 4]>,
    pub weights: Vec<[f32; 4]>,
}

impl GltfBuilder {
    /// Add a transcoded mesh. `strip_materials[i]` is the material index for
    /// `mesh.strips[i]`, or `None` if the strip's slot has no resolved tag.
    /// Returns the node index.
    pub fn add_transcoded_mesh(
        &mut self,
        mesh: &MeshData,
        skin: Option<(usize, &SkinAttributes)>,
        strip_materials: &[Option<usize>],
    ) -> usize {
        let pos_idx = self.add_positions(&mesh.positions);
        let norm_idx = self.add_normals(&mesh.normals);

        let (joints_idx, weights_idx) = match skin {
            Some((_, attrs)) => (Some(self.add_joints_u32(&attrs.joints)), Some(self.add_weights_f32(&attrs.weights))),
            None => (None, None),
        };

        let mut primitives = Vec::with_capacity(mesh.strips.len());
        for (strip, material) in mesh.strips.iter().zip(strip_materials) {
            let (indices_idx, indices_bv) = self.add_strip_indices(&strip.indices);
            let uv_idx = self.add_sparse_strip_uvs(mesh.nverts, indices_bv, &strip.uvs);

            let mut attributes = HashMap::new();
            attributes.insert("POSITION".to_string(), pos_idx);
            attributes.insert("NORMAL".to_string(), norm_idx);
            attributes.insert("TEXCOORD_0".to_string(), uv_idx);
            if let Some(joints_idx) = joints_idx {
                attributes.insert("JOINTS_0".to_string(), joints_idx);
            }
            if let Some(weights_idx) = weights_idx {
                attributes.insert("WEIGHTS_0".to_string(), weights_idx);
            }

            primitives.push(GltfPrimitive { attributes, indices: Some(indices_idx), material: *material });
        }

        let mesh_idx = self.meshes.len();
        self.meshes.push(GltfMesh { name: Some(mesh.name.clone()), primitives });

        let node_idx = self.nodes.len();
        self.nodes.push(GltfNode {
            name: Some(mesh.name.clone()),
            mesh: Some(mesh_idx),
            skin: skin.map(|(idx, _)| idx),
            children: Vec::new(),
            translation: None,
            rotation: Some(HANDEDNESS_FIX),
            scale: None,
        });

        node_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::mesh::Strip;

    fn sample_mesh() -> MeshData {
        MeshData {
            name: "mesh1".to_string(),
            nverts: 3,
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            strips: vec![Strip {
                material_slot: 0,
                flags: 0,
                indices: vec![0, 1, 2],
                uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            }],
        }
    }

    #[test]
    fn unskinned_mesh_omits_skin_and_joint_attributes() {
        let mesh = sample_mesh();
        let mut builder = GltfBuilder::new();
        let node_idx = builder.add_transcoded_mesh(&mesh, None, &[Some(0)]);
        let node = &builder.nodes[node_idx];
        assert!(node.skin.is_none());
        let prim = &builder.meshes[node.mesh.unwrap()].primitives[0];
        assert!(!prim.attributes.contains_key("JOINTS_0"));
    }

    #[test]
    fn skinned_mesh_adds_joints_and_weights() {
        let mesh = sample_mesh();
        let attrs = SkinAttributes {
            joints: vec![[0, 0, 0, 0]; 3],
            weights: vec![[1.0, 0.0, 0.0, 0.0]; 3],
        };
        let mut builder = GltfBuilder::new();
        let node_idx = builder.add_transcoded_mesh(&mesh, Some((0, &attrs)), &[Some(0)]);
        let node = &builder.nodes[node_idx];
        assert_eq!(node.skin, Some(0));
        let prim = &builder.meshes[node.mesh.unwrap()].primitives[0];
        assert!(prim.attributes.contains_key("JOINTS_0"));
        assert!(prim.attributes.contains_key("WEIGHTS_0"));
    }

    #[test]
    fn sparse_uv_accessor_count_equals_mesh_vertex_count() {
        let mesh = sample_mesh();
        let mut builder = GltfBuilder::new();
        builder.add_transcoded_mesh(&mesh, None, &[Some(0)]);
        let uv_accessor = builder.accessors.iter().find(|a| a.accessor_type == "VEC2").unwrap();
        assert_eq!(uv_accessor.count, 3);
        assert_eq!(uv_accessor.sparse.as_ref().unwrap().count, 3);
    }
}
