//! Skeleton emission for [`GltfBuilder`]: ACTOR-ASSEMBLER's node-graph half.

use crate::formats::ssk::Skeleton;

use super::builder::GltfBuilder;
use super::types::{GltfNode, GltfSkin};

/// Result of adding a skeleton's bone nodes and skin to the document.
pub struct SkeletonResult {
    pub skin_idx: usize,
    /// Node index of bone 0; bone `i` is always at `bone_node_offset + i`.
    pub bone_node_offset: usize,
}

impl GltfBuilder {
    /// Add a skeleton's bones as nodes (root-first, per the source's own
    /// ordering — no reordering needed) and bind an identity-matrix skin.
    pub fn add_skeleton(&mut self, skeleton: &Skeleton) -> SkeletonResult {
        let bone_node_offset = self.nodes.len();

        for bone in &skeleton.bones {
            let children = bone.children.iter().map(|&c| bone_node_offset + c as usize).collect();
            self.nodes.push(GltfNode {
                name: Some(bone.name.clone()),
                mesh: None,
                skin: None,
                children,
                translation: Some(bone.translation()),
                rotation: None,
                scale: None,
            });
        }

        let ibm_idx = self.add_identity_inverse_bind_matrices(skeleton.bones.len());
        let joints = (0..skeleton.bones.len()).map(|i| bone_node_offset + i).collect();

        let skin_idx = self.skins.len();
        self.skins.push(GltfSkin {
            name: Some(skeleton.name.clone()),
            inverse_bind_matrices: Some(ibm_idx),
            joints,
            skeleton: Some(bone_node_offset),
        });

        SkeletonResult { skin_idx, bone_node_offset }
    }
}
