//! Final assembly of a [`GltfBuilder`] into a standalone glTF document plus
//! its binary buffer, and the pairing of the two opaque writers (JSON
//! serialization and raw byte output are both delegated; this module only
//! decides what goes where).

use std::collections::HashSet;
use std::io::Write;

use super::builder::GltfBuilder;
use super::types::{GltfAsset, GltfBuffer, GltfDocument, GltfScene};
use crate::error::Result;

impl GltfBuilder {
    /// Finalize the accumulated document, referencing `bin_file_name` as the
    /// sole external buffer's URI. The scene's root nodes are every node
    /// index not claimed as a child by another node.
    #[must_use]
    pub fn finish(mut self, bin_file_name: &str) -> (GltfDocument, Vec<u8>) {
        let mut referenced = HashSet::new();
        for node in &self.nodes {
            referenced.extend(node.children.iter().copied());
        }
        let scene_nodes = (0..self.nodes.len()).filter(|i| !referenced.contains(i)).collect();

        self.buffers.push(GltfBuffer { byte_length: self.buffer.len(), uri: Some(bin_file_name.to_string()) });

        let document = GltfDocument {
            asset: GltfAsset { version: "2.0".to_string(), generator: Some("cvrtool".to_string()) },
            scene: 0,
            scenes: vec![GltfScene { name: None, nodes: scene_nodes }],
            nodes: self.nodes,
            meshes: self.meshes,
            skins: self.skins,
            materials: self.materials,
            textures: self.textures,
            images: self.images,
            samplers: self.samplers,
            animations: self.animations,
            accessors: self.accessors,
            buffer_views: self.buffer_views,
            buffers: self.buffers,
        };

        (document, self.buffer)
    }
}

/// Write a finished document and its binary buffer to their respective
/// sinks, in the order a caller should create them (glTF first, so a reader
/// streaming the pair sees the JSON before the bytes it references).
///
/// # Errors
/// Propagates [`crate::error::Error::Json`] or an I/O failure from either
/// sink.
pub fn write_gltf_pair(document: &GltfDocument, buffer: &[u8], gltf_sink: &mut dyn Write, bin_sink: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(gltf_sink, document)?;
    bin_sink.write_all(buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_nodes_exclude_bone_children() {
        let mut builder = GltfBuilder::new();
        builder.add_skeleton(&crate::formats::ssk::Skeleton {
            name: "skel".to_string(),
            bones: vec![
                crate::formats::ssk::Bone { name: "root".to_string(), index: 0, transform: [0.0; 21], children: vec![1] },
                crate::formats::ssk::Bone { name: "child".to_string(), index: 1, transform: [0.0; 21], children: vec![] },
            ],
        });
        let (doc, _bin) = builder.finish("skel.bin");
        assert_eq!(doc.scenes[0].nodes, vec![0]);
        assert_eq!(doc.buffers[0].uri.as_deref(), Some("skel.bin"));
    }

    #[test]
    fn every_cross_reference_index_is_in_range() {
        let mut builder = GltfBuilder::new();
        let mesh = crate::formats::mesh::MeshData {
            name: "m".to_string(),
            nverts: 3,
            positions: vec![[0.0, 0.0, 0.0]; 3],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            strips: vec![crate::formats::mesh::Strip {
                material_slot: 0,
                flags: 0,
                indices: vec![0, 1, 2],
                uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            }],
        };
        builder.add_transcoded_mesh(&mesh, None, &[Some(0)]);
        builder.add_external_material("mat", "tex");
        let (doc, buffer) = builder.finish("m.bin");

        for bv in &doc.buffer_views {
            assert!(bv.buffer < doc.buffers.len());
            assert!(bv.byte_offset + bv.byte_length <= buffer.len());
        }
        for acc in &doc.accessors {
            if let Some(bv) = acc.buffer_view {
                assert!(bv < doc.buffer_views.len());
            }
        }
        for mesh in &doc.meshes {
            for prim in &mesh.primitives {
                if let Some(i) = prim.indices {
                    assert!(i < doc.accessors.len());
                }
                for &a in prim.attributes.values() {
                    assert!(a < doc.accessors.len());
                }
            }
        }
    }
}
