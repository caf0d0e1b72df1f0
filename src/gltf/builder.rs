//! Builder for constructing glTF documents.

use super::types::{GltfAccessor, GltfAnimation, GltfBufferView, GltfImage, GltfMaterial, GltfMesh, GltfNode, GltfSampler, GltfSkin, GltfTexture};

pub struct GltfBuilder {
    pub(crate) buffer: Vec<u8>,
    pub(crate) buffer_views: Vec<GltfBufferView>,
    pub(crate) accessors: Vec<GltfAccessor>,
    pub(crate) meshes: Vec<GltfMesh>,
    pub(crate) nodes: Vec<GltfNode>,
    pub(crate) skins: Vec<GltfSkin>,
    pub(crate) images: Vec<GltfImage>,
    pub(crate) textures: Vec<GltfTexture>,
    pub(crate) samplers: Vec<GltfSampler>,
    pub(crate) materials: Vec<GltfMaterial>,
    pub(crate) animations: Vec<GltfAnimation>,
}

impl GltfBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            buffer_views: Vec::new(),
            accessors: Vec::new(),
            meshes: Vec::new(),
            nodes: Vec::new(),
            skins: Vec::new(),
            images: Vec::new(),
            textures: Vec::new(),
            samplers: Vec::new(),
            materials: Vec::new(),
            animations: Vec::new(),
        }
    }

    pub(crate) fn align(&mut self, alignment: usize) {
        let padding = (alignment - (self.buffer.len() % alignment)) % alignment;
        self.buffer.extend(std::iter::repeat_n(0u8, padding));
    }
}

impl Default for GltfBuilder {
    fn default() -> Self {
        Self::new()
    }
}
