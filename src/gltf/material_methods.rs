//! Material/texture/image methods for [`GltfBuilder`].
//!
//! Images are referenced by external URI (`../textures/<tag>.png`), not
//! embedded in the binary buffer: textures are written to a sibling
//! directory by the pipeline, not packed into the glTF itself.

use super::builder::GltfBuilder;
use super::types::{GltfImage, GltfMaterial, GltfPbrMetallicRoughness, GltfSampler, GltfTexture, GltfTextureInfo};

const LINEAR: u32 = 9729;
const LINEAR_MIPMAP_LINEAR: u32 = 9987;
const REPEAT: u32 = 10497;

impl GltfBuilder {
    /// Returns the index of the one shared linear/repeat sampler, creating
    /// it on first use.
    pub(crate) fn shared_sampler(&mut self) -> usize {
        if !self.samplers.is_empty() {
            return 0;
        }
        self.samplers.push(GltfSampler {
            mag_filter: Some(LINEAR),
            min_filter: Some(LINEAR_MIPMAP_LINEAR),
            wrap_s: Some(REPEAT),
            wrap_t: Some(REPEAT),
        });
        0
    }

    pub(crate) fn add_external_material(&mut self, name: &str, tag: &str) -> usize {
        let sampler_idx = self.shared_sampler();

        let image_idx = self.images.len();
        self.images.push(GltfImage { uri: format!("../textures/{tag}.png") });

        let texture_idx = self.textures.len();
        self.textures.push(GltfTexture { sampler: Some(sampler_idx), source: Some(image_idx) });

        let material_idx = self.materials.len();
        self.materials.push(GltfMaterial {
            name: Some(name.to_string()),
            pbr_metallic_roughness: Some(GltfPbrMetallicRoughness {
                base_color_factor: [1.0, 1.0, 1.0, 1.0],
                base_color_texture: Some(GltfTextureInfo { index: texture_idx, tex_coord: None }),
                metallic_factor: 0.0,
                roughness_factor: 1.0,
            }),
            alpha_mode: Some("MASK".to_string()),
            double_sided: Some(true),
        });

        material_idx
    }
}
