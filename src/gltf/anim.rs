//! Animation emission for [`GltfBuilder`]: ANIM-TRANSCODER's glTF-side half.

use crate::formats::anim::AnimClip;

use super::builder::GltfBuilder;
use super::types::{GltfAnimation, GltfAnimationSampler, GltfChannel, GltfChannelTarget};

const LINEAR: &str = "LINEAR";

impl GltfBuilder {
    /// Add one glTF `animations[]` entry for `clip`, binding its rotation
    /// and translation channels to the skeleton nodes starting at
    /// `bone_node_offset`. The first and last keyframes are sentinel
    /// padding in the source format and are dropped here, matching the
    /// `count` frames the SAF header actually declares.
    ///
    /// Callers must have already checked `clip.expected_bones` against the
    /// target skeleton's bone count; this assumes they match.
    pub fn add_transcoded_animation(&mut self, clip: &AnimClip, bone_node_offset: usize, name: &str) {
        let nbones = clip.expected_bones;
        let frames = &clip.keyframes[1..clip.keyframes.len() - 1];
        let times: Vec<f32> = frames.iter().map(|k| k.time as f32 / clip.fps).collect();
        let input_idx = self.add_scalar_f32(&times);

        let mut channels = Vec::new();
        let mut samplers = Vec::new();

        for bone in 0..nbones {
            let rotations: Vec<[f32; 4]> = frames.iter().map(|k| k.rotations[bone]).collect();
            let output_idx = self.add_vec4_f32(&rotations);
            let sampler_idx = samplers.len();
            samplers.push(GltfAnimationSampler { input: input_idx, output: output_idx, interpolation: LINEAR.to_string() });
            channels.push(GltfChannel {
                sampler: sampler_idx,
                target: GltfChannelTarget { node: bone_node_offset + bone, path: "rotation".to_string() },
            });
        }

        if clip.has_full_positions() {
            for bone in 0..nbones {
                let translations: Vec<[f32; 3]> =
                    frames.iter().map(|k| k.positions.as_ref().expect("full position table present")[bone]).collect();
                let output_idx = self.add_vec3_f32(&translations);
                let sampler_idx = samplers.len();
                samplers.push(GltfAnimationSampler { input: input_idx, output: output_idx, interpolation: LINEAR.to_string() });
                channels.push(GltfChannel {
                    sampler: sampler_idx,
                    target: GltfChannelTarget { node: bone_node_offset + bone, path: "translation".to_string() },
                });
            }
        } else {
            let translations: Vec<[f32; 3]> = frames.iter().map(|k| k.root_translation).collect();
            let output_idx = self.add_vec3_f32(&translations);
            let sampler_idx = samplers.len();
            samplers.push(GltfAnimationSampler { input: input_idx, output: output_idx, interpolation: LINEAR.to_string() });
            channels.push(GltfChannel {
                sampler: sampler_idx,
                target: GltfChannelTarget { node: bone_node_offset, path: "translation".to_string() },
            });
        }

        self.animations.push(GltfAnimation { name: Some(name.to_string()), channels, samplers });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::anim::Keyframe;

    fn clip(nbones: usize, nframes: usize, full_positions: bool) -> AnimClip {
        let keyframes = (0..nframes)
            .map(|i| Keyframe {
                time: i as u32 * 2,
                rotations: vec![[0.0, 0.0, 0.0, 1.0]; nbones],
                root_translation: [i as f32, 0.0, 0.0],
                positions: full_positions.then(|| vec![[i as f32, 1.0, 0.0]; nbones]),
            })
            .collect();
        AnimClip { name: "walk".to_string(), flags: if full_positions { 0x10 } else { 0 }, fps: 30.0, expected_bones: nbones, keyframes }
    }

    #[test]
    fn drops_sentinel_frames_and_emits_one_rotation_channel_per_bone() {
        let c = clip(2, 5, false);
        let mut builder = GltfBuilder::new();
        builder.add_transcoded_animation(&c, 0, "walk");
        let anim = &builder.animations[0];
        // 2 rotation channels + 1 shared root-translation channel
        assert_eq!(anim.channels.len(), 3);
        let input_accessor = &builder.accessors[anim.samplers[0].input];
        assert_eq!(input_accessor.count, 3); // nframes=5, minus 2 sentinels
    }

    #[test]
    fn full_position_table_emits_one_translation_channel_per_bone() {
        let c = clip(2, 4, true);
        let mut builder = GltfBuilder::new();
        builder.add_transcoded_animation(&c, 10, "run");
        let anim = &builder.animations[0];
        assert_eq!(anim.channels.len(), 4); // 2 rotation + 2 translation
        assert!(anim.channels.iter().any(|c| c.target.node == 10 && c.target.path == "translation"));
        assert!(anim.channels.iter().any(|c| c.target.node == 11 && c.target.path == "translation"));
    }
}
