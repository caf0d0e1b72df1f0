//! glTF 2.0 document assembly (MESH-TRANSCODER's and ANIM-TRANSCODER's output side).

mod anim;
mod builder;
mod export;
mod material_methods;
pub mod mesh;
mod skeleton;
mod types;
mod vertex_attributes;

pub use builder::GltfBuilder;
pub use export::write_gltf_pair;
pub use skeleton::SkeletonResult;
pub use types::*;
