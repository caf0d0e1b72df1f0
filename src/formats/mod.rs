//! Binary format loaders for the asset kinds the archive cross-links:
//! material (SMT), skeleton (SSK), skin (SSN), mesh (SCF/SMF), animation (SAF).

pub mod anim;
pub mod mesh;
pub mod smt;
pub mod ssk;
pub mod ssn;

pub use anim::AnimClip;
pub use mesh::MeshData;
pub use smt::Material;
pub use ssk::{Bone, Skeleton};
pub use ssn::{Binding, SkinBinding};
