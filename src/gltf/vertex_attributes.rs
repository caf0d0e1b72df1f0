//! Vertex attribute methods for [`GltfBuilder`].

use super::builder::GltfBuilder;
use super::types::{GltfAccessor, GltfBufferView, GltfSparse, GltfSparseIndices, GltfSparseValues};

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

impl GltfBuilder {
    pub(crate) fn add_positions(&mut self, positions: &[[f32; 3]]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for pos in positions {
            for i in 0..3 {
                min[i] = min[i].min(pos[i]);
                max[i] = max[i].max(pos[i]);
            }
            for &v in pos {
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: positions.len() * 12,
            target: Some(34962),
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count: positions.len(),
            accessor_type: "VEC3".to_string(),
            min: Some(min.to_vec()),
            max: Some(max.to_vec()),
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    pub(crate) fn add_normals(&mut self, normals: &[[f32; 3]]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();
        for n in normals {
            for &v in n {
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: normals.len() * 12,
            target: Some(34962),
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count: normals.len(),
            accessor_type: "VEC3".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    /// Non-standard componentType per the skinned-mesh joint encoding this
    /// format family requires (§9 deviation).
    pub(crate) fn add_joints_u32(&mut self, joints: &[[u32; 4]]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();
        for j in joints {
            for &v in j {
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: joints.len() * 16,
            target: Some(34962),
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: UNSIGNED_INT,
            count: joints.len(),
            accessor_type: "VEC4".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    pub(crate) fn add_weights_f32(&mut self, weights: &[[f32; 4]]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();
        for w in weights {
            for &v in w {
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: weights.len() * 16,
            target: Some(34962),
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count: weights.len(),
            accessor_type: "VEC4".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    /// Returns `(accessor index, bufferView index)`; the bufferView is
    /// reused as the sparse indirection list for this strip's UV accessor.
    pub(crate) fn add_strip_indices(&mut self, indices: &[u32]) -> (usize, usize) {
        self.align(4);
        let byte_offset = self.buffer.len();
        for &idx in indices {
            self.buffer.extend_from_slice(&idx.to_le_bytes());
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: indices.len() * 4,
            target: Some(34963),
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: UNSIGNED_INT,
            count: indices.len(),
            accessor_type: "SCALAR".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        (acc_idx, bv_idx)
    }

    /// A dense `count = nverts` UV accessor with no backing bufferView,
    /// overridden at `indices` positions by `uvs` via a sparse block that
    /// reuses the strip's own index bufferView as the sparse indirection list.
    pub(crate) fn add_sparse_strip_uvs(&mut self, nverts: usize, strip_indices_bv: usize, uvs: &[[f32; 2]]) -> usize {
        self.align(4);
        let values_offset = self.buffer.len();
        for uv in uvs {
            for &v in uv {
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        let values_bv = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset: values_offset,
            byte_length: uvs.len() * 8,
            target: None,
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: None,
            byte_offset: None,
            component_type: FLOAT,
            count: nverts,
            accessor_type: "VEC2".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: Some(GltfSparse {
                count: uvs.len(),
                indices: GltfSparseIndices {
                    buffer_view: strip_indices_bv,
                    byte_offset: 0,
                    component_type: UNSIGNED_INT,
                },
                values: GltfSparseValues { buffer_view: values_bv, byte_offset: 0 },
            }),
        });

        acc_idx
    }

    pub(crate) fn add_identity_inverse_bind_matrices(&mut self, count: usize) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();

        let mut identity = [0.0f32; 16];
        for i in 0..4 {
            identity[i * 4 + i] = 1.0;
        }
        for _ in 0..count {
            for &v in &identity {
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: count * 64,
            target: None,
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count,
            accessor_type: "MAT4".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    pub(crate) fn add_scalar_f32(&mut self, values: &[f32]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();
        for &v in values {
            self.buffer.extend_from_slice(&v.to_le_bytes());
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: values.len() * 4,
            target: None,
        });

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count: values.len(),
            accessor_type: "SCALAR".to_string(),
            min: if values.is_empty() { None } else { Some(vec![min]) },
            max: if values.is_empty() { None } else { Some(vec![max]) },
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    pub(crate) fn add_vec3_f32(&mut self, values: &[[f32; 3]]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();
        for v in values {
            for &c in v {
                self.buffer.extend_from_slice(&c.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: values.len() * 12,
            target: None,
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count: values.len(),
            accessor_type: "VEC3".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        acc_idx
    }

    pub(crate) fn add_vec4_f32(&mut self, values: &[[f32; 4]]) -> usize {
        self.align(4);
        let byte_offset = self.buffer.len();
        for v in values {
            for &c in v {
                self.buffer.extend_from_slice(&c.to_le_bytes());
            }
        }

        let bv_idx = self.buffer_views.len();
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: values.len() * 16,
            target: None,
        });

        let acc_idx = self.accessors.len();
        self.accessors.push(GltfAccessor {
            buffer_view: Some(bv_idx),
            byte_offset: None,
            component_type: FLOAT,
            count: values.len(),
            accessor_type: "VEC4".to_string(),
            min: None,
            max: None,
            normalized: None,
            sparse: None,
        });

        acc_idx
    }
}
