//! UV-sphere mesh shared by every instance.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::animator::Positionable;

/// Mesh vertex: unit-sphere position, which doubles as the normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
}

/// Per-instance data: where one sphere sits.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    pub position: [f32; 3],
}

impl Positionable for SphereInstance {
    #[inline]
    fn set_position(&mut self, position: Vec3) {
        self.position = position.to_array();
    }
}

/// Indexed triangle list for a unit sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u16>,
}

impl SphereMesh {
    /// Build a sphere with `width_segments` around and `height_segments` pole to pole.
    ///
    /// Segment counts are raised to 3 and 2 respectively.
    pub fn uv(width_segments: u16, height_segments: u16) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut vertices = Vec::with_capacity((ws as usize + 1) * (hs as usize + 1));
        for row in 0..=hs {
            let theta = row as f32 / hs as f32 * std::f32::consts::PI;
            for col in 0..=ws {
                let phi = col as f32 / ws as f32 * std::f32::consts::TAU;
                let p = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                vertices.push(SphereVertex {
                    position: p.to_array(),
                });
            }
        }

        let stride = ws + 1;
        let mut indices = Vec::with_capacity(ws as usize * hs as usize * 6);
        for row in 0..hs {
            for col in 0..ws {
                let a = row * stride + col;
                let b = a + stride;
                // Skip the degenerate triangle at each pole.
                if row != 0 {
                    indices.extend_from_slice(&[a, b, a + 1]);
                }
                if row != hs - 1 {
                    indices.extend_from_slice(&[b, b + 1, a + 1]);
                }
            }
        }

        Self { vertices, indices }
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = SphereMesh::uv(10, 10);
        assert_eq!(mesh.vertices.len(), 121);
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = SphereMesh::uv(10, 10);
        // Two triangles per quad, minus one per quad on each pole row.
        assert_eq!(mesh.indices.len(), (10 * 10 * 2 - 2 * 10) * 3);
        let max = mesh.vertices.len() as u16;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn test_instance_is_positionable() {
        let mut instance = SphereInstance::default();
        instance.set_position(Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(instance.position, [1.0, -2.0, 3.5]);
    }
}
