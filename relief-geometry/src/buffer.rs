//! Renderable attribute buffers produced by the geometry builders.
//!
//! These are flat CPU-side arrays in the layout the renderer consumes
//! directly; the renderer owns a buffer once a builder returns it.

/// Floats per vertex position.
pub const POSITION_SIZE: usize = 3;
/// Floats per vertex color.
pub const COLOR_SIZE: usize = 3;
/// Floats per UV coordinate.
pub const UV_SIZE: usize = 2;

/// An alternate (position, color) buffer pair sharing the base topology,
/// for renderer-side interpolation between stored states.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphTarget {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl MorphTarget {
    /// Number of vertices in this target.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_SIZE
    }
}

/// Flat vertex attribute buffers handed to the renderer.
///
/// `indices` absent means the geometry is drawn as a point primitive.
/// Every morph target has exactly the base vertex count, and the index
/// buffer references only vertices present in every target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    /// 3 floats per vertex.
    pub positions: Vec<f32>,
    /// 3 floats per vertex, normalized 0-1.
    pub colors: Vec<f32>,
    /// 2 floats per vertex, planar mapping with v flipped.
    pub uvs: Option<Vec<f32>>,
    /// Triangle list; absent for point clouds.
    pub indices: Option<Vec<u32>>,
    /// Ordered morph targets.
    pub morph_targets: Vec<MorphTarget>,
}

impl GeometryBuffer {
    /// Number of vertices in the base buffer.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_SIZE
    }

    /// Number of triangles; zero for point clouds.
    pub fn triangle_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |ix| ix.len() / 3)
    }

    /// z coordinate of one vertex.
    pub fn z_at(&self, vertex: usize) -> f32 {
        self.positions[vertex * POSITION_SIZE + 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_triangle_counts() {
        let buffer = GeometryBuffer {
            positions: vec![0.0; 12],
            colors: vec![0.0; 12],
            uvs: None,
            indices: Some(vec![0, 2, 1, 1, 2, 3]),
            morph_targets: Vec::new(),
        };
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.triangle_count(), 2);
    }

    #[test]
    fn test_point_cloud_has_no_triangles() {
        let buffer = GeometryBuffer {
            positions: vec![0.0; 9],
            colors: vec![0.0; 9],
            ..Default::default()
        };
        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.triangle_count(), 0);
    }
}
