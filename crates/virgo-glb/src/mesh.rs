//! Fixture geometry

use glam::Vec3;

/// Indexed triangle list carrying positions only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// The fixture cube: 8 shared corners spanning [-1, 1] on every axis,
    /// 6 faces split into 12 triangles.
    pub fn cube() -> Self {
        let positions = vec![
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 0, 2, 3, // back
            4, 6, 5, 4, 7, 6, // front
            0, 3, 7, 0, 7, 4, // left
            1, 5, 6, 1, 6, 2, // right
            0, 4, 5, 0, 5, 1, // bottom
            3, 2, 6, 3, 6, 7, // top
        ];

        Self { positions, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Component-wise minimum and maximum of all positions, `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Whether every index references an existing vertex.
    pub fn indices_in_range(&self) -> bool {
        let count = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices_in_range());
    }

    #[test]
    fn test_cube_bounds() {
        let (min, max) = Mesh::cube().bounds().unwrap();
        assert_eq!(min, Vec3::splat(-1.0));
        assert_eq!(max, Vec3::splat(1.0));
    }

    #[test]
    fn test_empty_has_no_bounds() {
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn test_out_of_range_index_detected() {
        let mut mesh = Mesh::cube();
        mesh.indices.push(8);
        assert!(!mesh.indices_in_range());
    }

    #[test]
    fn test_every_corner_is_used() {
        let cube = Mesh::cube();
        for v in 0..8u32 {
            assert!(cube.indices.contains(&v), "vertex {} unused", v);
        }
    }
}
