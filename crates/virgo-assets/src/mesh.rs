/// A mesh read back from a GLB file (renderer-agnostic).
#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub name: String,
    pub primitives: Vec<MeshPrimitive>,
}

/// A single draw primitive within a mesh.
#[derive(Debug, Clone)]
pub struct MeshPrimitive {
    pub mode: gltf::mesh::Mode,
    pub positions: Vec<[f32; 3]>,
    pub indices: Option<Vec<u32>>,
}

impl MeshPrimitive {
    pub fn triangle_count(&self) -> usize {
        match (&self.indices, self.mode) {
            (Some(indices), gltf::mesh::Mode::Triangles) => indices.len() / 3,
            (None, gltf::mesh::Mode::Triangles) => self.positions.len() / 3,
            _ => 0,
        }
    }
}
