use std::path::Path;

use tracing::debug;

use crate::error::AssetError;
use crate::mesh::{MeshAsset, MeshPrimitive};

/// Result of importing a GLB file.
#[derive(Debug, Clone)]
pub struct GltfContents {
    pub meshes: Vec<MeshAsset>,
}

/// Import a GLB file from disk and extract its meshes.
pub fn load_glb(path: &Path) -> Result<GltfContents, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|e| AssetError::Io(path.to_path_buf(), e))?;
    let contents = import(&bytes)
        .map_err(|e| AssetError::GltfLoadFailed(path.to_path_buf(), e.to_string()))?;

    debug!(
        "glTF '{}': {} meshes",
        path.display(),
        contents.meshes.len()
    );
    Ok(contents)
}

/// Import GLB bytes already in memory.
pub fn load_glb_slice(bytes: &[u8]) -> Result<GltfContents, AssetError> {
    import(bytes).map_err(|e| AssetError::GltfImport(e.to_string()))
}

fn import(bytes: &[u8]) -> Result<GltfContents, gltf::Error> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let mut meshes = Vec::new();

    for mesh in document.meshes() {
        let name = mesh.name().unwrap_or("unnamed").to_string();

        let mut primitives = Vec::new();

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let indices: Option<Vec<u32>> = reader
                .read_indices()
                .map(|idx| idx.into_u32().collect());

            primitives.push(MeshPrimitive {
                mode: primitive.mode(),
                positions,
                indices,
            });
        }

        debug!("Loaded mesh '{}' with {} primitives", name, primitives.len());
        meshes.push(MeshAsset { name, primitives });
    }

    Ok(GltfContents { meshes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use virgo_glb::{build_cube_glb, Mesh};

    #[test]
    fn cube_fixture_imports_as_one_mesh() {
        let glb = build_cube_glb().unwrap();
        let contents = load_glb_slice(&glb).unwrap();

        assert_eq!(contents.meshes.len(), 1);
        let mesh = &contents.meshes[0];
        assert_eq!(mesh.name, "unnamed");
        assert_eq!(mesh.primitives.len(), 1);

        let primitive = &mesh.primitives[0];
        assert_eq!(primitive.mode, gltf::mesh::Mode::Triangles);
        assert_eq!(primitive.positions, Mesh::cube().positions);
        assert_eq!(primitive.indices.as_deref(), Some(&Mesh::cube().indices[..]));
        assert_eq!(primitive.triangle_count(), 12);
    }

    #[test]
    fn garbage_bytes_fail_import() {
        match load_glb_slice(b"not a model") {
            Err(AssetError::GltfImport(_)) => {}
            other => panic!("expected GltfImport, got: {:?}", other),
        }
    }

    #[test]
    fn missing_file_returns_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_glb(&dir.path().join("missing.glb"));
        match result {
            Err(AssetError::NotFound(_)) => {}
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn loads_fixture_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.glb");
        std::fs::write(&path, build_cube_glb().unwrap()).unwrap();

        let contents = load_glb(&path).unwrap();
        assert_eq!(contents.meshes[0].primitives[0].positions.len(), 8);
    }
}
