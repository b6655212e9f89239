use tracing::debug;

use crate::container::write_glb;
use crate::error::GlbError;
use crate::mesh::Mesh;
use crate::scene::SceneDescription;

/// Little-endian positions followed immediately by little-endian indices.
pub fn encode_payload(mesh: &Mesh) -> Vec<u8> {
    let mut payload = Vec::with_capacity(
        mesh.positions.len() * crate::scene::POSITION_STRIDE
            + mesh.indices.len() * crate::scene::INDEX_STRIDE,
    );
    extend_le(&mut payload, &mesh.positions, &mesh.indices);
    payload
}

#[cfg(target_endian = "little")]
fn extend_le(out: &mut Vec<u8>, positions: &[[f32; 3]], indices: &[u32]) {
    out.extend_from_slice(bytemuck::cast_slice(positions));
    out.extend_from_slice(bytemuck::cast_slice(indices));
}

#[cfg(target_endian = "big")]
fn extend_le(out: &mut Vec<u8>, positions: &[[f32; 3]], indices: &[u32]) {
    for component in positions.iter().flatten() {
        out.extend_from_slice(&component.to_le_bytes());
    }
    for index in indices {
        out.extend_from_slice(&index.to_le_bytes());
    }
}

/// Serialize `description` and wrap it with `payload` in a GLB container.
pub fn encode_glb(description: &SceneDescription, payload: &[u8]) -> Result<Vec<u8>, GlbError> {
    let json = serde_json::to_vec(description)?;
    write_glb(&json, payload)
}

/// Encode any positions-only mesh as a single-scene GLB.
pub fn build_glb(mesh: &Mesh) -> Result<Vec<u8>, GlbError> {
    let description = SceneDescription::for_mesh(mesh);
    let payload = encode_payload(mesh);
    debug_assert_eq!(payload.len(), description.declared_payload_len());

    let glb = encode_glb(&description, &payload)?;
    debug!(
        "Encoded GLB: {} vertices, {} triangles, {} bytes",
        mesh.vertex_count(),
        mesh.triangle_count(),
        glb.len()
    );
    Ok(glb)
}

/// The cube fixture as a complete GLB file.
pub fn build_cube_glb() -> Result<Vec<u8>, GlbError> {
    build_glb(&Mesh::cube())
}
