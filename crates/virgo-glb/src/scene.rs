//! The glTF JSON subset written into the fixture's JSON chunk.
//!
//! Field order in these structs is the order keys appear in the output, so
//! the encoded JSON is stable across runs.

use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// Bytes per `VEC3` of `FLOAT`.
pub const POSITION_STRIDE: usize = 3 * std::mem::size_of::<f32>();
/// Bytes per `SCALAR` of `UNSIGNED_INT`.
pub const INDEX_STRIDE: usize = std::mem::size_of::<u32>();

/// glTF accessor component type, written as its GL enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentType(pub u32);

impl ComponentType {
    pub const UNSIGNED_INT: Self = Self(5125);
    pub const FLOAT: Self = Self(5126);
}

/// Intended GPU binding of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(pub u32);

impl Target {
    pub const ARRAY_BUFFER: Self = Self(34962);
    pub const ELEMENT_ARRAY_BUFFER: Self = Self(34963);
}

/// Primitive topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mode(pub u32);

impl Mode {
    pub const TRIANGLES: Self = Self(4);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessorType {
    Scalar,
    Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub mesh: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescription {
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(rename = "POSITION")]
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub attributes: Attributes,
    pub indices: usize,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub buffer_view: usize,
    pub component_type: ComponentType,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: AccessorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: usize,
}

/// Top-level glTF document for a single-mesh, single-buffer scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub asset: Asset,
    pub scene: usize,
    pub scenes: Vec<Scene>,
    pub nodes: Vec<Node>,
    pub meshes: Vec<MeshDescription>,
    pub accessors: Vec<Accessor>,
    pub buffer_views: Vec<BufferView>,
    pub buffers: Vec<Buffer>,
}

impl SceneDescription {
    /// Describe `mesh` as one node in one scene. Positions occupy the start
    /// of buffer 0 and indices follow immediately, which is exactly the
    /// layout `encode_payload` produces.
    pub fn for_mesh(mesh: &Mesh) -> Self {
        let position_bytes = mesh.positions.len() * POSITION_STRIDE;
        let index_bytes = mesh.indices.len() * INDEX_STRIDE;
        let bounds = mesh.bounds();

        Self {
            asset: Asset {
                version: "2.0".to_string(),
            },
            scene: 0,
            scenes: vec![Scene { nodes: vec![0] }],
            nodes: vec![Node { mesh: 0 }],
            meshes: vec![MeshDescription {
                primitives: vec![Primitive {
                    attributes: Attributes { position: 0 },
                    indices: 1,
                    mode: Mode::TRIANGLES,
                }],
            }],
            accessors: vec![
                Accessor {
                    buffer_view: 0,
                    component_type: ComponentType::FLOAT,
                    count: mesh.positions.len(),
                    kind: AccessorType::Vec3,
                    min: bounds.map(|(min, _)| min.to_array().to_vec()),
                    max: bounds.map(|(_, max)| max.to_array().to_vec()),
                },
                Accessor {
                    buffer_view: 1,
                    component_type: ComponentType::UNSIGNED_INT,
                    count: mesh.indices.len(),
                    kind: AccessorType::Scalar,
                    min: None,
                    max: None,
                },
            ],
            buffer_views: vec![
                BufferView {
                    buffer: 0,
                    byte_offset: 0,
                    byte_length: position_bytes,
                    target: Some(Target::ARRAY_BUFFER),
                },
                BufferView {
                    buffer: 0,
                    byte_offset: position_bytes,
                    byte_length: index_bytes,
                    target: Some(Target::ELEMENT_ARRAY_BUFFER),
                },
            ],
            buffers: vec![Buffer {
                byte_length: position_bytes + index_bytes,
            }],
        }
    }

    /// Total bytes the buffer views claim, which must equal the BIN payload.
    pub fn declared_payload_len(&self) -> usize {
        self.buffer_views.iter().map(|v| v.byte_length).sum()
    }
}
