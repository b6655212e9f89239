//! Virgo Assets - Reading generated fixtures back
//!
//! Provides glTF import of GLB fixtures into renderer-agnostic meshes and
//! the `/models/` validation check used by the viewer.

mod error;
mod gltf_loader;
mod mesh;
mod store;

pub use error::AssetError;
pub use gltf_loader::{load_glb, load_glb_slice, GltfContents};
pub use mesh::{MeshAsset, MeshPrimitive};
pub use store::{inspect_bytes, ModelStore, ValidationReport, MODELS_PREFIX};
