//! Virgo GLB - Binary glTF encoding for the cube test fixture
//!
//! This crate provides:
//! - The fixed cube geometry used as a fixture
//! - A serde model of the glTF JSON subset the fixture needs
//! - The GLB v2 container writer and reader
//! - `build_cube_glb`, which ties the three together

pub mod container;
pub mod encode;
mod error;
pub mod mesh;
pub mod scene;

pub use container::{write_glb, ChunkType, Glb, GlbHeader};
pub use encode::{build_cube_glb, build_glb, encode_glb, encode_payload};
pub use error::GlbError;
pub use mesh::Mesh;
pub use scene::SceneDescription;
