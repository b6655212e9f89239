use std::path::PathBuf;

/// Errors that can occur while reading a fixture back.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid model path '{0}'")]
    InvalidPath(String),

    #[error("failed to load glTF file '{0}': {1}")]
    GltfLoadFailed(PathBuf, String),

    #[error("failed to import glTF data: {0}")]
    GltfImport(String),

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
}
