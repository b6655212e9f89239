/// Errors that can occur while writing or reading a GLB container.
#[derive(Debug, thiserror::Error)]
pub enum GlbError {
    #[error("scene description JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} chunk of {len} bytes does not fit in a GLB file")]
    TooLarge { kind: &'static str, len: usize },

    #[error("bad magic 0x{0:08X}, expected glTF")]
    BadMagic(u32),

    #[error("unsupported GLB version {0}")]
    UnsupportedVersion(u32),

    #[error("header declares {declared} bytes but {actual} are present")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("GLB data truncated at byte {0}")]
    Truncated(usize),

    #[error("chunk at byte {offset} has length {len}, not a multiple of 4")]
    MisalignedChunk { offset: usize, len: usize },

    #[error("unexpected chunk type 0x{0:08X}")]
    UnexpectedChunk(u32),
}
