//! GLB v2 container: a 12-byte header followed by a JSON chunk and an
//! optional BIN chunk. All integers are little-endian.

use tracing::debug;

use crate::error::GlbError;

/// "glTF" read as a little-endian u32.
pub const MAGIC: u32 = 0x4654_6C67;
pub const VERSION: u32 = 2;
pub const HEADER_LEN: usize = 12;
pub const CHUNK_HEADER_LEN: usize = 8;

/// Chunk type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ChunkType {
    /// "JSON"
    Json = 0x4E4F_534A,
    /// "BIN\0"
    Bin = 0x004E_4942,
}

impl ChunkType {
    pub fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            0x4E4F_534A => Some(Self::Json),
            0x004E_4942 => Some(Self::Bin),
            _ => None,
        }
    }

    /// Byte used to pad the chunk body to 4-byte alignment.
    pub fn padding_byte(self) -> u8 {
        match self {
            Self::Json => b' ',
            Self::Bin => 0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Bin => "BIN",
        }
    }
}

/// The 12-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbHeader {
    pub magic: u32,
    pub version: u32,
    pub length: u32,
}

impl GlbHeader {
    /// Read the header fields without validating them.
    pub fn read(bytes: &[u8]) -> Result<Self, GlbError> {
        Ok(Self {
            magic: read_u32(bytes, 0)?,
            version: read_u32(bytes, 4)?,
            length: read_u32(bytes, 8)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4..8].copy_from_slice(&self.version.to_le_bytes());
        out[8..12].copy_from_slice(&self.length.to_le_bytes());
        out
    }
}

/// `len` rounded up to the next multiple of 4.
pub fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, GlbError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or(GlbError::Truncated(offset))
}

fn chunk_len_u32(kind: ChunkType, len: usize) -> Result<u32, GlbError> {
    u32::try_from(len).map_err(|_| GlbError::TooLarge {
        kind: kind.name(),
        len,
    })
}

fn push_chunk(out: &mut Vec<u8>, kind: ChunkType, body: &[u8]) -> Result<(), GlbError> {
    let padded = padded_len(body.len());
    out.extend_from_slice(&chunk_len_u32(kind, padded)?.to_le_bytes());
    out.extend_from_slice(&(kind as u32).to_le_bytes());
    out.extend_from_slice(body);
    out.resize(out.len() + (padded - body.len()), kind.padding_byte());
    Ok(())
}

/// Assemble a GLB file from serialized JSON and a binary payload.
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros. An
/// empty `bin` omits the BIN chunk entirely.
pub fn write_glb(json: &[u8], bin: &[u8]) -> Result<Vec<u8>, GlbError> {
    let mut total = HEADER_LEN + CHUNK_HEADER_LEN + padded_len(json.len());
    if !bin.is_empty() {
        total += CHUNK_HEADER_LEN + padded_len(bin.len());
    }

    let header = GlbHeader {
        magic: MAGIC,
        version: VERSION,
        length: u32::try_from(total).map_err(|_| GlbError::TooLarge {
            kind: "file",
            len: total,
        })?,
    };

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&header.to_bytes());
    push_chunk(&mut out, ChunkType::Json, json)?;
    if !bin.is_empty() {
        push_chunk(&mut out, ChunkType::Bin, bin)?;
    }

    debug_assert_eq!(out.len(), total);
    Ok(out)
}

/// A parsed GLB file borrowing its chunk bodies from the input.
#[derive(Debug, Clone, Copy)]
pub struct Glb<'a> {
    pub header: GlbHeader,
    /// JSON chunk body, including any trailing padding.
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

impl<'a> Glb<'a> {
    /// Parse and check the container structure.
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self, GlbError> {
        let header = GlbHeader::read(bytes)?;
        if header.magic != MAGIC {
            return Err(GlbError::BadMagic(header.magic));
        }
        if header.version != VERSION {
            return Err(GlbError::UnsupportedVersion(header.version));
        }
        if header.length as usize != bytes.len() {
            return Err(GlbError::LengthMismatch {
                declared: header.length as usize,
                actual: bytes.len(),
            });
        }

        let mut offset = HEADER_LEN;
        let (kind, json) = read_chunk(bytes, &mut offset)?;
        if ChunkType::from_u32(kind) != Some(ChunkType::Json) {
            return Err(GlbError::UnexpectedChunk(kind));
        }

        // BIN is optional and may only directly follow JSON; any other
        // chunk is ignored.
        let mut bin = None;
        let mut second = true;
        while offset < bytes.len() {
            let (kind, body) = read_chunk(bytes, &mut offset)?;
            if second && ChunkType::from_u32(kind) == Some(ChunkType::Bin) {
                bin = Some(body);
            } else {
                debug!("Skipping chunk 0x{:08X} ({} bytes)", kind, body.len());
            }
            second = false;
        }

        Ok(Self { header, json, bin })
    }

    /// Deserialize the JSON chunk into `T`. Trailing space padding is
    /// accepted by the JSON parser.
    pub fn parse_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, GlbError> {
        Ok(serde_json::from_slice(self.json)?)
    }
}

fn read_chunk<'a>(bytes: &'a [u8], offset: &mut usize) -> Result<(u32, &'a [u8]), GlbError> {
    let start = *offset;
    let len = read_u32(bytes, start)? as usize;
    let kind = read_u32(bytes, start + 4)?;
    if len % 4 != 0 {
        return Err(GlbError::MisalignedChunk { offset: start, len });
    }

    let body_start = start + CHUNK_HEADER_LEN;
    let body_end = body_start
        .checked_add(len)
        .ok_or(GlbError::Truncated(body_start))?;
    let body = bytes
        .get(body_start..body_end)
        .ok_or(GlbError::Truncated(body_start))?;
    *offset = body_end;
    Ok((kind, body))
}
