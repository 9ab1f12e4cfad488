//! Error types for PNG container and steganography operations.

use crate::png::{ChunkType, ColorMode};
use thiserror::Error;

/// Result type alias for PNG steganography operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures while splitting a byte stream into chunks.
/// Always fatal to parsing; no partial container is returned.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Leading magic or trailing terminator mismatch.
    #[error("valid PNG header and/or footer not found")]
    BadMagic,

    /// Chunk type absent from both the critical and ancillary registries.
    #[error("unknown chunk type {type_tag} found at byte offset {offset}")]
    UnknownChunkType { type_tag: ChunkType, offset: usize },

    /// Second instance of a chunk type the codec expects to be singular.
    #[error("chunk of type {0} already exists")]
    DuplicateChunk(ChunkType),

    /// Buffer ended in the middle of a chunk record.
    #[error("truncated chunk at byte offset {offset}: need {needed} bytes, have {remaining}")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Stored CRC-32 disagrees with the recomputed value (strict parsing only).
    #[error("checksum mismatch in {type_tag} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        type_tag: ChunkType,
        stored: u32,
        computed: u32,
    },

    /// Header payload is not the fixed 13 bytes.
    #[error("IHDR payload must be 13 bytes, found {0}")]
    BadHeaderLength(usize),
}

/// Validation failures raised after parsing completes structurally.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A mandatory chunk type is absent.
    #[error("no {0} chunk detected in PNG")]
    MissingChunk(ChunkType),

    /// Palette color mode without a palette chunk.
    #[error("palette color mode requires a PLTE chunk")]
    MissingPalette,

    /// The terminal chunk does not end the stream.
    #[error("IEND chunk must terminate the stream")]
    TerminalNotLast,

    /// Color mode byte outside the known set.
    #[error("unrecognized color mode {0}")]
    BadColorMode(u8),
}

/// Embed-time capacity failures. The container is left unmodified.
#[derive(Error, Debug)]
pub enum CapacityError {
    #[error("message too large: need {required} carrier bytes, have {available}")]
    MessageTooLarge { required: usize, available: usize },
}

/// Errors that can occur in PNG steganography operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// Requested chunk type is not present in the container.
    #[error("no {0} chunk present")]
    ChunkNotFound(ChunkType),

    /// Chunk position outside the parsed sequence; a planner/codec bug.
    #[error("chunk position {position} out of range for {count} chunks")]
    BadChunkPosition { position: usize, count: usize },

    /// Payload byte access outside the chunk bounds; a planner/codec bug.
    #[error("byte offset {offset} out of range for {type_tag} chunk of {len} bytes")]
    OffsetOutOfRange {
        type_tag: ChunkType,
        offset: usize,
        len: usize,
    },

    /// Grayscale modes have no palette and no spare color channels to carry bits.
    #[error("grayscale images currently unsupported")]
    UnsupportedColorMode(ColorMode),
}
