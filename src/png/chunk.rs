//! A single length/type/payload/checksum chunk record.

use crate::config::{ANCILLARY_CHUNKS, CRITICAL_CHUNKS, REPEATABLE_CHUNKS};
use std::fmt;

/// Four-byte chunk type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Image header chunk carrying dimensions and color mode.
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Palette chunk.
    pub const PLTE: ChunkType = ChunkType(*b"PLTE");
    /// Image data chunk.
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Terminal marker chunk.
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Whether the tag is in the critical registry.
    pub fn is_critical(&self) -> bool {
        CRITICAL_CHUNKS.contains(&self.0)
    }

    /// Whether the tag is in the ancillary registry.
    pub fn is_ancillary(&self) -> bool {
        ANCILLARY_CHUNKS.contains(&self.0)
    }

    /// Whether the tag appears in either registry.
    pub fn is_known(&self) -> bool {
        self.is_critical() || self.is_ancillary()
    }

    /// Whether more than one chunk of this type may appear in a stream.
    pub fn is_repeatable(&self) -> bool {
        REPEATABLE_CHUNKS.contains(&self.0)
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(tag: [u8; 4]) -> Self {
        ChunkType(tag)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(u8::is_ascii_alphabetic) {
            f.write_str(std::str::from_utf8(&self.0).unwrap_or("????"))
        } else {
            write!(f, "0x{}", hex::encode(self.0))
        }
    }
}

/// A single chunk record. Owns its payload bytes; the declared length field
/// is kept separate from the payload so it can diverge when repurposed as a
/// side channel.
#[derive(Debug, Clone)]
pub struct Chunk {
    length: u32,
    type_tag: ChunkType,
    payload: Vec<u8>,
    checksum: u32,
}

impl Chunk {
    /// Create a chunk with its length and checksum computed from the payload.
    /// Any byte payload is legal.
    pub fn new(type_tag: ChunkType, payload: Vec<u8>) -> Self {
        let checksum = compute_crc(type_tag, &payload);
        Self {
            length: payload.len() as u32,
            type_tag,
            payload,
            checksum,
        }
    }

    /// Rebuild a chunk from fields read off the wire, keeping the stored
    /// length and checksum exactly as read.
    pub(crate) fn from_wire(
        length: u32,
        type_tag: ChunkType,
        payload: Vec<u8>,
        checksum: u32,
    ) -> Self {
        Self {
            length,
            type_tag,
            payload,
            checksum,
        }
    }

    pub fn type_tag(&self) -> ChunkType {
        self.type_tag
    }

    /// The declared length field. Equals the payload length for ordinary
    /// chunks but may diverge when used as a side channel.
    pub fn declared_length(&self) -> u32 {
        self.length
    }

    pub(crate) fn set_declared_length(&mut self, value: u32) {
        self.length = value;
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Stored checksum, as read off the wire or last computed.
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Recompute the CRC-32 over the current type tag and payload and compare
    /// it to the stored value. Diagnostic only; serialization never trusts
    /// the stored checksum.
    pub fn verify_checksum(&self) -> bool {
        self.computed_checksum() == self.checksum
    }

    /// CRC-32 over the current type tag and payload.
    pub(crate) fn computed_checksum(&self) -> u32 {
        compute_crc(self.type_tag, &self.payload)
    }

    /// Serialize the chunk as it appears on the wire: 4-byte big-endian
    /// declared length, 4-byte type tag, payload, 4-byte big-endian CRC-32.
    /// The checksum is recomputed at call time so a mutated payload always
    /// serializes internally consistent.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.payload.len());
        out.extend_from_slice(&self.length.to_be_bytes());
        out.extend_from_slice(&self.type_tag.0);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&compute_crc(self.type_tag, &self.payload).to_be_bytes());
        out
    }
}

/// CRC-32 over the type tag followed by the payload.
fn compute_crc(type_tag: ChunkType, payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&type_tag.0);
    hasher.update(payload);
    hasher.finalize()
}
