//! Ordered chunk sequence with type-indexed lookup, validation, and
//! byte-exact re-serialization.

use crate::config::{ParseOptions, PNG_MAGIC, PNG_TRAILER};
use crate::error::{Error, FormatError, Result, ValidationError};
use crate::png::chunk::{Chunk, ChunkType};
use crate::png::header::ImageHeader;
use std::collections::{HashMap, HashSet};

/// A parsed PNG container: the fixed magic header, an ordered chunk
/// sequence, a derived type index, and decoded image metadata.
///
/// The chunk order is the byte order of the stream and is semantically
/// significant; the terminal chunk is always last. The type index is rebuilt
/// whenever the chunk sequence is built and never hand-edited separately.
#[derive(Debug, Clone)]
pub struct Png {
    chunks: Vec<Chunk>,
    type_index: HashMap<ChunkType, Vec<usize>>,
    header: ImageHeader,
}

impl Png {
    /// Parse a raw byte buffer into a validated container.
    ///
    /// Stored checksums are tolerated even when stale; use [`Png::parse_with`]
    /// to verify them.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, ParseOptions::default())
    }

    /// Parse a raw byte buffer with explicit options.
    ///
    /// Verifies the fixed leading magic and trailing terminator pattern,
    /// splits the buffer into chunks, then validates chunk counts and
    /// decodes the image header.
    ///
    /// # Errors
    ///
    /// [`FormatError`] for bad magic, unknown chunk types, duplicates of
    /// singular types, or truncated framing; [`ValidationError`] for missing
    /// mandatory chunks or a missing palette.
    pub fn parse_with(data: &[u8], options: ParseOptions) -> Result<Self> {
        let min_len = PNG_MAGIC.len() + 4 + PNG_TRAILER.len();
        if data.len() < min_len
            || data[..PNG_MAGIC.len()] != PNG_MAGIC
            || data[data.len() - PNG_TRAILER.len()..] != PNG_TRAILER
        {
            return Err(FormatError::BadMagic.into());
        }

        let chunks = split_chunks(data, options)?;
        let type_index = build_type_index(&chunks);

        for required in [ChunkType::IHDR, ChunkType::IDAT, ChunkType::IEND] {
            if !type_index.contains_key(&required) {
                return Err(ValidationError::MissingChunk(required).into());
            }
        }
        match chunks.last() {
            Some(chunk) if chunk.type_tag() == ChunkType::IEND => {}
            _ => return Err(ValidationError::TerminalNotLast.into()),
        }

        let header_position = type_index[&ChunkType::IHDR][0];
        let header = ImageHeader::decode(chunks[header_position].payload())?;

        if header.color_mode.uses_palette() && !type_index.contains_key(&ChunkType::PLTE) {
            return Err(ValidationError::MissingPalette.into());
        }

        Ok(Self {
            chunks,
            type_index,
            header,
        })
    }

    /// Decoded image metadata.
    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// All chunks in stream order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks in the container.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// All chunks of the given type, ordered by first occurrence.
    pub fn get(&self, type_tag: ChunkType) -> Vec<&Chunk> {
        self.positions(type_tag)
            .iter()
            .map(|&position| &self.chunks[position])
            .collect()
    }

    /// The single chunk of the given type, where exactly one is assumed.
    pub fn get_one(&self, type_tag: ChunkType) -> Result<&Chunk> {
        let position = self.position_of(type_tag)?;
        Ok(&self.chunks[position])
    }

    /// Positions of all chunks of the given type, in stream order.
    pub fn positions(&self, type_tag: ChunkType) -> &[usize] {
        self.type_index
            .get(&type_tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Read one payload byte at a parse-time chunk position.
    pub fn read_byte(&self, position: usize, offset: usize) -> Result<u8> {
        let chunk = self
            .chunks
            .get(position)
            .ok_or(Error::BadChunkPosition {
                position,
                count: self.chunks.len(),
            })?;
        chunk
            .payload()
            .get(offset)
            .copied()
            .ok_or(Error::OffsetOutOfRange {
                type_tag: chunk.type_tag(),
                offset,
                len: chunk.len(),
            })
    }

    /// Replace a single payload byte in place. This is the only mutation
    /// primitive the codec uses; it never changes the chunk length.
    pub fn write_byte(&mut self, position: usize, offset: usize, value: u8) -> Result<()> {
        let count = self.chunks.len();
        let chunk = self
            .chunks
            .get_mut(position)
            .ok_or(Error::BadChunkPosition { position, count })?;
        let type_tag = chunk.type_tag();
        let len = chunk.len();
        match chunk.payload_mut().get_mut(offset) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Error::OffsetOutOfRange {
                type_tag,
                offset,
                len,
            }),
        }
    }

    /// Overwrite a chunk's declared length field independent of its actual
    /// payload length. A documented side-channel convention, not a
    /// structural requirement; [`Png::serialize`] emits the field verbatim.
    pub fn set_length_field(&mut self, type_tag: ChunkType, value: u32) -> Result<()> {
        let position = self.position_of(type_tag)?;
        self.chunks[position].set_declared_length(value);
        Ok(())
    }

    /// Re-serialize to bytes: the fixed magic header, then each chunk in
    /// original order with its checksum recomputed.
    pub fn serialize(&self) -> Vec<u8> {
        let total: usize = self.chunks.iter().map(|chunk| 12 + chunk.len()).sum();
        let mut out = Vec::with_capacity(PNG_MAGIC.len() + total);
        out.extend_from_slice(&PNG_MAGIC);
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.serialize());
        }
        out
    }

    /// Types whose stored checksum no longer matches their contents.
    /// Diagnostic only; mismatches never block parsing or serialization.
    pub fn checksum_mismatches(&self) -> Vec<ChunkType> {
        self.chunks
            .iter()
            .filter(|chunk| !chunk.verify_checksum())
            .map(Chunk::type_tag)
            .collect()
    }

    fn position_of(&self, type_tag: ChunkType) -> Result<usize> {
        self.type_index
            .get(&type_tag)
            .and_then(|positions| positions.first())
            .copied()
            .ok_or(Error::ChunkNotFound(type_tag))
    }
}

/// Split the buffer into chunk records, advancing a cursor past the magic
/// until the buffer is exhausted.
///
/// The terminal chunk's real payload is empty by definition; its declared
/// length may hold side-channel data and is never used to advance the
/// cursor.
fn split_chunks(data: &[u8], options: ParseOptions) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut seen: HashSet<ChunkType> = HashSet::new();
    let mut cursor = PNG_MAGIC.len();

    while cursor < data.len() {
        let declared = u32::from_be_bytes(read_word(data, cursor)?);
        cursor += 4;

        let type_tag = ChunkType(read_word(data, cursor)?);
        if !type_tag.is_known() {
            return Err(FormatError::UnknownChunkType {
                type_tag,
                offset: cursor,
            }
            .into());
        }
        if !type_tag.is_repeatable() && !seen.insert(type_tag) {
            return Err(FormatError::DuplicateChunk(type_tag).into());
        }
        cursor += 4;

        let payload_len = if type_tag == ChunkType::IEND {
            0
        } else {
            declared as usize
        };
        let payload = take(data, cursor, payload_len)?.to_vec();
        cursor += payload_len;

        let checksum = u32::from_be_bytes(read_word(data, cursor)?);
        cursor += 4;

        let chunk = Chunk::from_wire(declared, type_tag, payload, checksum);
        if options.verify_checksums && !chunk.verify_checksum() {
            return Err(FormatError::ChecksumMismatch {
                type_tag,
                stored: checksum,
                computed: chunk.computed_checksum(),
            }
            .into());
        }
        chunks.push(chunk);
    }

    Ok(chunks)
}

/// Derived type index over the chunk sequence.
fn build_type_index(chunks: &[Chunk]) -> HashMap<ChunkType, Vec<usize>> {
    let mut index: HashMap<ChunkType, Vec<usize>> = HashMap::new();
    for (position, chunk) in chunks.iter().enumerate() {
        index.entry(chunk.type_tag()).or_default().push(position);
    }
    index
}

fn take(data: &[u8], cursor: usize, needed: usize) -> Result<&[u8]> {
    data.get(cursor..cursor + needed)
        .ok_or_else(|| {
            FormatError::Truncated {
                offset: cursor,
                needed,
                remaining: data.len().saturating_sub(cursor),
            }
            .into()
        })
}

fn read_word(data: &[u8], cursor: usize) -> Result<[u8; 4]> {
    let bytes = take(data, cursor, 4)?;
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}
