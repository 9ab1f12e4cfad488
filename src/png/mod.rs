//! Chunk-level PNG container model.
//!
//! This module handles:
//! - Splitting a raw byte buffer into length/type/payload/checksum chunks
//! - Structural validation (mandatory chunks, palette presence)
//! - In-place payload mutation and byte-exact re-serialization

mod chunk;
mod container;
mod header;

pub use chunk::{Chunk, ChunkType};
pub use container::Png;
pub use header::{ColorMode, ImageHeader};
