//! Two-bits-per-byte embedding and extraction over planned carrier slots.
//!
//! Each message byte occupies four consecutive planner slots, most
//! significant bit pair first: slot `p` of a byte carries source bits
//! `7-2p` and `6-2p` in the carrier byte's bits 1 and 0. This pair order is
//! the wire contract between embed and extract.

use crate::config::SLOTS_PER_BYTE;
use crate::error::{Error, Result};
use crate::png::{ChunkType, Png};
use crate::stego::bits;
use crate::stego::channel;
use crate::stego::planner::CarrierPlan;

/// Hide `message` in the container's carrier chunks.
///
/// The capacity check runs before any mutation, so a failed embed leaves the
/// container unmodified and reusable. On success the message length is
/// recorded in the length side channel and the container serializes with
/// recomputed checksums.
///
/// # Errors
///
/// [`crate::error::CapacityError`] when the carrier cannot hold the message;
/// [`Error::UnsupportedColorMode`] for grayscale containers.
pub fn embed(png: &mut Png, message: &[u8]) -> Result<()> {
    let carriers = carrier_chunks(png)?;
    let plan = CarrierPlan::new(&carriers, message.len())?;

    for (index, &byte) in message.iter().enumerate() {
        for pair in 0..SLOTS_PER_BYTE {
            let (position, offset) = plan.slot(index * SLOTS_PER_BYTE + pair);
            let carrier = png.read_byte(position, offset)?;
            png.write_byte(position, offset, write_pair(carrier, byte, pair))?;
        }
    }

    channel::record(png, message.len() as u32)
}

/// Recover a hidden message.
///
/// Reads the length side channel first, replans the identical slot
/// placement, and reassembles each message byte from four carrier bytes.
pub fn extract(png: &Png) -> Result<Vec<u8>> {
    let message_len = channel::recorded(png)? as usize;
    let carriers = carrier_chunks(png)?;
    let plan = CarrierPlan::new(&carriers, message_len)?;

    let mut message = Vec::with_capacity(message_len);
    for index in 0..message_len {
        let mut byte = 0u8;
        for pair in 0..SLOTS_PER_BYTE {
            let (position, offset) = plan.slot(index * SLOTS_PER_BYTE + pair);
            byte = read_pair(png.read_byte(position, offset)?, byte, pair);
        }
        message.push(byte);
    }

    Ok(message)
}

/// Message capacity of the container in bytes.
pub fn capacity(png: &Png) -> Result<usize> {
    let carriers = carrier_chunks(png)?;
    let available: usize = carriers.iter().map(|&(_, size)| size).sum();
    Ok(available / SLOTS_PER_BYTE)
}

/// Select the carrier chunks for the container's color mode: the palette
/// chunk for indexed images, every image data chunk otherwise. Grayscale
/// modes are rejected here, not at the container level.
fn carrier_chunks(png: &Png) -> Result<Vec<(usize, usize)>> {
    let color_mode = png.header().color_mode;
    if color_mode.is_grayscale() {
        return Err(Error::UnsupportedColorMode(color_mode));
    }

    let type_tag = if color_mode.uses_palette() {
        ChunkType::PLTE
    } else {
        ChunkType::IDAT
    };
    Ok(png
        .positions(type_tag)
        .iter()
        .map(|&position| (position, png.chunks()[position].len()))
        .collect())
}

/// Write one two-bit pair of `byte` into the low two bits of `carrier`.
/// Pair 0 is the most significant pair.
fn write_pair(carrier: u8, byte: u8, pair: usize) -> u8 {
    let high = (7 - 2 * pair) as u32;
    let updated = bits::copy_bit(byte, high, carrier, 1);
    bits::copy_bit(byte, high - 1, updated, 0)
}

/// Read the two-bit pair in the low bits of `carrier` back into `byte`.
/// Exact inverse of [`write_pair`].
fn read_pair(carrier: u8, byte: u8, pair: usize) -> u8 {
    let high = (7 - 2 * pair) as u32;
    let updated = bits::copy_bit(carrier, 1, byte, high);
    bits::copy_bit(carrier, 0, updated, high - 1)
}
