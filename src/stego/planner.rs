//! Even-spread slot placement across the carrier chunks.

use crate::config::SLOTS_PER_BYTE;
use crate::error::{CapacityError, Result};

/// A deterministic placement of message bits over carrier payload bytes.
///
/// Derived purely from the carrier chunk sizes and the message length, so
/// embed and extract recompute the identical plan from the same container.
/// Nothing is persisted.
#[derive(Debug, Clone)]
pub struct CarrierPlan {
    /// `(chunk_position, payload_len)` for each carrier chunk, stream order.
    carriers: Vec<(usize, usize)>,
    available: usize,
    slots: usize,
    stride: usize,
}

impl CarrierPlan {
    /// Plan slot placement for a message of `message_len` bytes over the
    /// given carrier chunks.
    ///
    /// Each message byte needs four slots of two bits each. Slots sit at
    /// stride multiples so consumed bytes are distributed across the whole
    /// carrier rather than clustered at the start.
    ///
    /// # Errors
    ///
    /// [`CapacityError::MessageTooLarge`] when the carrier cannot hold the
    /// message.
    pub fn new(carriers: &[(usize, usize)], message_len: usize) -> Result<Self> {
        let available: usize = carriers.iter().map(|&(_, size)| size).sum();
        let slots = message_len * SLOTS_PER_BYTE;
        if slots > available {
            return Err(CapacityError::MessageTooLarge {
                required: slots,
                available,
            }
            .into());
        }

        let stride = available / (slots + 1);
        Ok(Self {
            carriers: carriers.to_vec(),
            available,
            slots,
            stride,
        })
    }

    /// Total carrier bytes available.
    pub fn available(&self) -> usize {
        self.available
    }

    /// Slots consumed by the planned message.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Spacing between consecutive consumed slots.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Map slot `k` (0-indexed) to a `(chunk_position, byte_offset)` pair by
    /// walking cumulative carrier chunk sizes.
    pub fn slot(&self, k: usize) -> (usize, usize) {
        debug_assert!(k < self.slots, "slot index past planned message");
        let mut remaining = self.global_offset(k);
        for &(position, size) in &self.carriers {
            if remaining < size {
                return (position, remaining);
            }
            remaining -= size;
        }
        unreachable!("slot offset beyond carrier range")
    }

    /// Global byte offset of slot `k` within the carrier concatenation.
    ///
    /// When capacity exactly matches the requirement the stride rounds to
    /// zero and slots pack sequentially from the first byte instead.
    fn global_offset(&self, k: usize) -> usize {
        if self.stride == 0 {
            k
        } else {
            self.stride * (k + 1)
        }
    }
}
