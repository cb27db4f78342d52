extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::bucket::{FINE_BUCKETS, coarse_index, fine_index};
use crate::error::QuantizeError;
use crate::palette::{PALETTE_SIZE, SPECIFIC_COLORS};

/// Reject offsets that would push slot 191 past index 255.
pub(crate) fn check_index_offset(index_offset: u8) -> Result<(), QuantizeError> {
    if usize::from(index_offset) + PALETTE_SIZE > 256 {
        return Err(QuantizeError::InvalidIndexOffset(index_offset));
    }
    Ok(())
}

/// Map from fine bucket id to its specific palette slot, if it has one.
///
/// Only produced by palette synthesis, so a lookup always sees a finished
/// map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteMap {
    slots: Vec<Option<u8>>,
}

impl PaletteMap {
    pub(crate) fn unassigned() -> Self {
        Self {
            slots: vec![None; FINE_BUCKETS],
        }
    }

    pub(crate) fn assign(&mut self, fine: usize, slot: u8) {
        debug_assert!((slot as usize) < SPECIFIC_COLORS);
        self.slots[fine] = Some(slot);
    }

    /// Specific slot of a fine bucket, or `None` when it falls back to the
    /// coarse tier.
    pub fn slot(&self, fine: usize) -> Option<u8> {
        self.slots[fine]
    }

    /// Palette slot in `0..192` for a pixel.
    ///
    /// Pixels whose fine bucket has no specific slot get the general slot of
    /// their coarse bucket, computed from the pixel itself.
    #[inline]
    pub fn lookup(&self, pixel: u16) -> u8 {
        match self.slots[fine_index(pixel)] {
            Some(slot) => slot,
            None => (SPECIFIC_COLORS + coarse_index(pixel)) as u8,
        }
    }

    /// Second pass: map every pixel to its slot plus `index_offset`.
    ///
    /// Fails with [`QuantizeError::InvalidIndexOffset`] when `index_offset + 191`
    /// does not fit a byte.
    pub fn remap_pixels(
        &self,
        pixels: &[u16],
        index_offset: u8,
    ) -> Result<Vec<u8>, QuantizeError> {
        check_index_offset(index_offset)?;
        let indices: Vec<u8> = pixels
            .iter()
            .map(|&pixel| self.lookup(pixel) + index_offset)
            .collect();
        log::trace!("remapped {} pixels (offset {})", indices.len(), index_offset);
        Ok(indices)
    }
}
