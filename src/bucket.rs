//! Bucket ids derived from the most-significant bits of each channel.
//!
//! A fine id keeps the top 4 bits of red, green and blue (`r4 << 8 | g4 << 4 | b4`).
//! A coarse id keeps the top 2 bits (`r2 << 4 | g2 << 2 | b2`). The coarse
//! bits are a prefix of the fine bits, so a coarse id can be computed from
//! either the pixel or its fine id; [`coarse_index_of_fine`] and
//! [`coarse_index`] must agree for every pixel.

use crate::pixel::{BLUE_SHIFT, GREEN_SHIFT, RED_SHIFT};

/// Number of fine buckets (4 bits per channel).
pub const FINE_BUCKETS: usize = 4096;
/// Number of coarse buckets (2 bits per channel).
pub const COARSE_BUCKETS: usize = 64;

const FOUR_BIT_MASK: u16 = 0xF;
const TWO_BIT_MASK: u16 = 0x3;

/// Fine bucket id in `0..4096`.
#[inline]
pub fn fine_index(pixel: u16) -> usize {
    let r4 = pixel >> (RED_SHIFT + 1);
    let g4 = (pixel >> (GREEN_SHIFT + 2)) & FOUR_BIT_MASK;
    let b4 = (pixel >> (BLUE_SHIFT + 1)) & FOUR_BIT_MASK;
    usize::from(r4 * 256 + g4 * 16 + b4)
}

/// Coarse bucket id in `0..64`, taken from the raw pixel.
#[inline]
pub fn coarse_index(pixel: u16) -> usize {
    let r2 = pixel >> (RED_SHIFT + 3);
    let g2 = (pixel >> (GREEN_SHIFT + 4)) & TWO_BIT_MASK;
    let b2 = (pixel >> (BLUE_SHIFT + 3)) & TWO_BIT_MASK;
    usize::from(r2 * 16 + g2 * 4 + b2)
}

/// Coarse bucket id in `0..64`, taken from a fine bucket id.
///
/// `fine` must be below 4096; debug builds panic otherwise.
#[inline]
pub fn coarse_index_of_fine(fine: usize) -> usize {
    debug_assert!(fine < FINE_BUCKETS, "fine bucket id {fine} out of range");
    let fine = fine as u16;
    let r2 = (fine >> 10) & TWO_BIT_MASK;
    let g2 = (fine >> 6) & TWO_BIT_MASK;
    let b2 = (fine >> 2) & TWO_BIT_MASK;
    usize::from(r2 * 16 + g2 * 4 + b2)
}

/// Split a coarse id back into its 2-bit `[r, g, b]` fields.
///
/// `coarse` must be below 64; debug builds panic otherwise.
#[inline]
pub fn coarse_fields(coarse: usize) -> [u8; 3] {
    debug_assert!(coarse < COARSE_BUCKETS, "coarse bucket id {coarse} out of range");
    let coarse = coarse as u8;
    [(coarse >> 4) & 0x3, (coarse >> 2) & 0x3, coarse & 0x3]
}
