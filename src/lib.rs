//! Two-pass RGB565 quantizer to a fixed 192-color palette.
//!
//! Pass 1 counts pixels into 4096 fine buckets (top 4 bits per channel).
//! Synthesis gives the 128 most populated fine buckets their own palette
//! slots and averages the remaining pixels into 64 coarse buckets (top 2
//! bits per channel) for slots 128..192. Pass 2 maps each pixel to the slot
//! of its fine bucket, or of its coarse bucket when the fine one has none.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bucket;
pub mod error;
pub mod histogram;
pub mod palette;
pub mod pixel;
pub mod remap;

pub use error::QuantizeError;
pub use histogram::{Bucket, FineHistogram};
pub use palette::{PALETTE_SIZE, Palette, Synthesis};
pub use remap::PaletteMap;

use alloc::vec::Vec;

/// Byte order of packed pixels in a raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Configuration for the two-pass drivers.
#[derive(Debug, Clone, Default)]
pub struct QuantizeConfig {
    /// Byte order used by [`quantize_bytes`].
    pub byte_order: ByteOrder,
    /// Added to every output index, for targets whose first color
    /// registers are reserved. `index_offset + 191` must fit a byte.
    pub index_offset: u8,
}

impl QuantizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    pub fn index_offset(mut self, offset: u8) -> Self {
        self.index_offset = offset;
        self
    }
}

/// Quantization result.
#[derive(Debug)]
pub struct QuantizeResult {
    palette: Palette,
    indices: Vec<u8>,
}

impl QuantizeResult {
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// One index per input pixel, already shifted by the configured offset.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    pub fn into_parts(self) -> (Palette, Vec<u8>) {
        (self.palette, self.indices)
    }
}

/// Quantize a `width`×`height` RGB565 image.
///
/// Empty images are accepted: every general slot then takes its fallback
/// color and the specific slots are black.
pub fn quantize(
    pixels: &[u16],
    width: usize,
    height: usize,
    config: &QuantizeConfig,
) -> Result<QuantizeResult, QuantizeError> {
    validate_inputs(pixels.len(), width, height, config)?;

    // 1. Histogram
    let hist = FineHistogram::from_pixels(pixels);

    // 2. Palette and fine-bucket map
    let Synthesis { palette, map, .. } = hist.synthesize();

    // 3. Remap
    let indices = map.remap_pixels(pixels, config.index_offset)?;

    Ok(QuantizeResult { palette, indices })
}

/// Quantize an image given as packed 16-bit pixels in a byte buffer, two
/// bytes per pixel in `config.byte_order`.
pub fn quantize_bytes(
    data: &[u8],
    width: usize,
    height: usize,
    config: &QuantizeConfig,
) -> Result<QuantizeResult, QuantizeError> {
    if data.len() % 2 != 0 {
        return Err(QuantizeError::OddByteLength(data.len()));
    }
    let pixels = pixel::decode_bytes(data, config.byte_order == ByteOrder::Big);
    quantize(&pixels, width, height, config)
}

fn validate_inputs(
    pixel_count: usize,
    width: usize,
    height: usize,
    config: &QuantizeConfig,
) -> Result<(), QuantizeError> {
    if width.checked_mul(height) != Some(pixel_count) {
        return Err(QuantizeError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    remap::check_index_offset(config.index_offset)
}
