extern crate alloc;
use alloc::vec::Vec;

use crate::bucket::{COARSE_BUCKETS, coarse_fields, coarse_index_of_fine};
use crate::histogram::{CoarseHistogram, FineHistogram};
use crate::remap::PaletteMap;

/// Slots 0..128: one color per top-ranked fine bucket.
pub const SPECIFIC_COLORS: usize = 128;
/// Slots 128..192: one color per coarse bucket.
pub const GENERAL_COLORS: usize = COARSE_BUCKETS;
/// Total palette size.
pub const PALETTE_SIZE: usize = SPECIFIC_COLORS + GENERAL_COLORS;

/// Multiplier applied to the 2-bit fields of an empty coarse bucket's id.
const FALLBACK_SCALE: u8 = 16;

/// A fixed 192-entry palette.
///
/// Channel values are on the histogram's scale (red and blue 0..=62,
/// green 0..=63), not 0..=255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [[u8; 3]; PALETTE_SIZE],
}

impl Palette {
    fn black() -> Self {
        Self {
            entries: [[0; 3]; PALETTE_SIZE],
        }
    }

    pub fn entries(&self) -> &[[u8; 3]; PALETTE_SIZE] {
        &self.entries
    }

    /// Colors of slots 0..128.
    pub fn specific(&self) -> &[[u8; 3]] {
        &self.entries[..SPECIFIC_COLORS]
    }

    /// Colors of slots 128..192, indexed by coarse id.
    pub fn general(&self) -> &[[u8; 3]] {
        &self.entries[SPECIFIC_COLORS..]
    }

    pub fn len(&self) -> usize {
        PALETTE_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_rgb(&self) -> Vec<rgb::RGB8> {
        self.entries
            .iter()
            .map(|&[r, g, b]| rgb::RGB8 { r, g, b })
            .collect()
    }

    /// Entries flattened to `R, G, B, R, G, B, ...` (576 bytes), the order a
    /// sequential color-register upload expects.
    pub fn to_flat(&self) -> Vec<u8> {
        self.entries.iter().flatten().copied().collect()
    }
}

/// Output of palette synthesis: the palette plus the fine-bucket map used
/// by the second pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub palette: Palette,
    pub map: PaletteMap,
    /// General slots that had no pixels and took the id-derived color.
    pub fallback_slots: usize,
}

/// Fallback color for an empty coarse bucket, derived from its id alone.
pub fn fallback_color(coarse: usize) -> [u8; 3] {
    coarse_fields(coarse).map(|field| field * FALLBACK_SCALE)
}

/// Build the 192-color palette and fine→slot map from a filled histogram.
///
/// The 128 most populated fine buckets get slots 0..128 in rank order,
/// including zero-count buckets when fewer than 128 are occupied; those
/// slots stay black. Every other occupied fine bucket is folded into the
/// coarse bucket named by the top two bits of each channel of its id, and
/// each coarse bucket's average becomes slot `128 + coarse_id`.
pub fn synthesize(hist: &FineHistogram) -> Synthesis {
    let ranked = hist.ranked();
    let mut palette = Palette::black();
    let mut map = PaletteMap::unassigned();

    for (slot, &fine) in ranked.iter().take(SPECIFIC_COLORS).enumerate() {
        if let Some(color) = hist.bucket(fine).average() {
            palette.entries[slot] = color;
        }
        map.assign(fine, slot as u8);
    }

    let mut coarse = CoarseHistogram::new();
    for &fine in ranked[SPECIFIC_COLORS..]
        .iter()
        .take_while(|&&fine| hist.bucket(fine).matches != 0)
    {
        coarse.fold(coarse_index_of_fine(fine), hist.bucket(fine));
    }

    let mut fallback_slots = 0;
    for (id, bucket) in coarse.buckets().iter().enumerate() {
        palette.entries[SPECIFIC_COLORS + id] = match bucket.average() {
            Some(color) => color,
            None => {
                fallback_slots += 1;
                fallback_color(id)
            }
        };
    }

    log::debug!(
        "palette: {} specific slots backed by pixels, {} general slots on fallback",
        ranked
            .iter()
            .take(SPECIFIC_COLORS)
            .filter(|&&fine| hist.bucket(fine).matches != 0)
            .count(),
        fallback_slots
    );

    Synthesis {
        palette,
        map,
        fallback_slots,
    }
}

impl FineHistogram {
    /// Run palette synthesis on this histogram. The histogram is not
    /// modified, so repeated calls give identical results.
    pub fn synthesize(&self) -> Synthesis {
        synthesize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{FINE_BUCKETS, fine_index};

    #[test]
    fn fallback_colors_are_distinct() {
        let mut colors: Vec<[u8; 3]> = (0..COARSE_BUCKETS).map(fallback_color).collect();
        assert_eq!(colors[0], [0, 0, 0]);
        assert_eq!(colors[63], [48, 48, 48]);
        assert_eq!(colors[0b10_01_11], [32, 16, 48]);
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), COARSE_BUCKETS);
    }

    #[test]
    fn empty_histogram_gives_black_and_fallback() {
        let synthesis = FineHistogram::new().synthesize();
        assert!(synthesis.palette.specific().iter().all(|c| *c == [0, 0, 0]));
        for (id, color) in synthesis.palette.general().iter().enumerate() {
            assert_eq!(*color, fallback_color(id));
        }
        assert_eq!(synthesis.fallback_slots, GENERAL_COLORS);
        // zero-count buckets still claim the 128 specific slots
        let assigned = (0..FINE_BUCKETS)
            .filter(|&fine| synthesis.map.slot(fine).is_some())
            .count();
        assert_eq!(assigned, SPECIFIC_COLORS);
    }

    #[test]
    fn ranked_buckets_take_slots_in_order() {
        let mut pixels: Vec<u16> = Vec::new();
        pixels.extend([0x0000; 3]);
        pixels.extend([0xFFFF; 7]);
        pixels.extend([0x07E0; 5]);
        let synthesis = FineHistogram::from_pixels(&pixels).synthesize();
        assert_eq!(synthesis.map.slot(fine_index(0xFFFF)), Some(0));
        assert_eq!(synthesis.map.slot(fine_index(0x07E0)), Some(1));
        assert_eq!(synthesis.map.slot(fine_index(0x0000)), Some(2));
        assert_eq!(synthesis.palette.entries()[0], [62, 63, 62]);
        assert_eq!(synthesis.palette.entries()[1], [0, 63, 0]);
        assert_eq!(synthesis.palette.entries()[2], [0, 0, 0]);
    }

    #[test]
    fn overflow_buckets_fold_into_coarse_tier() {
        // 129 occupied fine buckets with distinct counts; the least populated
        // one falls past the specific slots.
        let mut pixels = Vec::new();
        for fine in 0..129u16 {
            let r4 = fine >> 8;
            let g4 = (fine >> 4) & 0xF;
            let b4 = fine & 0xF;
            let pixel = (r4 << 12) | (g4 << 7) | (b4 << 1);
            pixels.extend(core::iter::repeat(pixel).take(200 - fine as usize));
        }
        let hist = FineHistogram::from_pixels(&pixels);
        let synthesis = hist.synthesize();

        // fine id 128 = r4 0, g4 8, b4 0 -> coarse (0, 2, 0)
        assert_eq!(synthesis.map.slot(128), None);
        let coarse = coarse_index_of_fine(128);
        assert_eq!(coarse, 0b00_10_00);
        assert_eq!(synthesis.palette.general()[coarse], [0, 32, 0]);
        assert_eq!(synthesis.fallback_slots, GENERAL_COLORS - 1);
    }

    #[test]
    fn synthesis_is_idempotent() {
        let pixels: Vec<u16> = (0..50_000u32).map(|i| (i * i % 65521) as u16).collect();
        let hist = FineHistogram::from_pixels(&pixels);
        assert_eq!(hist.synthesize(), hist.synthesize());
    }

    #[test]
    fn flat_layout() {
        let synthesis = FineHistogram::from_pixels(&[0xFFFF]).synthesize();
        let flat = synthesis.palette.to_flat();
        assert_eq!(flat.len(), PALETTE_SIZE * 3);
        assert_eq!(&flat[..3], &[62, 63, 62]);
        assert_eq!(synthesis.palette.to_rgb()[0], rgb::RGB8 { r: 62, g: 63, b: 62 });
    }
}
