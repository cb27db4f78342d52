extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::bucket::{COARSE_BUCKETS, FINE_BUCKETS, fine_index};
use crate::pixel::contribution;

/// A histogram bucket: pixel count and summed scaled channel values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    /// Number of pixels that fell into this bucket
    pub matches: u64,
    /// Sum of doubled 5-bit red values
    pub red_sum: u64,
    /// Sum of 6-bit green values
    pub green_sum: u64,
    /// Sum of doubled 5-bit blue values
    pub blue_sum: u64,
}

impl Bucket {
    /// Integer-truncated average color, or `None` for an empty bucket.
    pub fn average(&self) -> Option<[u8; 3]> {
        if self.matches == 0 {
            return None;
        }
        // Averages of values in 0..=63 always fit a byte.
        Some([
            (self.red_sum / self.matches) as u8,
            (self.green_sum / self.matches) as u8,
            (self.blue_sum / self.matches) as u8,
        ])
    }

    fn add_pixel(&mut self, pixel: u16) {
        let [r, g, b] = contribution(pixel);
        self.matches += 1;
        self.red_sum += r;
        self.green_sum += g;
        self.blue_sum += b;
    }

    fn merge(&mut self, other: &Bucket) {
        self.matches += other.matches;
        self.red_sum += other.red_sum;
        self.green_sum += other.green_sum;
        self.blue_sum += other.blue_sum;
    }
}

/// Pass-1 histogram over the 4096 fine buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FineHistogram {
    buckets: Vec<Bucket>,
}

impl Default for FineHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl FineHistogram {
    /// An empty histogram with every counter at zero.
    pub fn new() -> Self {
        Self {
            buckets: vec![Bucket::default(); FINE_BUCKETS],
        }
    }

    /// Build a histogram from a full pass over `pixels`.
    pub fn from_pixels(pixels: &[u16]) -> Self {
        let mut hist = Self::new();
        hist.accumulate_all(pixels);
        log::debug!(
            "fine histogram: {} pixels in {} occupied buckets",
            pixels.len(),
            hist.occupied()
        );
        hist
    }

    /// Count one pixel.
    #[inline]
    pub fn accumulate(&mut self, pixel: u16) {
        self.buckets[fine_index(pixel)].add_pixel(pixel);
    }

    pub fn accumulate_all(&mut self, pixels: &[u16]) {
        for &pixel in pixels {
            self.accumulate(pixel);
        }
    }

    /// Bucket by fine id. Panics if `fine >= 4096`.
    pub fn bucket(&self, fine: usize) -> &Bucket {
        &self.buckets[fine]
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Sum of match counts over all buckets.
    pub fn total_matches(&self) -> u64 {
        self.buckets.iter().map(|b| b.matches).sum()
    }

    /// Number of buckets with at least one pixel.
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| b.matches > 0).count()
    }

    /// Fine ids ordered by match count, descending. Order among equal
    /// counts is unspecified.
    pub fn ranked(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = (0..FINE_BUCKETS).collect();
        ids.sort_unstable_by(|&a, &b| self.buckets[b].matches.cmp(&self.buckets[a].matches));
        ids
    }
}

impl Extend<u16> for FineHistogram {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for pixel in iter {
            self.accumulate(pixel);
        }
    }
}

/// The 64-bucket histogram that collects fine buckets left out of the
/// specific colors. Only lives for the duration of one synthesis.
#[derive(Debug, Clone)]
pub(crate) struct CoarseHistogram {
    buckets: [Bucket; COARSE_BUCKETS],
}

impl CoarseHistogram {
    pub(crate) fn new() -> Self {
        Self {
            buckets: [Bucket::default(); COARSE_BUCKETS],
        }
    }

    pub(crate) fn fold(&mut self, coarse: usize, fine: &Bucket) {
        self.buckets[coarse].merge(fine);
    }

    pub(crate) fn buckets(&self) -> &[Bucket; COARSE_BUCKETS] {
        &self.buckets
    }
}
