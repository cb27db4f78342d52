//! RGB565 pixel layout: bits [15:11] red, [10:5] green, [4:0] blue.

pub const RED_SHIFT: u32 = 11;
pub const GREEN_SHIFT: u32 = 5;
pub const BLUE_SHIFT: u32 = 0;

const FIVE_BIT_MASK: u16 = 0x1F;
const SIX_BIT_MASK: u16 = 0x3F;

/// 5-bit red field.
#[inline]
pub fn red(pixel: u16) -> u16 {
    pixel >> RED_SHIFT
}

/// 6-bit green field.
#[inline]
pub fn green(pixel: u16) -> u16 {
    (pixel >> GREEN_SHIFT) & SIX_BIT_MASK
}

/// 5-bit blue field.
#[inline]
pub fn blue(pixel: u16) -> u16 {
    (pixel >> BLUE_SHIFT) & FIVE_BIT_MASK
}

/// Per-channel values a pixel contributes to a histogram bucket.
///
/// Red and blue are doubled to a 0..=62 range; green keeps its native
/// 0..=63 range. The result is not normalized to 0..=255 and palette
/// entries inherit this scale.
#[inline]
pub fn contribution(pixel: u16) -> [u64; 3] {
    [
        u64::from(red(pixel)) * 2,
        u64::from(green(pixel)),
        u64::from(blue(pixel)) * 2,
    ]
}

/// Pack an 8-bit RGB color into RGB565 by truncating the low bits.
#[inline]
pub fn pack_rgb8(color: rgb::RGB8) -> u16 {
    (u16::from(color.r >> 3) << RED_SHIFT)
        | (u16::from(color.g >> 2) << GREEN_SHIFT)
        | (u16::from(color.b >> 3) << BLUE_SHIFT)
}

/// Decode little- or big-endian packed pixels from a byte buffer.
///
/// A trailing odd byte is ignored; callers validate the length first.
pub(crate) fn decode_bytes(data: &[u8], big_endian: bool) -> alloc::vec::Vec<u16> {
    data.chunks_exact(2)
        .map(|pair| {
            let bytes = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(bytes)
            } else {
                u16::from_le_bytes(bytes)
            }
        })
        .collect()
}
