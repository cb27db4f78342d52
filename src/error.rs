use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantizeError {
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("packed pixel buffer must have an even length, got {0}")]
    OddByteLength(usize),

    #[error("index offset {0} leaves no room for 192 palette slots")]
    InvalidIndexOffset(u8),
}
