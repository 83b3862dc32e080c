//! Snappy payload decompression.
//!
//! _Requires Cargo feature `snappy`._

use alloc::vec::Vec;

use thiserror::Error;

use crate::MAX_PAYLOAD_SIZE_BYTES;

use super::Decompress;

/// Errors occurring while decompressing a payload.
#[derive(Debug, Error)]
pub enum SnappyError {
    /// Not valid raw Snappy data.
    #[error(transparent)]
    Codec(#[from] snap::Error),
    /// The declared decompressed length exceeds the configured limit.
    #[error("Decompressed length {len} exceeds the limit of {limit} bytes.")]
    TooLarge { len: usize, limit: usize },
}

/// A [`Decompress`] implementation for raw (unframed) Snappy blocks.
///
/// _Requires Cargo feature `snappy`._
#[derive(Debug, Clone, Copy)]
pub struct Snappy {
    max_len: usize,
}

impl Snappy {
    /// Limit the decompressed length of a single payload.
    ///
    /// The length is read from the block preamble and checked before any
    /// memory is allocated.
    pub fn with_max_len(mut self, limit: usize) -> Self {
        self.max_len = limit;
        self
    }
}

impl Default for Snappy {
    fn default() -> Self {
        Self {
            max_len: MAX_PAYLOAD_SIZE_BYTES as usize,
        }
    }
}

impl Decompress for Snappy {
    type Error = SnappyError;

    fn decompress(&self, r: &[u8]) -> Result<Vec<u8>, SnappyError> {
        let len = snap::raw::decompress_len(r)?;

        if len > self.max_len {
            Err(SnappyError::TooLarge {
                len,
                limit: self.max_len,
            })?;
        }

        Ok(snap::raw::Decoder::new().decompress_vec(r)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_block() {
        let original = b"file header, file header, file header";
        let compressed = snap::raw::Encoder::new().compress_vec(original).unwrap();

        let decompressed = Snappy::default().decompress(&compressed).unwrap();
        assert_eq!(&decompressed, original);
    }

    #[test]
    fn empty_block() {
        let compressed = snap::raw::Encoder::new().compress_vec(&[]).unwrap();

        assert!(Snappy::default().decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn invalid_block() {
        // Preamble declares 16 bytes, followed by a truncated literal.
        assert!(matches!(
            Snappy::default().decompress(&[0x10, 0x3C, b'a']),
            Err(SnappyError::Codec(_))
        ));
    }

    #[test]
    fn bomb_protection() {
        let compressed = snap::raw::Encoder::new().compress_vec(&[0; 4096]).unwrap();

        assert!(matches!(
            Snappy::default().with_max_len(1024).decompress(&compressed),
            Err(SnappyError::TooLarge {
                len: 4096,
                limit: 1024
            })
        ));
    }
}
