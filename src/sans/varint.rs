//! States processing unsigned variable-length integers.
//!
//! Each byte contributes its low seven bits, least significant group first.
//! A set high bit marks a continuation byte.

use core::marker::PhantomData;

use either::Either::{self, Left, Right};
use thiserror::Error;

/// An error advancing over a variable-length integer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// The encoded value does not fit the target width.
    #[error("Variable-length integer overflows its target width.")]
    Overflow,
}

/// State token accumulating a variable-length integer of width `W`.
#[derive(Debug)]
pub struct Varint<W> {
    value: u64,
    shift: u32,
    _phantom: PhantomData<W>,
}

impl<W: Width> Varint<W> {
    /// Begin accumulating a new integer.
    pub const fn new() -> Self {
        Self {
            value: 0,
            shift: 0,
            _phantom: PhantomData,
        }
    }

    /// Transition to another state by decoding a single byte.
    ///
    /// Returns the decoded integer once a terminal byte is seen, or a
    /// successor state awaiting the next byte.
    pub fn advance(self, b: u8) -> Result<Either<Self, W::Into>, VarintError> {
        let bits = u64::from(b & 0x7F);
        let more = b & 0x80 != 0;

        // Bits of the target width not yet filled by earlier bytes.
        let room = W::BITS - self.shift;

        if (room < 7 && bits >> room != 0) || (room <= 7 && more) {
            Err(VarintError::Overflow)?;
        }

        let value = self.value | bits << self.shift;

        Ok(if more {
            Left(Self {
                value,
                shift: self.shift + 7,
                _phantom: PhantomData,
            })
        } else {
            Right(W::from(value))
        })
    }
}

impl<W: Width> Default for Varint<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Target width of a variable-length integer.
pub trait Width {
    /// The primitive produced by decoding.
    type Into;
    /// Number of value bits in the primitive.
    const BITS: u32;
    /// Maximum number of encoded bytes.
    const MAX_LEN: usize = Self::BITS.div_ceil(7) as usize;

    /// Narrow an accumulated value known to fit this width.
    fn from(value: u64) -> Self::Into;
}

macro_rules! width {
    ($t:ident, $into:ident, $(#[$attr:meta])*) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $t;

        impl Width for $t {
            type Into = $into;
            const BITS: u32 = $into::BITS;

            fn from(value: u64) -> Self::Into {
                value as $into
            }
        }
    };
}

width!(U32, u32, /** 32-bit varint, at most five bytes. */);
width!(U64, u64, /** 64-bit varint, at most ten bytes. */);

/// Decode a variable-length integer from the start of a slice.
///
/// Returns the value and the number of bytes it occupied, or `None` if the
/// slice ends mid-sequence.
pub fn decode<W: Width>(r: &[u8]) -> Result<Option<(W::Into, usize)>, VarintError> {
    let mut state = Varint::<W>::new();

    for (i, b) in r.iter().enumerate() {
        state = match state.advance(*b)? {
            Left(state) => state,
            Right(value) => return Ok(Some((value, i + 1))),
        };
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte() {
        assert_eq!(decode::<U32>(&[0x00]), Ok(Some((0, 1))));
        assert_eq!(decode::<U32>(&[0x7F]), Ok(Some((127, 1))));
    }

    #[test]
    fn multi_byte() {
        assert_eq!(decode::<U32>(&[0xAC, 0x02]), Ok(Some((300, 2))));
        assert_eq!(
            decode::<U32>(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
            Ok(Some((u32::MAX, 5)))
        );
    }

    #[test]
    fn trailing_bytes_untouched() {
        assert_eq!(decode::<U32>(&[0x01, 0xFF, 0xFF]), Ok(Some((1, 1))));
    }

    #[test]
    fn incomplete() {
        assert_eq!(decode::<U32>(&[]), Ok(None));
        assert_eq!(decode::<U32>(&[0x80, 0x80]), Ok(None));
    }

    #[test]
    fn overflow_32() {
        // Terminal fifth byte carrying more than four bits.
        assert_eq!(
            decode::<U32>(&[0xFF, 0xFF, 0xFF, 0xFF, 0x10]),
            Err(VarintError::Overflow)
        );
        // Continuation on the fifth byte.
        assert_eq!(
            decode::<U32>(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00]),
            Err(VarintError::Overflow)
        );
    }

    #[test]
    fn overflow_64() {
        let mut max = [0xFF; 10];
        max[9] = 0x01;
        assert_eq!(decode::<U64>(&max), Ok(Some((u64::MAX, 10))));

        max[9] = 0x02;
        assert_eq!(decode::<U64>(&max), Err(VarintError::Overflow));
    }

    #[test]
    fn max_len() {
        assert_eq!(U32::MAX_LEN, 5);
        assert_eq!(U64::MAX_LEN, 10);
    }
}
