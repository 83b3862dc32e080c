//! Slice-based decoder implementation.

use super::{
    Cursor, CursorError, Decompress, Error, FrameDecoder, Frames, Schema, frame::read_header,
};

/// A [`Cursor`] over an in-memory slice of a document.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a> {
    r: &'a [u8],
    i: usize,
}

impl<'a> SliceCursor<'a> {
    pub const fn new(r: &'a [u8]) -> Self {
        Self { r, i: 0 }
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.r[self.i..]
    }
}

impl Cursor for SliceCursor<'_> {
    fn read_exact(&mut self, n: usize) -> Result<&[u8], CursorError> {
        let remaining = self.remaining();
        let r = remaining.get(..n).ok_or(CursorError::Truncated {
            wanted: n,
            available: remaining.len(),
        })?;

        self.i += n;

        Ok(r)
    }

    fn peek(&mut self, n: usize) -> Result<&[u8], CursorError> {
        self.remaining().get(..n).ok_or(CursorError::EndOfStream)
    }

    fn skip(&mut self, n: usize) -> Result<(), CursorError> {
        self.read_exact(n).map(|_| ())
    }

    fn read_byte(&mut self) -> Result<u8, CursorError> {
        let b = *self.remaining().first().ok_or(CursorError::EndOfStream)?;
        self.i += 1;

        Ok(b)
    }

    fn position(&self) -> u64 {
        self.i as u64
    }
}

/// Validate the header of a document slice, and iterate over its frames.
///
/// This method is also re-exported as `demoreel::avec::decode_slice`.
pub fn decode<'a, 'd, S: Schema, D: Decompress>(
    r: &'a [u8],
    decoder: &'d FrameDecoder<S, D>,
) -> Result<Frames<'d, SliceCursor<'a>, S, D>, Error> {
    let mut cursor = SliceCursor::new(r);
    let offset = read_header(&mut cursor)?;

    Ok(decoder.frames(cursor).with_last_frame_offset(offset))
}
