//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{self, Read};

use alloc::vec::Vec;

use super::{
    Cursor, CursorError, Decompress, Error, FrameDecoder, Frames, Schema, frame::read_header,
};

/// Minimum number of bytes requested from the reader at once.
const CHUNK: usize = 8 * 1024;

/// A [`Cursor`] over any reader of a document.
///
/// Bytes are buffered ahead of the cursor to support peeking, so the reader
/// should not be used directly while wrapped.
///
/// _Requires Cargo feature `std`._
#[derive(Debug)]
pub struct ReaderCursor<R> {
    r: R,
    buf: Vec<u8>,
    head: usize, // Offset of the first unconsumed byte in `buf`.
    position: u64,
}

impl<R: Read> ReaderCursor<R> {
    pub fn new(r: R) -> Self {
        Self {
            r,
            buf: Vec::new(),
            head: 0,
            position: 0,
        }
    }

    /// Unwrap the reader, discarding any buffered bytes.
    pub fn into_inner(self) -> R {
        self.r
    }

    /// Buffer at least `n` unconsumed bytes, unless the reader ends first.
    ///
    /// Returns the number of unconsumed bytes buffered.
    fn fill(&mut self, n: usize) -> io::Result<usize> {
        if self.buf.len() - self.head >= n {
            return Ok(self.buf.len() - self.head);
        }

        self.buf.drain(..self.head);
        self.head = 0;

        while self.buf.len() < n {
            let len = self.buf.len();
            self.buf.resize(len + (n - len).max(CHUNK), 0);

            let read = loop {
                match self.r.read(&mut self.buf[len..]) {
                    Ok(read) => break read,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        self.buf.truncate(len);
                        return Err(err);
                    }
                }
            };

            self.buf.truncate(len + read);

            if read == 0 {
                break;
            }
        }

        Ok(self.buf.len())
    }
}

impl<R: Read> Cursor for ReaderCursor<R> {
    fn read_exact(&mut self, n: usize) -> Result<&[u8], CursorError> {
        let available = self.fill(n)?;

        if available < n {
            Err(CursorError::Truncated {
                wanted: n,
                available,
            })?;
        }

        let s = self.head;
        self.head += n;
        self.position += n as u64;

        Ok(&self.buf[s..s + n])
    }

    fn peek(&mut self, n: usize) -> Result<&[u8], CursorError> {
        if self.fill(n)? < n {
            Err(CursorError::EndOfStream)?;
        }

        Ok(&self.buf[self.head..self.head + n])
    }

    fn skip(&mut self, n: usize) -> Result<(), CursorError> {
        let buffered = self.buf.len() - self.head;

        if n <= buffered {
            self.head += n;
        } else {
            self.buf.clear();
            self.head = 0;

            // Discard the remainder without buffering it.
            let rest = (n - buffered) as u64;
            let copied = io::copy(&mut (&mut self.r).take(rest), &mut io::sink())?;

            if copied < rest {
                Err(CursorError::Truncated {
                    wanted: n,
                    available: buffered + copied as usize,
                })?;
            }
        }

        self.position += n as u64;

        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, CursorError> {
        if self.fill(1)? == 0 {
            Err(CursorError::EndOfStream)?;
        }

        let b = self.buf[self.head];
        self.head += 1;
        self.position += 1;

        Ok(b)
    }

    fn position(&self) -> u64 {
        self.position
    }
}

/// Validate the header of a document reader, and iterate over its frames.
///
/// This method is also re-exported as `demoreel::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<'d, R: Read, S: Schema, D: Decompress>(
    r: R,
    decoder: &'d FrameDecoder<S, D>,
) -> Result<Frames<'d, ReaderCursor<R>, S, D>, Error> {
    let mut cursor = ReaderCursor::new(r);
    let offset = read_header(&mut cursor)?;

    Ok(decoder.frames(cursor).with_last_frame_offset(offset))
}
