//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding frames from files and
//! data slices. Decoding is split across three seams:
//!
//! - a [`Cursor`] supplying bytes in order,
//! - a [`Decompress`] implementation for compressed payloads,
//! - a [`Schema`] turning payload bytes into messages.
//!
//! A [`FrameDecoder`] ties the latter two together and decodes one frame per
//! call from any cursor. [`decode_slice`] and [`decode_reader`] also validate
//! the document header and return a [`Frames`] iterator.

use alloc::vec::Vec;
use core::convert::Infallible;

use thiserror::Error as ThisError;

use crate::sans::dispatch::PayloadClass;

pub mod error;
pub mod frame;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
#[cfg(feature = "snappy")]
pub mod snappy;

pub use error::{BoxError, Error, Field};
pub use frame::{Frame, FrameDecoder, Frames, read_header, seek_last_frame};
#[cfg(feature = "std")]
pub use reader::{ReaderCursor, decode as decode_reader};
pub use slice::{SliceCursor, decode as decode_slice};
#[cfg(feature = "snappy")]
pub use snappy::Snappy;

/// Errors produced by a [`Cursor`].
#[derive(Debug, ThisError)]
pub enum CursorError {
    /// Fewer bytes remain than were requested.
    #[error("Wanted {wanted} bytes, found {available}.")]
    Truncated { wanted: usize, available: usize },
    /// No bytes remain.
    #[error("Reached the end of the stream.")]
    EndOfStream,
    /// An error from the underlying reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An ordered, forward-only source of bytes.
///
/// Every successful read or skip advances [`Cursor::position`]. A failed
/// operation may leave the cursor anywhere, and decoding should stop.
pub trait Cursor {
    /// Take exactly `n` bytes, or fail with [`CursorError::Truncated`].
    fn read_exact(&mut self, n: usize) -> Result<&[u8], CursorError>;
    /// Look at the next `n` bytes without consuming them, or fail with
    /// [`CursorError::EndOfStream`].
    fn peek(&mut self, n: usize) -> Result<&[u8], CursorError>;
    /// Discard exactly `n` bytes, or fail with [`CursorError::Truncated`].
    fn skip(&mut self, n: usize) -> Result<(), CursorError>;
    /// Take a single byte, or fail with [`CursorError::EndOfStream`].
    fn read_byte(&mut self) -> Result<u8, CursorError>;
    /// Number of bytes consumed since the start of the stream.
    fn position(&self) -> u64;

    /// Whether no bytes remain.
    fn is_at_end(&mut self) -> Result<bool, CursorError> {
        match self.peek(1) {
            Ok(_) => Ok(false),
            Err(CursorError::EndOfStream) => Ok(true),
            Err(err) => Err(err),
        }
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn read_exact(&mut self, n: usize) -> Result<&[u8], CursorError> {
        (**self).read_exact(n)
    }
    fn peek(&mut self, n: usize) -> Result<&[u8], CursorError> {
        (**self).peek(n)
    }
    fn skip(&mut self, n: usize) -> Result<(), CursorError> {
        (**self).skip(n)
    }
    fn read_byte(&mut self) -> Result<u8, CursorError> {
        (**self).read_byte()
    }
    fn position(&self) -> u64 {
        (**self).position()
    }
    fn is_at_end(&mut self) -> Result<bool, CursorError> {
        (**self).is_at_end()
    }
}

/// Decode payload bytes into messages.
///
/// Only called for recognised, non-embedded payload classes, with
/// decompressed bytes.
pub trait Schema {
    /// The decoded message.
    type Message;
    /// An error decoding a payload.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Decode a payload of the given class.
    fn decode(&self, class: PayloadClass, r: &[u8]) -> Result<Self::Message, Self::Error>;
}

/// Decompress block-compressed payloads.
pub trait Decompress {
    /// An error decompressing a payload.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Decompress a payload.
    fn decompress(&self, r: &[u8]) -> Result<Vec<u8>, Self::Error>;
}

/// A [`Schema`] passing payload bytes through undecoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSchema;

/// A payload passed through by [`RawSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub class: PayloadClass,
    pub data: Vec<u8>,
}

impl Schema for RawSchema {
    type Message = RawMessage;
    type Error = Infallible;

    fn decode(&self, class: PayloadClass, r: &[u8]) -> Result<RawMessage, Infallible> {
        Ok(RawMessage {
            class,
            data: r.to_vec(),
        })
    }
}
