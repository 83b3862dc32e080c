//! Frame decoding over any cursor.

use alloc::boxed::Box;
use core::iter::FusedIterator;

use either::Either::{self, Left, Right};
use tracing::{debug, trace, warn};

use crate::{
    MAX_PAYLOAD_SIZE_BYTES,
    sans::{
        Decoder,
        dispatch::{Kind, PayloadClass},
        frame::{FrameHeader, FrameInfo, FrameSize, FrameTick},
        varint::VarintError,
    },
};

use super::{Cursor, Decompress, Error, Field, Schema};

/// A single decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<M> {
    /// Raw kind, including the compression flag.
    pub kind: Kind,
    /// Simulation tick, zero when unset.
    pub tick: u32,
    /// Declared payload length in bytes.
    pub size: u32,
    /// The decoded message, absent for embedded and unknown payloads.
    pub message: Option<M>,
    /// Whether the payload holds nested data and was skipped.
    pub is_embedded: bool,
}

impl<M> Frame<M> {
    pub fn class(&self) -> PayloadClass {
        self.kind.class()
    }

    pub fn is_compressed(&self) -> bool {
        self.kind.is_compressed()
    }
}

/// Validate the document header at the start of a cursor.
///
/// Returns the offset of the final frame from the start of the document.
pub fn read_header<C: Cursor + ?Sized>(cursor: &mut C) -> Result<u64, Error> {
    let state = Decoder::advance(take(cursor, Field::Signature)?)?;
    let (offset, _) = state.advance(take(cursor, Field::LastFrameOffset)?);

    debug!(offset, "validated demo header");

    Ok(u64::from(offset))
}

/// Skip forward to the final frame of a document.
///
/// The cursor must not have passed `offset`, as returned by [`read_header`].
pub fn seek_last_frame<C: Cursor + ?Sized>(cursor: &mut C, offset: u64) -> Result<(), Error> {
    let position = cursor.position();
    let mut n = offset
        .checked_sub(position)
        .ok_or(Error::OffsetBehind { offset, position })?;

    while n != 0 {
        let step = usize::try_from(n).unwrap_or(usize::MAX);

        cursor
            .skip(step)
            .map_err(|err| Error::from_cursor(err, Field::LastFrameOffset))?;

        n -= step as u64;
    }

    Ok(())
}

/// Decodes frames, delegating payloads to a schema and decompressor.
#[derive(Debug, Clone)]
pub struct FrameDecoder<S, D> {
    schema: S,
    codec: D,
    max_payload_size: u32,
}

impl<S, D> FrameDecoder<S, D> {
    pub fn new(schema: S, codec: D) -> Self {
        Self {
            schema,
            codec,
            max_payload_size: MAX_PAYLOAD_SIZE_BYTES,
        }
    }

    /// Limit the payload bytes read into memory for a single frame.
    ///
    /// Larger payloads are skipped, and reported as
    /// [`Error::PayloadTooLarge`]. Embedded payloads are never read, so the
    /// limit does not apply to them.
    pub fn with_max_payload_size(mut self, limit: u32) -> Self {
        self.max_payload_size = limit;
        self
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn codec(&self) -> &D {
        &self.codec
    }
}

#[cfg(all(feature = "proto", feature = "snappy"))]
impl Default for FrameDecoder<crate::proto::DemoSchema, super::Snappy> {
    fn default() -> Self {
        Self::new(crate::proto::DemoSchema, super::Snappy::default())
    }
}

impl<S: Schema, D: Decompress> FrameDecoder<S, D> {
    /// Decode the next frame from a cursor positioned at a frame boundary.
    ///
    /// Returns `None` if the cursor is cleanly exhausted. On success, and on
    /// any error for which [`Error::is_fatal`] is false, the cursor is left
    /// at the next frame boundary.
    pub fn decode_next<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
    ) -> Result<Option<Frame<S::Message>>, Error> {
        if cursor
            .is_at_end()
            .map_err(|err| Error::from_cursor(err, Field::Kind))?
        {
            debug!(position = cursor.position(), "reached end of frame stream");
            return Ok(None);
        }

        let state = varint(cursor, Field::Kind, FrameHeader::new(), FrameHeader::advance)?;
        let state = varint(cursor, Field::Tick, state, FrameTick::advance)?;
        let (info, payload) = varint(cursor, Field::Size, state, FrameSize::advance)?;

        let FrameInfo {
            kind,
            tick,
            size,
            class,
            is_embedded,
        } = info;

        trace!(
            kind = kind.base(),
            tick,
            size,
            %class,
            is_embedded,
            compressed = kind.is_compressed(),
            "decoded frame header"
        );

        let frame = |message| Frame {
            kind,
            tick,
            size,
            message,
            is_embedded,
        };

        // Embedded and unrecognised payloads are consumed but never decoded.
        if is_embedded || class == PayloadClass::Unknown {
            skip(cursor, payload.size())?;
            return Ok(Some(frame(None)));
        }

        if size > self.max_payload_size {
            skip(cursor, payload.size())?;
            Err(Error::PayloadTooLarge {
                kind,
                size,
                limit: self.max_payload_size,
            })?;
        }

        let r = cursor
            .read_exact(payload.size() as usize)
            .map_err(|err| Error::from_cursor(err, Field::Payload))?;

        let decompressed;
        let r = if kind.is_compressed() {
            decompressed = self
                .codec
                .decompress(r)
                .map_err(|err| Error::Decompression {
                    kind,
                    source: Box::new(err),
                })?;
            decompressed.as_slice()
        } else {
            r
        };

        let message = self
            .schema
            .decode(class, r)
            .map_err(|err| Error::Schema {
                class,
                source: Box::new(err),
            })?;

        Ok(Some(frame(Some(message))))
    }

    /// Iterate over the frames remaining in a cursor.
    pub fn frames<C: Cursor>(&self, cursor: C) -> Frames<'_, C, S, D> {
        Frames {
            cursor,
            decoder: self,
            last_frame_offset: None,
            done: false,
        }
    }
}

/// An iterator over the frames of a cursor.
///
/// Errors that leave the stream aligned are yielded, and iteration continues
/// with the next frame. Iteration ends after the first fatal error.
#[derive(Debug)]
pub struct Frames<'d, C, S, D> {
    cursor: C,
    decoder: &'d FrameDecoder<S, D>,
    last_frame_offset: Option<u64>,
    done: bool,
}

impl<C, S, D> Frames<'_, C, S, D> {
    pub(super) fn with_last_frame_offset(mut self, offset: u64) -> Self {
        self.last_frame_offset = Some(offset);
        self
    }

    /// The offset of the final frame, if the document header was read.
    pub fn last_frame_offset(&self) -> Option<u64> {
        self.last_frame_offset
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<C: Cursor, S: Schema, D: Decompress> Iterator for Frames<'_, C, S, D> {
    type Item = Result<Frame<S::Message>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.decoder.decode_next(&mut self.cursor) {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                if err.is_fatal() {
                    self.done = true;
                } else {
                    warn!(
                        error = %err,
                        position = self.cursor.position(),
                        "continuing past undecodable frame"
                    );
                }

                Some(Err(err))
            }
        }
    }
}

impl<C: Cursor, S: Schema, D: Decompress> FusedIterator for Frames<'_, C, S, D> {}

/// Take an exact number of bytes from a cursor.
fn take<C: Cursor + ?Sized, const N: usize>(cursor: &mut C, field: Field) -> Result<[u8; N], Error> {
    let r = cursor
        .read_exact(N)
        .map_err(|err| Error::from_cursor(err, field))?;

    let mut buf = [0; N];
    buf.copy_from_slice(r);

    Ok(buf)
}

/// Discard a payload from a cursor.
fn skip<C: Cursor + ?Sized>(cursor: &mut C, size: u32) -> Result<(), Error> {
    cursor
        .skip(size as usize)
        .map_err(|err| Error::from_cursor(err, Field::Payload))
}

/// Drive a variable-length field to completion, a byte at a time.
fn varint<C: Cursor + ?Sized, T, U>(
    cursor: &mut C,
    field: Field,
    mut state: T,
    advance: fn(T, u8) -> Result<Either<T, U>, VarintError>,
) -> Result<U, Error> {
    loop {
        let b = cursor
            .read_byte()
            .map_err(|err| Error::from_cursor(err, field))?;

        state = match advance(state, b).map_err(|_| Error::Overflow(field))? {
            Left(state) => state,
            Right(next) => return Ok(next),
        };
    }
}
