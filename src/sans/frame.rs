//! States processing frame headers.

use either::Either::{self, Left, Right};

use crate::TICK_UNSET;

use super::{
    dispatch::{Kind, PayloadClass, classify},
    varint::{U32, Varint, VarintError},
};

/// State token to decode the kind of a frame.
///
/// The stream may cleanly end before this state consumes any bytes.
#[derive(Debug, Default)]
pub struct FrameHeader(Varint<U32>);

impl FrameHeader {
    /// Begin decoding at a frame boundary.
    ///
    /// Frames are self-delimiting, so decoding may start at any boundary
    /// (such as the last-frame offset from the document header).
    pub const fn new() -> Self {
        Self(Varint::new())
    }

    /// Transition to another state by decoding a byte of the frame kind.
    ///
    /// Returns a successor state token.
    pub fn advance(self, b: u8) -> Result<Either<Self, FrameTick>, VarintError> {
        Ok(match self.0.advance(b)? {
            Left(varint) => Left(Self(varint)),
            Right(kind) => Right(FrameTick {
                kind: Kind(kind),
                varint: Varint::new(),
            }),
        })
    }
}

/// State token to decode the tick of a frame.
#[derive(Debug)]
pub struct FrameTick {
    kind: Kind,
    varint: Varint<U32>,
}

impl FrameTick {
    /// Transition to another state by decoding a byte of the frame tick.
    ///
    /// The unset tick marker is normalized to zero. Returns a successor state
    /// token.
    pub fn advance(self, b: u8) -> Result<Either<Self, FrameSize>, VarintError> {
        let Self { kind, varint } = self;

        Ok(match varint.advance(b)? {
            Left(varint) => Left(Self { kind, varint }),
            Right(tick) => Right(FrameSize {
                kind,
                tick: if tick == TICK_UNSET { 0 } else { tick },
                varint: Varint::new(),
            }),
        })
    }
}

/// State token to decode the payload size of a frame.
#[derive(Debug)]
pub struct FrameSize {
    kind: Kind,
    tick: u32,
    varint: Varint<U32>,
}

impl FrameSize {
    /// Transition to another state by decoding a byte of the payload size.
    ///
    /// Once complete, resolves the kind against the dispatch table. Returns
    /// the frame description and a payload state token.
    pub fn advance(self, b: u8) -> Result<Either<Self, (FrameInfo, Payload)>, VarintError> {
        let Self { kind, tick, varint } = self;

        Ok(match varint.advance(b)? {
            Left(varint) => Left(Self { kind, tick, varint }),
            Right(size) => {
                let (class, is_embedded) = classify(kind.base());

                let info = FrameInfo {
                    kind,
                    tick,
                    size,
                    class,
                    is_embedded,
                };

                Right((info, Payload { size }))
            }
        })
    }
}

/// A decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Raw kind, including the compression flag.
    pub kind: Kind,
    /// Simulation tick, zero when unset.
    pub tick: u32,
    /// Declared payload length in bytes.
    pub size: u32,
    /// Payload class selected by the base kind.
    pub class: PayloadClass,
    /// Whether the payload holds nested data.
    pub is_embedded: bool,
}

/// State token standing over the payload of a frame.
///
/// **The caller must consume exactly [`Payload::size`] bytes before
/// advancing.** Every later frame boundary depends on it.
#[derive(Debug)]
pub struct Payload {
    size: u32,
}

impl Payload {
    /// Number of payload bytes to consume.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Transition to the next frame once the payload has been consumed.
    pub fn advance(self) -> FrameHeader {
        FrameHeader::new()
    }
}
