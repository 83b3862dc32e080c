//! Errors occurring while decoding a frame stream.

use alloc::boxed::Box;
use core::fmt;

use thiserror::Error;

use crate::sans::{
    dispatch::{Kind, PayloadClass},
    header::DocumentHeaderError,
};

use super::CursorError;

/// A boxed error from a decoding collaborator.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// The part of the document being read when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Signature,
    LastFrameOffset,
    Kind,
    Tick,
    Size,
    Payload,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Signature => "file signature",
            Self::LastFrameOffset => "last frame offset",
            Self::Kind => "frame kind",
            Self::Tick => "frame tick",
            Self::Size => "frame size",
            Self::Payload => "frame payload",
        })
    }
}

/// Errors occurring while decoding a frame stream.
///
/// See [`Error::is_fatal`] for which of these leave the stream aligned.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] DocumentHeaderError),
    /// The stream ended partway through a field.
    #[error("Stream ended while reading the {0}.")]
    Truncated(Field),
    /// A variable-length field does not fit its target width.
    #[error("Variable-length {0} overflows.")]
    Overflow(Field),
    /// An offset lies before the current cursor position.
    #[error("Offset {offset} lies behind the cursor at {position}.")]
    OffsetBehind { offset: u64, position: u64 },
    /// A payload exceeds the configured size limit and was skipped.
    #[error("{kind} payload of {size} bytes exceeds the limit of {limit} bytes.")]
    PayloadTooLarge { kind: Kind, size: u32, limit: u32 },
    /// A compressed payload could not be decompressed.
    #[error("Failed to decompress {kind} payload: {source}")]
    Decompression { kind: Kind, source: BoxError },
    /// A payload could not be decoded by the schema.
    #[error("Failed to decode {class} payload: {source}")]
    Schema { class: PayloadClass, source: BoxError },
}

impl Error {
    /// Whether this error leaves the cursor misaligned with frame boundaries.
    ///
    /// Non-fatal errors occur after a payload has been consumed by length, so
    /// decoding may continue with the next frame.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::PayloadTooLarge { .. } | Self::Decompression { .. } | Self::Schema { .. }
        )
    }

    pub(crate) fn from_cursor(err: CursorError, field: Field) -> Self {
        match err {
            CursorError::Truncated { .. } | CursorError::EndOfStream => Self::Truncated(field),
            #[cfg(feature = "std")]
            CursorError::Io(err) => Self::Io(err),
        }
    }
}
