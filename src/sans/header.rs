//! States processing the document preamble.

use thiserror::Error;
use zerocopy::byteorder::little_endian;

use crate::SIGNATURE;

use super::frame::FrameHeader;

/// An error advancing over a document header.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DocumentHeaderError {
    /// Incorrect file signature.
    #[error("Incorrect file signature ({found:02x?}).")]
    BadSignature { found: [u8; 8] },
}

/// State token to decode the file signature.
#[derive(Debug)]
pub struct DocumentHeader;

impl DocumentHeader {
    /// Transition to another state by decoding the file signature.
    ///
    /// Returns a successor state token. Nothing after the signature should be
    /// trusted if this fails.
    pub fn advance(r: [u8; 8]) -> Result<LastFrameOffset, DocumentHeaderError> {
        if r != SIGNATURE {
            Err(DocumentHeaderError::BadSignature { found: r })?;
        }

        Ok(LastFrameOffset(()))
    }
}

/// State token to decode the offset of the final frame.
#[derive(Debug)]
pub struct LastFrameOffset(pub(super) ());

impl LastFrameOffset {
    /// Transition to another state by decoding the last-frame offset.
    ///
    /// Returns the offset, measured from the start of the document, and a
    /// successor state token positioned at the first frame.
    pub fn advance(self, r: [u8; 4]) -> (u32, FrameHeader) {
        let offset: little_endian::U32 = zerocopy::transmute!(r);

        (offset.get(), FrameHeader::new())
    }
}
