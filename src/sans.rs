//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals, such as parsing the nested streams held in embedded
//! payloads. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a small, non-copy token. Once enough bytes
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data. Variable-length fields advance a byte at a time.
//!
//! ```text
//! DocumentHeader -> LastFrameOffset -> FrameHeader -> FrameTick -> FrameSize
//!                                          ^                          |
//!                                          +-------- Payload <--------+
//! ```
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], and the
//! frame boundary state [`frame::FrameHeader`] can be constructed.
//!
//! Some areas of the decoding process are not represented in the
//! finite-state machine and must be carefully written:
//!
//! - Consuming exactly [`frame::Payload::size`] bytes before advancing past a
//! payload, whether or not it is decoded.
//!
//! - Telling a clean end of data (no bytes before a frame kind) from a
//! truncated frame header.
//!
//! - Decompressing payloads flagged in [`dispatch::Kind::is_compressed`].
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod dispatch;
pub mod frame;
pub mod header;
pub mod varint;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::DocumentHeader;
