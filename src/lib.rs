#![no_std]

//! A frame-stream decoder for Source 2 match replay (demo) files.
//!
//! A demo is a fixed signature and a pointer to its final frame, followed by
//! a stream of frames. Each frame carries a record kind, a simulation tick and
//! a length-prefixed payload, which may be block-compressed and may itself
//! hold nested data.
//!
//! Most users should begin with [`avec::decode_slice`] or
//! [`avec::decode_reader`]. If these prove insufficient, consider driving
//! the state machine in the [`sans`] module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).
//! - `snappy`: enable the Snappy decompressor (default).
//! - `proto`: enable the Protobuf message schema (default).

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod avec;
#[cfg(feature = "proto")]
pub mod proto;
pub mod sans;

/// Signature at the start of every demo.
pub const SIGNATURE: [u8; 8] = *b"PBDEMS2\0";

/// Length of the signature and last-frame offset preceding the first frame.
pub const PREAMBLE_LEN: u64 = 12;

/// Tick value marking frames recorded outside of simulation time.
pub const TICK_UNSET: u32 = 0xFFFF_FFFF;

/// Default limit on payload bytes held in memory for a single frame (64 MiB).
pub const MAX_PAYLOAD_SIZE_BYTES: u32 = 0x400_0000;
