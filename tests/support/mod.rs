//! Builders for synthetic demo documents.

#![allow(dead_code)]

use demoreel::SIGNATURE;

/// Encode an unsigned variable-length integer.
pub fn varint(mut v: u64) -> Vec<u8> {
    let mut r = vec![];

    loop {
        let b = (v & 0x7F) as u8;
        v >>= 7;

        if v == 0 {
            r.push(b);
            return r;
        }

        r.push(b | 0x80);
    }
}

/// Encode a frame header.
pub fn header(kind: u32, tick: u32, size: u32) -> Vec<u8> {
    let mut r = varint(kind.into());
    r.extend(varint(tick.into()));
    r.extend(varint(size.into()));
    r
}

/// Encode a frame.
pub fn frame(kind: u32, tick: u32, payload: &[u8]) -> Vec<u8> {
    let mut r = header(kind, tick, payload.len() as u32);
    r.extend_from_slice(payload);
    r
}

/// Encode a document holding the given frames, pointing at the last of them.
pub fn document(frames: &[Vec<u8>]) -> Vec<u8> {
    let before_last: usize = frames.iter().rev().skip(1).map(Vec::len).sum();
    let offset = 12 + before_last as u32;

    let mut r = SIGNATURE.to_vec();
    r.extend(offset.to_le_bytes());
    for frame in frames {
        r.extend(frame);
    }
    r
}

/// Compress a payload as a raw Snappy block.
pub fn compress(payload: &[u8]) -> Vec<u8> {
    snap::raw::Encoder::new().compress_vec(payload).unwrap()
}
