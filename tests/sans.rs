use demoreel::{
    SIGNATURE,
    sans::{
        Decoder,
        dispatch::{COMPRESSED_FLAG, Kind, PayloadClass},
        frame::{FrameHeader, FrameInfo, Payload},
        varint::VarintError,
    },
};
use either::Either::{Left, Right};

mod support;

/// Advance over a frame header in `r`, returning the header, payload state,
/// and the number of bytes consumed.
fn frame_header(r: &[u8]) -> Result<(FrameInfo, Payload, usize), VarintError> {
    let mut bytes = r.iter().copied().enumerate();
    let mut next = || bytes.next().expect("header ended early");

    let mut state = FrameHeader::new();
    let mut tick = loop {
        state = match state.advance(next().1)? {
            Left(state) => state,
            Right(tick) => break tick,
        };
    };
    let mut size = loop {
        tick = match tick.advance(next().1)? {
            Left(tick) => tick,
            Right(size) => break size,
        };
    };
    loop {
        let (i, b) = next();
        size = match size.advance(b)? {
            Left(size) => size,
            Right((info, payload)) => return Ok((info, payload, i + 1)),
        };
    }
}

#[test]
fn document_walk() {
    let data = support::document(&[
        support::frame(COMPRESSED_FLAG | 6, 0xFFFF_FFFF, &[1; 200]),
        support::frame(7, 1_000_000, &[2; 3]),
    ]);

    let state = Decoder::advance(data[..8].try_into().unwrap()).unwrap();
    let (offset, _) = state.advance(data[8..12].try_into().unwrap());

    let mut i = 12;

    let (info, payload, n) = frame_header(&data[i..]).unwrap();
    assert_eq!(
        info,
        FrameInfo {
            kind: Kind(COMPRESSED_FLAG | 6),
            tick: 0,
            size: 200,
            class: PayloadClass::StringTables,
            is_embedded: false,
        }
    );
    i += n + payload.size() as usize;
    let _ = payload.advance();

    assert_eq!(i as u32, offset);

    let (info, payload, n) = frame_header(&data[i..]).unwrap();
    assert_eq!(info.tick, 1_000_000);
    assert_eq!(info.class, PayloadClass::Packet);
    assert!(info.is_embedded);
    i += n + payload.size() as usize;

    assert_eq!(i, data.len());
}

#[test]
fn signature_mismatch() {
    let mut signature = SIGNATURE;
    signature[7] = b'!';

    assert!(Decoder::advance(signature).is_err());
}

#[test]
fn kind_overflow() {
    let r = [0x80, 0x80, 0x80, 0x80, 0x10, 0x00, 0x00];
    assert_eq!(frame_header(&r).unwrap_err(), VarintError::Overflow);
}
