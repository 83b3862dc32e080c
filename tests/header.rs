use demoreel::{
    PREAMBLE_LEN, SIGNATURE,
    avec::{Cursor, Error, Field, SliceCursor, read_header, seek_last_frame},
    sans::header::DocumentHeaderError,
};

mod support;

#[test]
fn valid_header() {
    let mut data = SIGNATURE.to_vec();
    data.extend(0x1234_5678u32.to_le_bytes());

    let mut cursor = SliceCursor::new(&data);
    assert_eq!(read_header(&mut cursor).unwrap(), 0x1234_5678);
    assert_eq!(cursor.position(), PREAMBLE_LEN);
}

#[test]
fn bad_signature_reads_only_signature() {
    let mut data = b"PBDEMS1\0".to_vec();
    data.extend([0; 8]);

    let mut cursor = SliceCursor::new(&data);
    let err = read_header(&mut cursor).unwrap_err();

    assert!(matches!(
        err,
        Error::Header(DocumentHeaderError::BadSignature { found }) if &found == b"PBDEMS1\0"
    ));
    assert!(err.is_fatal());
    assert_eq!(cursor.position(), 8);
}

#[test]
fn truncated_signature() {
    let mut cursor = SliceCursor::new(b"PBDEM");

    assert!(matches!(
        read_header(&mut cursor),
        Err(Error::Truncated(Field::Signature))
    ));
}

#[test]
fn truncated_offset() {
    let mut data = SIGNATURE.to_vec();
    data.extend([1, 2]);

    let mut cursor = SliceCursor::new(&data);
    assert!(matches!(
        read_header(&mut cursor),
        Err(Error::Truncated(Field::LastFrameOffset))
    ));
}

#[test]
fn seek_to_last_frame() {
    let data = support::document(&[
        support::frame(1, 0, b"first"),
        support::frame(3, 7, b""),
        support::frame(0, 9, b"last"),
    ]);

    let mut cursor = SliceCursor::new(&data);
    let offset = read_header(&mut cursor).unwrap();
    seek_last_frame(&mut cursor, offset).unwrap();

    assert_eq!(cursor.position(), offset);
    assert_eq!(cursor.remaining(), support::frame(0, 9, b"last"));
}

#[test]
fn seek_behind_cursor() {
    let data = support::document(&[support::frame(0, 0, b"")]);

    let mut cursor = SliceCursor::new(&data);
    read_header(&mut cursor).unwrap();

    assert!(matches!(
        seek_last_frame(&mut cursor, 4),
        Err(Error::OffsetBehind {
            offset: 4,
            position: 12
        })
    ));
}

#[test]
fn seek_past_end() {
    let data = support::document(&[]);

    let mut cursor = SliceCursor::new(&data);
    read_header(&mut cursor).unwrap();

    assert!(matches!(
        seek_last_frame(&mut cursor, 100),
        Err(Error::Truncated(Field::LastFrameOffset))
    ));
}
