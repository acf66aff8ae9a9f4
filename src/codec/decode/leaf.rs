use bytes::Bytes;

use crate::codec::cursor::ByteCursor;
use crate::codec::types::Block;
use crate::internal::error::{DecodeError, Result};

/// Decodes a BLOB leaf: exactly `len` opaque bytes.
pub fn decode_blob(cursor: &mut ByteCursor, len: usize) -> Result<Block> {
    Ok(Block::Blob(Bytes::copy_from_slice(read_body(cursor, len)?)))
}

/// Decodes a UDATA leaf: exactly `len` bytes of valid UTF-8.
pub fn decode_udata(cursor: &mut ByteCursor, len: usize) -> Result<Block> {
    Ok(Block::Udata(read_text(cursor, len)?))
}

/// Reads `len` bytes as UTF-8 text. Shared by UDATA leaves, attribute
/// names, and attribute values.
pub(crate) fn read_text(cursor: &mut ByteCursor, len: usize) -> Result<String> {
    let offset = cursor.offset();
    let bytes = read_body(cursor, len)?;
    let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { offset })?;
    Ok(text.to_string())
}

/// Validates the declared length against the remaining buffer BEFORE
/// anything is copied or allocated, so a forged length field cannot
/// trigger an oversized allocation.
fn read_body<'a>(cursor: &mut ByteCursor<'a>, len: usize) -> Result<&'a [u8]> {
    let offset = cursor.offset();
    let actual = cursor.remaining();
    cursor.read_slice(len).ok_or(DecodeError::TruncatedBody {
        offset,
        expected: len,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_blob() {
        let mut cursor = ByteCursor::new(b"raw data");
        let block = decode_blob(&mut cursor, 8).unwrap();
        assert_eq!(block, Block::Blob(Bytes::from_static(b"raw data")));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_decode_blob_truncated() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        assert_eq!(
            decode_blob(&mut cursor, 8).unwrap_err(),
            DecodeError::TruncatedBody {
                offset: 0,
                expected: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn test_decode_udata() {
        let mut cursor = ByteCursor::new("你好".as_bytes());
        let block = decode_udata(&mut cursor, 6).unwrap();
        assert_eq!(block, Block::Udata("你好".to_string()));
    }

    #[test]
    fn test_decode_udata_invalid_utf8() {
        let mut cursor = ByteCursor::new(&[0xff, 0xff]);
        assert_eq!(
            decode_udata(&mut cursor, 2).unwrap_err(),
            DecodeError::InvalidUtf8 { offset: 0 }
        );
    }
}
