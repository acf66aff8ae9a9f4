use crate::codec::cursor::ByteCursor;
use crate::internal::error::{DecodeError, Result};

/// Number of tag-type bits in the final byte of a header.
pub const TT_BITS: u32 = 3;
/// Mask extracting the tag-type bits from the final byte.
pub const TT_MASK: u8 = 0x07;
/// High bit marking the FINAL byte of a header. Note this is the
/// opposite of LEB128-style varints, where the high bit marks
/// continuation; the convention must be preserved for wire
/// compatibility.
pub const TT_HBIT: u8 = 0x80;
/// Number of value bits carried by the final byte.
pub const TT_VAL_BITS: u32 = 4;
/// Mask extracting the final byte's value bits (after shifting out
/// the tag-type bits).
pub const TT_VAL_MASK: u64 = 0x0f;
/// The element close marker: a bare zero byte at header position.
pub const CLOSE: u8 = 0x00;

/// Tag types of the ccnb encoding, as they appear in the low bits of a
/// header's final byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TagType {
    Ext = 0,
    Tag = 1,
    Dtag = 2,
    Attr = 3,
    Dattr = 4,
    Blob = 5,
    Udata = 6,
}

/// A decoded ccnb header: tag class plus its numeric value, already
/// split into the meaning the value carries for that class. Produced
/// transiently by [`read_header`] and not retained after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagHeader {
    /// DTAG: opens an element identified by a dictionary tag code.
    ElementOpen { code: u64 },
    /// A bare zero byte: closes the innermost open element.
    ElementClose,
    /// ATTR: a named attribute; `name_len` bytes of name follow, then
    /// one UDATA value block.
    AttrOpen { name_len: usize },
    /// DATTR: a dictionary-coded attribute; one UDATA value block follows.
    DattrOpen { code: u64 },
    /// BLOB: `len` bytes of opaque payload follow.
    BlobLeaf { len: usize },
    /// UDATA: `len` bytes of UTF-8 text follow.
    UdataLeaf { len: usize },
}

/// Reads one ccnb header from the cursor.
///
/// The header is a variable-length number whose final byte has the high
/// bit set and carries the 3-bit tag type plus the low 4 value bits;
/// each preceding byte contributes 7 value bits, most significant group
/// first. Advances the cursor by exactly the bytes consumed; on error
/// the cursor position is unspecified and the decode must be abandoned.
pub fn read_header(cursor: &mut ByteCursor) -> Result<TagHeader> {
    let start = cursor.offset();
    let first = cursor
        .read_u8()
        .ok_or(DecodeError::TruncatedHeader { offset: start })?;

    if first == CLOSE {
        return Ok(TagHeader::ElementClose);
    }

    let mut value: u64 = 0;
    let mut byte = first;
    while byte & TT_HBIT == 0 {
        if value >> (64 - 7) != 0 {
            return Err(DecodeError::HeaderOverflow { offset: start });
        }
        value = (value << 7) | u64::from(byte & 0x7f);
        byte = cursor
            .read_u8()
            .ok_or(DecodeError::TruncatedHeader { offset: start })?;
    }

    if value >> (64 - TT_VAL_BITS) != 0 {
        return Err(DecodeError::HeaderOverflow { offset: start });
    }
    value = (value << TT_VAL_BITS) | (u64::from(byte >> TT_BITS) & TT_VAL_MASK);
    let tt = byte & TT_MASK;

    match tt {
        t if t == TagType::Dtag as u8 => Ok(TagHeader::ElementOpen { code: value }),
        t if t == TagType::Attr as u8 => {
            // The wire stores name length minus one, so empty names are
            // unrepresentable.
            let name_len = value
                .checked_add(1)
                .and_then(|v| usize::try_from(v).ok())
                .ok_or(DecodeError::HeaderOverflow { offset: start })?;
            Ok(TagHeader::AttrOpen { name_len })
        }
        t if t == TagType::Dattr as u8 => Ok(TagHeader::DattrOpen { code: value }),
        t if t == TagType::Blob as u8 => Ok(TagHeader::BlobLeaf {
            len: to_len(value, start)?,
        }),
        t if t == TagType::Udata as u8 => Ok(TagHeader::UdataLeaf {
            len: to_len(value, start)?,
        }),
        _ => Err(DecodeError::UnknownTagType { offset: start, tt }),
    }
}

fn to_len(value: u64, offset: usize) -> Result<usize> {
    usize::try_from(value).map_err(|_| DecodeError::HeaderOverflow { offset })
}

/// Encodes a ccnb header for the given tag type and value.
/// Exact inverse of [`read_header`] for every representable value.
pub fn encode_header(tt: TagType, value: u64) -> Vec<u8> {
    let mut buf = vec![TT_HBIT | (((value & TT_VAL_MASK) as u8) << TT_BITS) | tt as u8];
    let mut rest = value >> TT_VAL_BITS;
    while rest != 0 {
        buf.push((rest & 0x7f) as u8);
        rest >>= 7;
    }
    buf.reverse();
    buf
}
