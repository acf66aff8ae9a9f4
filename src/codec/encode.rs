// Encode module: serializes a block tree back into ccnb bytes.
// The decoder is the consumer-facing half; this side exists so the wire
// grammar round-trips and tests can build buffers from trees.

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::types::{Attr, AttrName, Block, Element};
use crate::codec::varnum::{self, TagType, CLOSE};
use crate::internal::error::EncodeError;

/// Serializes a block tree into one complete ccnb message.
///
/// Recursion depth equals tree depth; trees produced by `decode` were
/// already built under its nesting limit.
pub fn encode(block: &Block) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::new();
    encode_block(block, &mut buf)?;
    Ok(buf.freeze())
}

fn encode_block(block: &Block, buf: &mut BytesMut) -> Result<(), EncodeError> {
    match block {
        Block::Element(element) => encode_element(element, buf),
        Block::Blob(data) => {
            buf.extend_from_slice(&varnum::encode_header(TagType::Blob, data.len() as u64));
            buf.extend_from_slice(data);
            Ok(())
        }
        Block::Udata(text) => {
            encode_udata(text, buf);
            Ok(())
        }
    }
}

fn encode_element(element: &Element, buf: &mut BytesMut) -> Result<(), EncodeError> {
    buf.extend_from_slice(&varnum::encode_header(TagType::Dtag, element.tag));
    for attr in &element.attrs {
        encode_attr(attr, buf)?;
    }
    for child in &element.children {
        encode_block(child, buf)?;
    }
    buf.put_u8(CLOSE);
    Ok(())
}

fn encode_attr(attr: &Attr, buf: &mut BytesMut) -> Result<(), EncodeError> {
    match &attr.name {
        AttrName::Named(name) => {
            if name.is_empty() {
                // The ATTR header stores name length minus one.
                return Err(EncodeError::EmptyAttrName);
            }
            buf.extend_from_slice(&varnum::encode_header(
                TagType::Attr,
                (name.len() - 1) as u64,
            ));
            buf.extend_from_slice(name.as_bytes());
        }
        AttrName::Numbered(code) => {
            buf.extend_from_slice(&varnum::encode_header(TagType::Dattr, *code));
        }
    }
    encode_udata(&attr.value, buf);
    Ok(())
}

fn encode_udata(text: &str, buf: &mut BytesMut) {
    buf.extend_from_slice(&varnum::encode_header(TagType::Udata, text.len() as u64));
    buf.extend_from_slice(text.as_bytes());
}
