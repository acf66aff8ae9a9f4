// Decode module: turns one complete ccnb buffer into a block tree.

pub mod leaf;

use crate::codec::cursor::ByteCursor;
use crate::codec::types::{Attr, AttrName, Block, Element};
use crate::codec::varnum::{self, TagHeader};
use crate::internal::error::{DecodeError, Result};

/// Maximum element nesting depth accepted by [`decode`], guarding
/// against adversarial deeply-nested input.
pub const MAX_NESTING_DEPTH: usize = 32;

/// One open, not-yet-closed element scope. The explicit frame stack
/// replaces call-stack recursion so nesting depth stays bounded and
/// configurable.
#[derive(Debug)]
struct ElementFrame {
    tag: u64,
    attrs: Vec<Attr>,
    children: Vec<Block>,
}

/// Decodes one complete ccnb message into its root block.
///
/// All-or-nothing per buffer: any malformed header, body, or scope
/// aborts the whole decode; a partial tree is never returned. A
/// `Truncated*` error also serves as the "need more data" signal for
/// callers that accumulate bytes and re-invoke.
pub fn decode(data: &[u8]) -> Result<Block> {
    decode_with_depth_limit(data, MAX_NESTING_DEPTH)
}

/// [`decode`] with a caller-chosen nesting depth limit.
pub fn decode_with_depth_limit(data: &[u8], max_depth: usize) -> Result<Block> {
    let mut cursor = ByteCursor::new(data);
    let mut stack: Vec<ElementFrame> = Vec::new();

    loop {
        let header_offset = cursor.offset();
        let header = varnum::read_header(&mut cursor)?;

        match header {
            TagHeader::ElementOpen { code } => {
                if stack.len() >= max_depth {
                    return Err(DecodeError::DepthExceeded {
                        offset: header_offset,
                        limit: max_depth,
                    });
                }
                stack.push(ElementFrame {
                    tag: code,
                    attrs: Vec::new(),
                    children: Vec::new(),
                });
            }
            TagHeader::ElementClose => {
                let frame = stack
                    .pop()
                    .ok_or(DecodeError::UnbalancedClose { offset: header_offset })?;
                let element = Block::Element(Element {
                    tag: frame.tag,
                    attrs: frame.attrs,
                    children: frame.children,
                });
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return finish(element, &cursor),
                }
            }
            TagHeader::AttrOpen { name_len } => {
                check_attr_position(&stack, header_offset)?;
                let name = AttrName::Named(leaf::read_text(&mut cursor, name_len)?);
                let attr = decode_attr_value(&mut cursor, name)?;
                // check_attr_position guarantees an open frame
                stack.last_mut().unwrap().attrs.push(attr);
            }
            TagHeader::DattrOpen { code } => {
                check_attr_position(&stack, header_offset)?;
                let attr = decode_attr_value(&mut cursor, AttrName::Numbered(code))?;
                stack.last_mut().unwrap().attrs.push(attr);
            }
            TagHeader::BlobLeaf { len } => {
                let block = leaf::decode_blob(&mut cursor, len)?;
                match stack.last_mut() {
                    Some(frame) => frame.children.push(block),
                    None => return finish(block, &cursor),
                }
            }
            TagHeader::UdataLeaf { len } => {
                let block = leaf::decode_udata(&mut cursor, len)?;
                match stack.last_mut() {
                    Some(frame) => frame.children.push(block),
                    None => return finish(block, &cursor),
                }
            }
        }
    }
}

/// An attribute open marker is only legal inside an element and before
/// any of that element's body content.
fn check_attr_position(stack: &[ElementFrame], offset: usize) -> Result<()> {
    match stack.last() {
        None => Err(DecodeError::AttrOutsideElement { offset }),
        Some(frame) if !frame.children.is_empty() => {
            Err(DecodeError::UnexpectedAttrAfterChild { offset })
        }
        Some(_) => Ok(()),
    }
}

/// Every attribute carries exactly one UDATA value, immediately after
/// its open marker (and name bytes, for the named form).
fn decode_attr_value(cursor: &mut ByteCursor, name: AttrName) -> Result<Attr> {
    let value_offset = cursor.offset();
    match varnum::read_header(cursor)? {
        TagHeader::UdataLeaf { len } => Ok(Attr {
            name,
            value: leaf::read_text(cursor, len)?,
        }),
        _ => Err(DecodeError::MissingAttrValue { offset: value_offset }),
    }
}

/// The root has closed; a full ccnb message is exactly one top-level
/// block, so any leftover bytes are an error.
fn finish(root: Block, cursor: &ByteCursor) -> Result<Block> {
    if !cursor.is_empty() {
        return Err(DecodeError::TrailingData { offset: cursor.offset() });
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode::encode;
    use crate::codec::varnum::{encode_header, TagType, CLOSE};
    use bytes::Bytes;

    fn sample_tree() -> Block {
        let mut root = Element::new(5);
        root.attrs.push(Attr::named("x", "1"));
        root.children.push(Block::Udata("hello".to_string()));
        Block::Element(root)
    }

    #[test]
    fn test_decode_known_bytes() {
        // DTAG 5, ATTR "x" with UDATA "1", UDATA "hello", CLOSE —
        // byte-for-byte the scenario the format documentation gives.
        let data = [
            0xAA, // DTAG, code 5
            0x83, b'x', // ATTR, name length 1
            0x8E, b'1', // UDATA, length 1
            0xAE, b'h', b'e', b'l', b'l', b'o', // UDATA, length 5
            0x00, // CLOSE
        ];
        assert_eq!(decode(&data).unwrap(), sample_tree());
    }

    #[test]
    fn test_roundtrip_matches_handbuilt_tree() {
        let tree = sample_tree();
        let encoded = encode(&tree).unwrap();
        assert_eq!(decode(&encoded).unwrap(), tree);
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(
            decode(&[]).unwrap_err(),
            DecodeError::TruncatedHeader { offset: 0 }
        );
    }

    #[test]
    fn test_lone_close_marker_fails_at_offset_zero() {
        assert_eq!(
            decode(&[CLOSE]).unwrap_err(),
            DecodeError::UnbalancedClose { offset: 0 }
        );
    }

    #[test]
    fn test_trailing_data_after_root() {
        let mut data = encode(&sample_tree()).unwrap().to_vec();
        let offset = data.len();
        data.push(0x42);
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::TrailingData { offset }
        );
    }

    #[test]
    fn test_extra_close_after_root_is_trailing_data() {
        // The root closes first, so the stray close is unreachable
        // bytes rather than a scope error.
        let mut data = encode(&sample_tree()).unwrap().to_vec();
        let offset = data.len();
        data.push(CLOSE);
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::TrailingData { offset }
        );
    }

    #[test]
    fn test_unclosed_element_is_truncated() {
        let data = encode_header(TagType::Dtag, 5);
        assert!(matches!(
            decode(&data).unwrap_err(),
            DecodeError::TruncatedHeader { .. }
        ));
    }

    #[test]
    fn test_blob_length_exceeding_buffer() {
        let mut data = encode_header(TagType::Dtag, 1);
        data.extend_from_slice(&encode_header(TagType::Blob, 100));
        let body_offset = data.len();
        data.extend_from_slice(&[0xAB; 10]);
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::TruncatedBody {
                offset: body_offset,
                expected: 100,
                actual: 10
            }
        );
    }

    #[test]
    fn test_udata_invalid_utf8() {
        let mut data = encode_header(TagType::Dtag, 1);
        let offset = data.len() + 1;
        data.extend_from_slice(&encode_header(TagType::Udata, 2));
        data.extend_from_slice(&[0xff, 0xfe]);
        data.push(CLOSE);
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::InvalidUtf8 { offset }
        );
    }

    #[test]
    fn test_attr_after_child_rejected() {
        // DTAG 5, UDATA "hello", then an attribute open: too late.
        let data = [
            0xAA, 0xAE, b'h', b'e', b'l', b'l', b'o', 0x83, b'x', 0x8E, b'1', 0x00,
        ];
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::UnexpectedAttrAfterChild { offset: 7 }
        );
    }

    #[test]
    fn test_attr_without_value_rejected() {
        // ATTR "x" followed directly by CLOSE instead of a UDATA block.
        let data = [0xAA, 0x83, b'x', 0x00];
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::MissingAttrValue { offset: 3 }
        );
    }

    #[test]
    fn test_attr_with_blob_value_rejected() {
        let mut data = encode_header(TagType::Dtag, 5);
        data.extend_from_slice(&encode_header(TagType::Attr, 0));
        data.push(b'x');
        let value_offset = data.len();
        data.extend_from_slice(&encode_header(TagType::Blob, 1));
        data.push(0x01);
        data.push(CLOSE);
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::MissingAttrValue { offset: value_offset }
        );
    }

    #[test]
    fn test_attr_outside_element() {
        let data = [0x83, b'x', 0x8E, b'1'];
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::AttrOutsideElement { offset: 0 }
        );
    }

    #[test]
    fn test_leaf_as_root() {
        let data = [0xAE, b'h', b'e', b'l', b'l', b'o'];
        assert_eq!(decode(&data).unwrap(), Block::Udata("hello".to_string()));

        let mut blob = encode_header(TagType::Blob, 2);
        blob.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(
            decode(&blob).unwrap(),
            Block::Blob(Bytes::from_static(&[0xde, 0xad]))
        );
    }

    #[test]
    fn test_leaf_root_with_trailing_data() {
        let data = [0xAE, b'h', b'e', b'l', b'l', b'o', 0x00];
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::TrailingData { offset: 6 }
        );
    }

    #[test]
    fn test_depth_limit_default() {
        // 1000 nested opens; the limit must trip at depth 33 long
        // before memory does.
        let open = encode_header(TagType::Dtag, 1);
        assert_eq!(open.len(), 1);
        let data: Vec<u8> = open.repeat(1000);
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::DepthExceeded {
                offset: MAX_NESTING_DEPTH,
                limit: MAX_NESTING_DEPTH
            }
        );
    }

    #[test]
    fn test_depth_limit_configurable() {
        // depth 3: a(b(c)) — fails with limit 2, succeeds with limit 3.
        let mut data = Vec::new();
        for code in [1u64, 2, 3] {
            data.extend_from_slice(&encode_header(TagType::Dtag, code));
        }
        data.extend_from_slice(&[CLOSE, CLOSE, CLOSE]);

        assert!(matches!(
            decode_with_depth_limit(&data, 2).unwrap_err(),
            DecodeError::DepthExceeded { limit: 2, .. }
        ));
        let root = decode_with_depth_limit(&data, 3).unwrap();
        assert_eq!(root.as_element().unwrap().tag, 1);
    }

    #[test]
    fn test_duplicate_attrs_preserved_in_order() {
        let mut element = Element::new(9);
        element.attrs.push(Attr::named("k", "first"));
        element.attrs.push(Attr::named("k", "second"));
        element.attrs.push(Attr::numbered(12, "third"));
        let tree = Block::Element(element);

        let decoded = decode(&encode(&tree).unwrap()).unwrap();
        let attrs = &decoded.as_element().unwrap().attrs;
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].value, "first");
        assert_eq!(attrs[1].value, "second");
        assert_eq!(attrs[2].name, AttrName::Numbered(12));
    }

    #[test]
    fn test_nested_elements_and_mixed_children() {
        let mut inner = Element::new(300);
        inner.attrs.push(Attr::numbered(7, "v"));
        inner.children.push(Block::Blob(Bytes::from_static(&[0, 1, 2])));

        let mut root = Element::new(5);
        root.children.push(Block::Udata("lead".to_string()));
        root.children.push(Block::Element(inner));
        root.children.push(Block::Udata("tail".to_string()));
        let tree = Block::Element(root);

        assert_eq!(decode(&encode(&tree).unwrap()).unwrap(), tree);
    }
}
