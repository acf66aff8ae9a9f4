use bytes::Bytes;

use crate::codec::types::{Block, Element};

/// Consumer interface for decoded trees.
///
/// Downstream code that interprets tag meanings (printers, converters,
/// protocol mappers) implements this trait; [`Block::visit`] dispatches
/// to the method matching the node's concrete variant. Traversal into an
/// element's children is the visitor's own choice, which keeps
/// pre-order, post-order, and pruning walks all expressible without
/// touching the block model.
pub trait BlockVisitor {
    fn visit_element(&mut self, element: &Element);
    fn visit_blob(&mut self, data: &Bytes);
    fn visit_udata(&mut self, text: &str);
}

impl Block {
    /// Dispatches this node to the visitor method for its variant.
    pub fn visit<V: BlockVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Block::Element(element) => visitor.visit_element(element),
            Block::Blob(data) => visitor.visit_blob(data),
            Block::Udata(text) => visitor.visit_udata(text),
        }
    }
}
