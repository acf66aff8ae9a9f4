use bytes::Bytes;

/// A node of a decoded ccnb syntax tree.
///
/// Nodes are plain tagged variants with exclusive parent-to-child
/// ownership: the tree is acyclic and single-owner, so dropping a parent
/// drops its whole subtree. A node's kind never changes after
/// construction; the builder hands the caller a fully formed, immutable
/// tree or nothing at all.
#[derive(Debug, PartialEq, Clone)]
pub enum Block {
    /// A DTAG element with its attributes and body.
    Element(Element),
    /// A BLOB leaf holding opaque bytes of the declared length.
    Blob(Bytes),
    /// A UDATA leaf holding UTF-8 text.
    Udata(String),
}

/// An element block: a dictionary tag code, the attributes in encoding
/// order, and the ordered body (child elements and/or leaf content).
///
/// Attribute names need not be unique on the wire; every occurrence is
/// preserved in order. Order is preserved for round-trip fidelity and
/// not assumed to carry meaning.
#[derive(Debug, PartialEq, Clone)]
pub struct Element {
    pub tag: u64,
    pub attrs: Vec<Attr>,
    pub children: Vec<Block>,
}

/// An attribute name: either a literal name (ATTR) or a numeric
/// dictionary code (DATTR).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AttrName {
    Named(String),
    Numbered(u64),
}

/// An attribute block. Carries exactly one UDATA value; the decoder
/// rejects attributes whose open marker is not followed by one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Attr {
    pub name: AttrName,
    pub value: String,
}

impl Element {
    /// An element with no attributes and no body.
    pub fn new(tag: u64) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl Attr {
    /// A named (ATTR) attribute.
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attr {
            name: AttrName::Named(name.into()),
            value: value.into(),
        }
    }

    /// A dictionary-coded (DATTR) attribute.
    pub fn numbered(code: u64, value: impl Into<String>) -> Self {
        Attr {
            name: AttrName::Numbered(code),
            value: value.into(),
        }
    }
}

impl Block {
    /// Returns the element if this block is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Block::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Block {
    fn from(element: Element) -> Self {
        Block::Element(element)
    }
}
