use thiserror::Error;

/// Errors produced while decoding a ccnb buffer.
///
/// Every variant carries the byte offset at which the problem was
/// detected so callers can log and diagnose malformed input. All kinds
/// are terminal for the current decode: the library never repairs or
/// skips malformed blocks, and never returns a partial tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before a header's terminating byte was found.
    #[error("truncated header at offset {offset}")]
    TruncatedHeader { offset: usize },

    /// A header's accumulated value exceeds the representable range.
    #[error("header value overflow at offset {offset}")]
    HeaderOverflow { offset: usize },

    /// A header declared more payload bytes than remain in the buffer.
    #[error("truncated body at offset {offset}: declared {expected} bytes, {actual} available")]
    TruncatedBody {
        offset: usize,
        /// Byte count declared by the header
        expected: usize,
        /// Bytes actually remaining
        actual: usize,
    },

    /// Text content (UDATA or an attribute name) is not valid UTF-8.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// The header's tag-type bits name a type this decoder does not model.
    #[error("unknown tag type {tt} at offset {offset}")]
    UnknownTagType { offset: usize, tt: u8 },

    /// An attribute open marker was not followed by a UDATA value block.
    #[error("attribute without a UDATA value at offset {offset}")]
    MissingAttrValue { offset: usize },

    /// An attribute open marker appeared after body content of the same
    /// element; the grammar requires attributes before children.
    #[error("attribute after element body content at offset {offset}")]
    UnexpectedAttrAfterChild { offset: usize },

    /// An attribute open marker appeared with no element scope open.
    #[error("attribute outside any element at offset {offset}")]
    AttrOutsideElement { offset: usize },

    /// A close marker appeared with no matching open element.
    #[error("unbalanced close marker at offset {offset}")]
    UnbalancedClose { offset: usize },

    /// Bytes remain after the root block closed.
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },

    /// Element nesting exceeded the configured depth limit.
    #[error("nesting depth limit ({limit}) exceeded at offset {offset}")]
    DepthExceeded { offset: usize, limit: usize },
}

/// Errors produced while encoding a block tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The ATTR wire form stores `name length - 1`, so a zero-length
    /// attribute name cannot be represented.
    #[error("attribute name must not be empty")]
    EmptyAttrName,
}

/// A specialized `Result` type for ccnb decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
