// ccnb library entry point
// Core modules are defined here

pub mod codec;
pub mod internal;

pub use codec::decode::{decode, decode_with_depth_limit, MAX_NESTING_DEPTH};
pub use codec::encode::encode;
pub use codec::types::{Attr, AttrName, Block, Element};
pub use codec::visitor::BlockVisitor;
pub use internal::error::{DecodeError, EncodeError, Result};
