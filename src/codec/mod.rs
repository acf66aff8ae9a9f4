// Codec module for the ccnb binary wire encoding

pub mod cursor;
pub mod decode;
pub mod encode;
pub mod types;
pub mod varnum;
pub mod visitor;
