// Internal utilities shared across the library

pub mod error;
