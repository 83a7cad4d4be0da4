//! Bank-specific statement dialects.

pub mod columnar;
pub mod positional;

pub use columnar::{ColumnarOptions, ColumnarParser};
pub use positional::{PositionalOptions, PositionalParser};
