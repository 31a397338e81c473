//! Field table (0x04).
//!
//! Field rows are owned in runs by TypeDef rows (see [`crate::AssemblyImage::field_range`]).
//! The signature blob of a field starts with the `FIELD` calling convention byte.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// Frequently used `FieldAttributes` flags
pub mod FieldAttributes {
    /// Access mask
    pub const FIELD_ACCESS_MASK: u16 = 0x0007;
    /// Field is public
    pub const PUBLIC: u16 = 0x0006;
    /// Field is defined on the type, else per instance
    pub const STATIC: u16 = 0x0010;
    /// Field is a compile-time constant
    pub const LITERAL: u16 = 0x0040;
}
