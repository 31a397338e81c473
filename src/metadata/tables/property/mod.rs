//! Property table (0x17).
//!
//! Property rows are owned in runs through the PropertyMap table. A property signature
//! starts with `PROPERTY | HASTHIS` for instance properties, followed by a parameter count
//! and the property type.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// All possible flags for `PropertyAttributes`
pub mod PropertyAttributes {
    /// Property is special
    pub const SPECIAL_NAME: u16 = 0x0200;
    /// Runtime (metadata internal APIs) should check name encoding
    pub const RT_SPECIAL_NAME: u16 = 0x0400;
    /// Property has default
    pub const HAS_DEFAULT: u16 = 0x1000;
}
