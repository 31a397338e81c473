//! TypeDef table (0x02).
//!
//! One row per type defined in the assembly, in declaration order. Each row names its
//! first Field and first MethodDef row; the next row's values delimit where its members
//! end, so the order of rows is significant.
//!
//! ## Columns
//! - **Flags** (4 bytes): [`TypeAttributes`]
//! - **TypeName**, **TypeNamespace** (`#Strings` indices)
//! - **Extends** (`TypeDefOrRef` coded index)
//! - **FieldList** (Field index), **MethodList** (MethodDef index)

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// Frequently used `TypeAttributes` flags
pub mod TypeAttributes {
    /// Visibility mask
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Type is public
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Type is a nested public type
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be derived from
    pub const SEALED: u32 = 0x0000_0100;
}
