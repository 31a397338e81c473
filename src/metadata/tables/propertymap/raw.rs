use crate::metadata::token::Token;

/// A PropertyMap row
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyMapRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x15xxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// 1-based index of the owning TypeDef row
    pub parent: u32,
    /// 1-based index of the first owned Property row
    pub property_list: u32,
}
