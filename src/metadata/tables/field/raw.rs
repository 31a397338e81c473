use crate::metadata::token::Token;

/// A Field row with heap indices left unresolved
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x04xxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `FieldAttributes` bitmask
    pub flags: u16,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}
