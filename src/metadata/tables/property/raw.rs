use crate::metadata::token::Token;

/// A Property row with heap indices left unresolved
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x17xxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `PropertyAttributes` bitmask
    pub flags: u16,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}
