use crate::metadata::{tables::CodedIndex, token::Token};

/// A CustomAttribute row
#[derive(Clone, Debug, PartialEq)]
pub struct CustomAttributeRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x0Cxxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// The attributed entity, `HasCustomAttribute` coded index
    pub parent: CodedIndex,
    /// The attribute constructor, `CustomAttributeType` coded index
    pub constructor: CodedIndex,
    /// `#Blob` index of the argument blob
    pub value: u32,
}
