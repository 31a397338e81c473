use crate::metadata::{tables::CodedIndex, token::Token};

/// A TypeRef row with heap indices left unresolved
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRefRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x01xxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `ResolutionScope` coded index of the defining scope
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}
