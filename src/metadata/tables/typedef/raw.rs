use crate::metadata::{tables::CodedIndex, token::Token};

/// A TypeDef row with heap and table indices left unresolved
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x02xxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `TypeAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace (empty string for the global namespace)
    pub type_namespace: u32,
    /// Base type, `TypeDefOrRef` coded index
    pub extends: CodedIndex,
    /// 1-based index of the first owned Field row
    pub field_list: u32,
    /// 1-based index of the first owned MethodDef row
    pub method_list: u32,
}
