use crate::metadata::{tables::MethodAttributes, token::Token};

/// A MethodDef row with heap indices left unresolved
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDefRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token (0x06xxxxxx)
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// RVA of the method body, 0 if none
    pub rva: u32,
    /// `MethodImplAttributes` bitmask
    pub impl_flags: u16,
    /// `MethodAttributes` bitmask
    pub flags: u16,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// 1-based index of the first owned Param row
    pub param_list: u32,
}

impl MethodDefRaw {
    /// The modifier flags of this method
    #[must_use]
    pub fn attributes(&self) -> MethodAttributes {
        MethodAttributes::from_bits_truncate(self.flags)
    }

    /// Returns true if the method carries the `SpecialName` flag
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.attributes().contains(MethodAttributes::SPECIAL_NAME)
    }
}
