//! Coded indices (ECMA-335 II.24.2.6).
//!
//! A coded index packs a table selector into its low tag bits and a 1-based row into the
//! remaining bits. Each column kind has a fixed, ordered table list; the tag is a position
//! in that list. Some lists have unused positions (`CustomAttributeType` only uses tags 2
//! and 3), which are modelled as `None`.

use strum::{EnumCount, EnumIter};

use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{TableId, TableInfo},
    Error, Result,
};

/// The coded index column kinds of the runtime metadata tables.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
pub enum CodedIndexType {
    /// `TypeDef`, `TypeRef`, `TypeSpec`
    TypeDefOrRef,
    /// `Field`, `Param`, `Property`
    HasConstant,
    /// Any metadata entity that can carry a custom attribute
    HasCustomAttribute,
    /// `Field`, `Param`
    HasFieldMarshal,
    /// `TypeDef`, `MethodDef`, `Assembly`
    HasDeclSecurity,
    /// `TypeDef`, `TypeRef`, `ModuleRef`, `MethodDef`, `TypeSpec`
    MemberRefParent,
    /// `Event`, `Property`
    HasSemantics,
    /// `MethodDef`, `MemberRef`
    MethodDefOrRef,
    /// `Field`, `MethodDef`
    MemberForwarded,
    /// `File`, `AssemblyRef`, `ExportedType`
    Implementation,
    /// Attribute constructor: `MethodDef` (tag 2) or `MemberRef` (tag 3)
    CustomAttributeType,
    /// `Module`, `ModuleRef`, `AssemblyRef`, `TypeRef`
    ResolutionScope,
    /// `TypeDef`, `MethodDef`
    TypeOrMethodDef,
}

impl CodedIndexType {
    /// Number of low bits holding the table tag.
    #[must_use]
    pub fn tag_bits(self) -> u8 {
        match self {
            CodedIndexType::HasFieldMarshal
            | CodedIndexType::HasSemantics
            | CodedIndexType::MethodDefOrRef
            | CodedIndexType::MemberForwarded
            | CodedIndexType::TypeOrMethodDef => 1,
            CodedIndexType::TypeDefOrRef
            | CodedIndexType::HasConstant
            | CodedIndexType::HasDeclSecurity
            | CodedIndexType::Implementation
            | CodedIndexType::ResolutionScope => 2,
            CodedIndexType::MemberRefParent | CodedIndexType::CustomAttributeType => 3,
            CodedIndexType::HasCustomAttribute => 5,
        }
    }

    /// Row count from which a column of this kind needs 4 bytes.
    #[must_use]
    pub fn max_small_rows(self) -> u32 {
        1 << (16 - u32::from(self.tag_bits()))
    }

    /// The ordered table list; the position is the tag value.
    #[must_use]
    pub fn tables(self) -> &'static [Option<TableId>] {
        match self {
            CodedIndexType::TypeDefOrRef => &[
                Some(TableId::TypeDef),
                Some(TableId::TypeRef),
                Some(TableId::TypeSpec),
            ],
            CodedIndexType::HasConstant => &[
                Some(TableId::Field),
                Some(TableId::Param),
                Some(TableId::Property),
            ],
            CodedIndexType::HasCustomAttribute => &[
                Some(TableId::MethodDef),
                Some(TableId::Field),
                Some(TableId::TypeRef),
                Some(TableId::TypeDef),
                Some(TableId::Param),
                Some(TableId::InterfaceImpl),
                Some(TableId::MemberRef),
                Some(TableId::Module),
                // Listed as 'Permission' in the standard; the table is DeclSecurity
                Some(TableId::DeclSecurity),
                Some(TableId::Property),
                Some(TableId::Event),
                Some(TableId::StandAloneSig),
                Some(TableId::ModuleRef),
                Some(TableId::TypeSpec),
                Some(TableId::Assembly),
                Some(TableId::AssemblyRef),
                Some(TableId::File),
                Some(TableId::ExportedType),
                Some(TableId::ManifestResource),
                Some(TableId::GenericParam),
                Some(TableId::GenericParamConstraint),
                Some(TableId::MethodSpec),
            ],
            CodedIndexType::HasFieldMarshal => &[Some(TableId::Field), Some(TableId::Param)],
            CodedIndexType::HasDeclSecurity => &[
                Some(TableId::TypeDef),
                Some(TableId::MethodDef),
                Some(TableId::Assembly),
            ],
            CodedIndexType::MemberRefParent => &[
                Some(TableId::TypeDef),
                Some(TableId::TypeRef),
                Some(TableId::ModuleRef),
                Some(TableId::MethodDef),
                Some(TableId::TypeSpec),
            ],
            CodedIndexType::HasSemantics => &[Some(TableId::Event), Some(TableId::Property)],
            CodedIndexType::MethodDefOrRef => &[Some(TableId::MethodDef), Some(TableId::MemberRef)],
            CodedIndexType::MemberForwarded => &[Some(TableId::Field), Some(TableId::MethodDef)],
            CodedIndexType::Implementation => &[
                Some(TableId::File),
                Some(TableId::AssemblyRef),
                Some(TableId::ExportedType),
            ],
            CodedIndexType::CustomAttributeType => &[
                None,
                None,
                Some(TableId::MethodDef),
                Some(TableId::MemberRef),
                None,
            ],
            CodedIndexType::ResolutionScope => &[
                Some(TableId::Module),
                Some(TableId::ModuleRef),
                Some(TableId::AssemblyRef),
                Some(TableId::TypeRef),
            ],
            CodedIndexType::TypeOrMethodDef => &[Some(TableId::TypeDef), Some(TableId::MethodDef)],
        }
    }

    /// Tag value of `table` in this kind's list, if the table is a member.
    #[must_use]
    pub fn tag_of(self, table: TableId) -> Option<u32> {
        self.tables()
            .iter()
            .position(|entry| *entry == Some(table))
            .and_then(|position| u32::try_from(position).ok())
    }
}

/// A decoded coded index column: the selected table and the row as stored (1-based,
/// 0 meaning null).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodedIndex {
    /// The table selected by the tag bits
    pub tag: TableId,
    /// 1-based row, 0 if the column is null
    pub row: u32,
}

impl CodedIndex {
    /// Read a coded index column of kind `ci_type` at `offset` and advance past it.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] on truncated data or [`Error::Malformed`] for a tag
    /// outside the kind's table list.
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        info: &TableInfo,
        ci_type: CodedIndexType,
    ) -> Result<Self> {
        let value = read_le_at_dyn(data, offset, info.coded_index_bytes(ci_type) == 4)?;
        Self::decode(value, ci_type)
    }

    /// Split a raw coded index value into table and row.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the tag selects no table.
    pub fn decode(value: u32, ci_type: CodedIndexType) -> Result<Self> {
        let tag_bits = ci_type.tag_bits();
        let tag = value & ((1 << tag_bits) - 1);

        match ci_type.tables().get(tag as usize).copied().flatten() {
            Some(table) => Ok(CodedIndex {
                tag: table,
                row: value >> tag_bits,
            }),
            None => Err(malformed_error!(
                "Invalid tag {} for coded index {:?} - {:#x}",
                tag,
                ci_type,
                value
            )),
        }
    }

    /// Pack `table` and a 1-based `row` into a raw value of kind `ci_type`.
    ///
    /// Returns `None` if the table is not part of the kind's list.
    #[must_use]
    pub fn encode(table: TableId, row: u32, ci_type: CodedIndexType) -> Option<u32> {
        let tag = ci_type.tag_of(table)?;
        Some((row << ci_type.tag_bits()) | tag)
    }

    /// Returns true if the column holds no reference.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.row == 0
    }

    /// Resolve to the selected table and a 0-based row inside it.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTypeReference`] if the row is null or past the end of
    /// the selected table.
    pub fn resolve(&self, info: &TableInfo) -> Result<(TableId, usize)> {
        let rows = info.rows(self.tag);
        if self.row == 0 || self.row > rows {
            return Err(Error::UnresolvedTypeReference {
                table: self.tag,
                row: self.row,
                rows: rows as usize,
            });
        }

        Ok((self.tag, self.row as usize - 1))
    }
}
