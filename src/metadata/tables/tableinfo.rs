use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::{read_le, read_le_at},
    metadata::tables::{CodedIndexType, TableId},
    Result,
};

/// Row count of one table and whether indices into it need 4 bytes.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows in the table
    pub rows: u32,
    /// Simple indices into this table are 4 bytes wide
    pub is_large: bool,
}

impl TableRowInfo {
    /// Create the info for a table with `rows` rows
    #[must_use]
    pub fn new(rows: u32) -> Self {
        Self {
            rows,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and index widths of a `#~` stream.
///
/// Every column that references a heap or another table is either 2 or 4 bytes wide,
/// depending on the heap-size flags and on the row counts of the referenced tables. This
/// structure answers those width questions and computes each table's row size from its
/// ECMA-335 column layout.
#[derive(Clone, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared reference to the [`TableInfo`] of a stream
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Read the heap-size flags and row counts of a `#~` stream.
    ///
    /// Row counts follow the 24-byte header, one `u32` per bit set in `valid_bitvec`, in
    /// table-number order. The caller validates that no bit beyond the known tables is set.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the stream is too short for its row counts.
    pub fn read(data: &[u8], valid_bitvec: u64) -> Result<Self> {
        let mut rows = vec![TableRowInfo::default(); TableId::COUNT];
        let mut next_row_offset = 24;

        for table_id in TableId::iter() {
            if (valid_bitvec & (1 << table_id as usize)) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            rows[table_id as usize] = TableRowInfo::new(row_count);
        }

        let heap_size_flags = read_le::<u8>(&data[6.min(data.len())..])?;
        let mut table_info = TableInfo {
            rows,
            coded_indexes: vec![2; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & 1 == 1,
            is_large_index_guid: heap_size_flags & 2 == 2,
            is_large_index_blob: heap_size_flags & 4 == 4,
        };

        table_info.calculate_coded_index_bytes();

        Ok(table_info)
    }

    /// Build an info from explicit row counts, with 2-byte heap indices.
    #[must_use]
    pub fn from_row_counts(row_counts: &[(TableId, u32)]) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![2; CodedIndexType::COUNT],
            is_large_index_str: false,
            is_large_index_guid: false,
            is_large_index_blob: false,
        };

        for (table, rows) in row_counts {
            table_info.rows[*table as usize] = TableRowInfo::new(*rows);
        }

        table_info.calculate_coded_index_bytes();
        table_info
    }

    /// Override the heap index widths.
    #[must_use]
    pub fn with_heap_sizes(mut self, large_str: bool, large_guid: bool, large_blob: bool) -> Self {
        self.is_large_index_str = large_str;
        self.is_large_index_guid = large_guid;
        self.is_large_index_blob = large_blob;
        self
    }

    /// The heap-size flags byte these widths correspond to.
    #[must_use]
    pub fn heap_size_flags(&self) -> u8 {
        u8::from(self.is_large_index_str)
            | (u8::from(self.is_large_index_guid) << 1)
            | (u8::from(self.is_large_index_blob) << 2)
    }

    /// Returns the row info of `table`
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Returns the number of rows of `table`
    #[must_use]
    pub fn rows(&self, table: TableId) -> u32 {
        self.rows[table as usize].rows
    }

    /// Returns true if simple indices into `id` are 4 bytes wide
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// Returns true if `#Strings` indices are 4 bytes wide
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// Returns true if `#Blob` indices are 4 bytes wide
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Width of a simple index into `table_id`
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.is_large(table_id) {
            4
        } else {
            2
        }
    }

    /// Width of a coded index column of kind `coded_index_type`
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        self.coded_indexes[coded_index_type as usize]
    }

    /// Size in bytes of one row of `table`.
    #[must_use]
    #[rustfmt::skip]
    pub fn row_size(&self, table: TableId) -> u32 {
        let str = self.str_bytes();
        let guid = self.guid_bytes();
        let blob = self.blob_bytes();
        let index = |table| self.table_index_bytes(table);
        let coded = |kind| self.coded_index_bytes(kind);

        let size = match table {
            TableId::Module                 => 2 + str + guid * 3,
            TableId::TypeRef                => coded(CodedIndexType::ResolutionScope) + str * 2,
            TableId::TypeDef                => 4 + str * 2 + coded(CodedIndexType::TypeDefOrRef)
                                                 + index(TableId::Field) + index(TableId::MethodDef),
            TableId::FieldPtr               => index(TableId::Field),
            TableId::Field                  => 2 + str + blob,
            TableId::MethodPtr              => index(TableId::MethodDef),
            TableId::MethodDef              => 4 + 2 + 2 + str + blob + index(TableId::Param),
            TableId::ParamPtr               => index(TableId::Param),
            TableId::Param                  => 2 + 2 + str,
            TableId::InterfaceImpl          => index(TableId::TypeDef) + coded(CodedIndexType::TypeDefOrRef),
            TableId::MemberRef              => coded(CodedIndexType::MemberRefParent) + str + blob,
            TableId::Constant               => 2 + coded(CodedIndexType::HasConstant) + blob,
            TableId::CustomAttribute        => coded(CodedIndexType::HasCustomAttribute)
                                                 + coded(CodedIndexType::CustomAttributeType) + blob,
            TableId::FieldMarshal           => coded(CodedIndexType::HasFieldMarshal) + blob,
            TableId::DeclSecurity           => 2 + coded(CodedIndexType::HasDeclSecurity) + blob,
            TableId::ClassLayout            => 2 + 4 + index(TableId::TypeDef),
            TableId::FieldLayout            => 4 + index(TableId::Field),
            TableId::StandAloneSig          => blob,
            TableId::EventMap               => index(TableId::TypeDef) + index(TableId::Event),
            TableId::EventPtr               => index(TableId::Event),
            TableId::Event                  => 2 + str + coded(CodedIndexType::TypeDefOrRef),
            TableId::PropertyMap            => index(TableId::TypeDef) + index(TableId::Property),
            TableId::PropertyPtr            => index(TableId::Property),
            TableId::Property               => 2 + str + blob,
            TableId::MethodSemantics        => 2 + index(TableId::MethodDef) + coded(CodedIndexType::HasSemantics),
            TableId::MethodImpl             => index(TableId::TypeDef) + coded(CodedIndexType::MethodDefOrRef) * 2,
            TableId::ModuleRef              => str,
            TableId::TypeSpec               => blob,
            TableId::ImplMap                => 2 + coded(CodedIndexType::MemberForwarded) + str
                                                 + index(TableId::ModuleRef),
            TableId::FieldRVA               => 4 + index(TableId::Field),
            TableId::EncLog                 => 4 + 4,
            TableId::EncMap                 => 4,
            TableId::Assembly               => 4 + 2 * 4 + 4 + blob + str * 2,
            TableId::AssemblyProcessor      => 4,
            TableId::AssemblyOS             => 4 * 3,
            TableId::AssemblyRef            => 2 * 4 + 4 + blob * 2 + str * 2,
            TableId::AssemblyRefProcessor   => 4 + index(TableId::AssemblyRef),
            TableId::AssemblyRefOS          => 4 * 3 + index(TableId::AssemblyRef),
            TableId::File                   => 4 + str + blob,
            TableId::ExportedType           => 4 + 4 + str * 2 + coded(CodedIndexType::Implementation),
            TableId::ManifestResource       => 4 + 4 + str + coded(CodedIndexType::Implementation),
            TableId::NestedClass            => index(TableId::TypeDef) * 2,
            TableId::GenericParam           => 2 + 2 + coded(CodedIndexType::TypeOrMethodDef) + str,
            TableId::MethodSpec             => coded(CodedIndexType::MethodDefOrRef) + blob,
            TableId::GenericParamConstraint => index(TableId::GenericParam) + coded(CodedIndexType::TypeDefOrRef),
        };

        u32::from(size)
    }

    fn calculate_coded_index_bytes(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_rows = coded_index.max_small_rows();
            let is_large = coded_index
                .tables()
                .iter()
                .filter_map(|table| *table)
                .any(|table| self.rows(table) >= max_rows);

            self.coded_indexes[coded_index as usize] = if is_large { 4 } else { 2 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_widths() {
        let info = TableInfo::from_row_counts(&[(TableId::TypeDef, 10), (TableId::Field, 20)]);

        assert_eq!(info.rows(TableId::TypeDef), 10);
        assert_eq!(info.rows(TableId::Property), 0);
        assert_eq!(info.row_size(TableId::TypeDef), 14);
        assert_eq!(info.row_size(TableId::Field), 6);
        assert_eq!(info.row_size(TableId::CustomAttribute), 6);
        assert_eq!(info.row_size(TableId::Module), 10);
    }

    #[test]
    fn coded_index_thresholds() {
        // 2^14 rows overflow the 14 row bits left by a 2-bit tag
        let info = TableInfo::from_row_counts(&[(TableId::TypeRef, 1 << 14)]);
        assert_eq!(info.coded_index_bytes(CodedIndexType::TypeDefOrRef), 4);
        assert_eq!(info.table_index_bytes(TableId::TypeRef), 2);

        let info = TableInfo::from_row_counts(&[(TableId::TypeRef, (1 << 14) - 1)]);
        assert_eq!(info.coded_index_bytes(CodedIndexType::TypeDefOrRef), 2);

        // HasCustomAttribute has a 5-bit tag
        let info = TableInfo::from_row_counts(&[(TableId::Field, 1 << 11)]);
        assert_eq!(info.coded_index_bytes(CodedIndexType::HasCustomAttribute), 4);
        assert_eq!(info.coded_index_bytes(CodedIndexType::TypeDefOrRef), 2);
        assert_eq!(info.row_size(TableId::CustomAttribute), 8);
    }

    #[test]
    fn large_heaps() {
        let info = TableInfo::from_row_counts(&[(TableId::Property, 70_000)])
            .with_heap_sizes(true, false, true);

        assert_eq!(info.heap_size_flags(), 0b101);
        assert_eq!(info.row_size(TableId::Property), 10);
        assert_eq!(info.row_size(TableId::PropertyMap), 6);
    }

    #[test]
    fn read_from_stream_header() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,                         // reserved
            0x02, 0x00,                                     // version
            0x05,                                           // heap sizes
            0x01,                                           // reserved
            0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // valid: Module, TypeDef
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sorted
            0x01, 0x00, 0x00, 0x00,                         // Module rows
            0x2A, 0x00, 0x00, 0x00,                         // TypeDef rows
        ];

        let info = TableInfo::read(&data, 0b101).unwrap();
        assert_eq!(info.rows(TableId::Module), 1);
        assert_eq!(info.rows(TableId::TypeDef), 42);
        assert!(info.is_large_str());
        assert!(info.is_large_blob());
        assert_eq!(info.guid_bytes(), 2);

        assert!(TableInfo::read(&data[..30], 0b101).is_err());
    }
}
