use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfo, TypeRefRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeRefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* resolution_scope */  sizes.coded_index_bytes(CodedIndexType::ResolutionScope) +
            /* type_name */         sizes.str_bytes() +
            /* type_namespace */    sizes.str_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self> {
        Ok(TypeRefRaw {
            rid,
            token: Token::from_row(TableId::TypeRef, rid),
            offset: *offset,
            resolution_scope: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::ResolutionScope,
            )?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::MetadataTable;

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = vec![
            0x0A, 0x00, // resolution_scope
            0x10, 0x00, // type_name
            0x20, 0x00, // type_namespace
            0x0A, 0x00, // resolution_scope
            0x30, 0x00, // type_name
            0x40, 0x00, // type_namespace
        ];

        let sizes = TableInfo::from_row_counts(&[(TableId::TypeRef, 2), (TableId::AssemblyRef, 2)]);
        let table = MetadataTable::<TypeRefRaw>::read(&data, 2, &sizes).unwrap();
        assert_eq!(table.len(), 2);

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 2);
        assert_eq!(row.token.value(), 0x0100_0002);
        assert_eq!(row.offset, 6);
        assert_eq!(
            row.resolution_scope,
            CodedIndex { tag: TableId::AssemblyRef, row: 2 }
        );
        assert_eq!(row.type_name, 0x30);
        assert_eq!(row.type_namespace, 0x40);
    }
}
