use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfo, TypeDefRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeDefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* flags */             4 +
            /* type_name */         sizes.str_bytes() +
            /* type_namespace */    sizes.str_bytes() +
            /* extends */           sizes.coded_index_bytes(CodedIndexType::TypeDefOrRef) +
            /* field_list */        sizes.table_index_bytes(TableId::Field) +
            /* method_list */       sizes.table_index_bytes(TableId::MethodDef)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::from_row(TableId::TypeDef, rid),
            offset: *offset,
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
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
            0x01, 0x00, 0x10, 0x00, // flags
            0x42, 0x00, // type_name
            0x43, 0x00, // type_namespace
            0x05, 0x00, // extends
            0x03, 0x00, // field_list
            0x04, 0x00, // method_list
        ];

        let sizes = TableInfo::from_row_counts(&[
            (TableId::TypeDef, 1),
            (TableId::TypeRef, 1),
            (TableId::Field, 3),
            (TableId::MethodDef, 4),
        ]);
        assert_eq!(TypeDefRaw::row_size(&sizes), sizes.row_size(TableId::TypeDef));

        let table = MetadataTable::<TypeDefRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x0200_0001);
        assert_eq!(row.flags, 0x0010_0001);
        assert_eq!(row.type_name, 0x42);
        assert_eq!(row.type_namespace, 0x43);
        assert_eq!(row.extends, CodedIndex { tag: TableId::TypeRef, row: 1 });
        assert_eq!(row.field_list, 3);
        assert_eq!(row.method_list, 4);
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x00, 0x00, 0x00, 0x00, // flags
            0x10, 0x00, 0x01, 0x00, // type_name
            0x20, 0x00, 0x01, 0x00, // type_namespace
            0x04, 0x00, // extends
            0x01, 0x00, 0x01, 0x00, // field_list
            0x02, 0x00, 0x01, 0x00, // method_list
        ];

        let sizes = TableInfo::from_row_counts(&[
            (TableId::TypeDef, 1),
            (TableId::Field, u32::from(u16::MAX) + 2),
            (TableId::MethodDef, u32::from(u16::MAX) + 2),
        ])
        .with_heap_sizes(true, false, false);

        let table = MetadataTable::<TypeDefRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.type_name, 0x0001_0010);
        assert_eq!(row.type_namespace, 0x0001_0020);
        assert_eq!(row.extends, CodedIndex { tag: TableId::TypeDef, row: 1 });
        assert_eq!(row.field_list, 0x0001_0001);
        assert_eq!(row.method_list, 0x0001_0002);
    }

    #[test]
    fn truncated() {
        let sizes = TableInfo::from_row_counts(&[(TableId::TypeDef, 2)]);
        let data = [0_u8; 20];
        assert!(MetadataTable::<TypeDefRaw>::read(&data, 2, &sizes).is_err());
    }
}
