use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, CustomAttributeRaw, RowReadable, TableId, TableInfo},
        token::Token,
    },
    Result,
};

impl RowReadable for CustomAttributeRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* parent */        sizes.coded_index_bytes(CodedIndexType::HasCustomAttribute) +
            /* constructor */   sizes.coded_index_bytes(CodedIndexType::CustomAttributeType) +
            /* value */         sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self> {
        Ok(CustomAttributeRaw {
            rid,
            token: Token::from_row(TableId::CustomAttribute, rid),
            offset: *offset,
            parent: CodedIndex::read(data, offset, sizes, CodedIndexType::HasCustomAttribute)?,
            constructor: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::CustomAttributeType,
            )?,
            value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
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
            0x41, 0x00, // parent: Field row 2
            0x1A, 0x00, // constructor: MethodDef row 3
            0x10, 0x00, // value
        ];

        let sizes = TableInfo::from_row_counts(&[
            (TableId::CustomAttribute, 1),
            (TableId::Field, 2),
            (TableId::MethodDef, 3),
        ]);
        let table = MetadataTable::<CustomAttributeRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.token.value(), 0x0C00_0001);
        assert_eq!(row.parent, CodedIndex { tag: TableId::Field, row: 2 });
        assert_eq!(row.constructor, CodedIndex { tag: TableId::MethodDef, row: 3 });
        assert_eq!(row.value, 0x10);
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x29, 0x00, 0x00, 0x00, // parent: Property row 1
            0x12, 0x00, // constructor: MethodDef row 2
            0x10, 0x00, // value
        ];

        let sizes = TableInfo::from_row_counts(&[
            (TableId::CustomAttribute, 1),
            (TableId::Field, 1 << 11),
            (TableId::Property, 1),
            (TableId::MethodDef, 2),
        ]);
        let table = MetadataTable::<CustomAttributeRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.parent, CodedIndex { tag: TableId::Property, row: 1 });
        assert_eq!(row.constructor, CodedIndex { tag: TableId::MethodDef, row: 2 });
    }
}
