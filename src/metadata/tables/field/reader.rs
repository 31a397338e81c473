use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{FieldRaw, RowReadable, TableId, TableInfo},
        token::Token,
    },
    Result,
};

impl RowReadable for FieldRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* flags */     2 +
            /* name */      sizes.str_bytes() +
            /* signature */ sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self> {
        Ok(FieldRaw {
            rid,
            token: Token::from_row(TableId::Field, rid),
            offset: *offset,
            flags: read_le_at::<u16>(data, offset)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{FieldAttributes, MetadataTable};

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = vec![
            0x06, 0x00, // flags
            0x21, 0x00, // name
            0x07, 0x00, // signature
        ];

        let sizes = TableInfo::from_row_counts(&[(TableId::Field, 1)]);
        let table = MetadataTable::<FieldRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.token.value(), 0x0400_0001);
        assert_eq!(row.flags & FieldAttributes::FIELD_ACCESS_MASK, FieldAttributes::PUBLIC);
        assert_eq!(row.name, 0x21);
        assert_eq!(row.signature, 0x07);
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x01, 0x00, // flags
            0x21, 0x00, 0x01, 0x00, // name
            0x07, 0x00, 0x02, 0x00, // signature
        ];

        let sizes =
            TableInfo::from_row_counts(&[(TableId::Field, 1)]).with_heap_sizes(true, false, true);
        let table = MetadataTable::<FieldRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.name, 0x0001_0021);
        assert_eq!(row.signature, 0x0002_0007);
    }
}
