use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{PropertyRaw, RowReadable, TableId, TableInfo},
        token::Token,
    },
    Result,
};

impl RowReadable for PropertyRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* flags */     2 +
            /* name */      sizes.str_bytes() +
            /* signature */ sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self> {
        Ok(PropertyRaw {
            rid,
            token: Token::from_row(TableId::Property, rid),
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
    use crate::metadata::tables::MetadataTable;

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = vec![
            0x00, 0x02, // flags
            0x11, 0x00, // name
            0x22, 0x00, // signature
        ];

        let sizes = TableInfo::from_row_counts(&[(TableId::Property, 1)]);
        let table = MetadataTable::<PropertyRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.token.value(), 0x1700_0001);
        assert_eq!(row.flags, 0x0200);
        assert_eq!(row.name, 0x11);
        assert_eq!(row.signature, 0x22);
    }
}
