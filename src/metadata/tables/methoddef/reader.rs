use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{MethodDefRaw, RowReadable, TableId, TableInfo},
        token::Token,
    },
    Result,
};

impl RowReadable for MethodDefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* rva */           4 +
            /* impl_flags */    2 +
            /* flags */         2 +
            /* name */          sizes.str_bytes() +
            /* signature */     sizes.blob_bytes() +
            /* param_list */    sizes.table_index_bytes(TableId::Param)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::from_row(TableId::MethodDef, rid),
            offset: *offset,
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: read_le_at::<u16>(data, offset)?,
            flags: read_le_at::<u16>(data, offset)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{MetadataTable, MethodAttributes};

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = vec![
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x86, 0x18, // flags: public hidebysig specialname rtspecialname
            0x12, 0x00, // name
            0x34, 0x00, // signature
            0x01, 0x00, // param_list
        ];

        let sizes = TableInfo::from_row_counts(&[(TableId::MethodDef, 1), (TableId::Param, 1)]);
        let table = MetadataTable::<MethodDefRaw>::read(&data, 1, &sizes).unwrap();
        let row = table.get(0).unwrap();

        assert_eq!(row.token.value(), 0x0600_0001);
        assert_eq!(row.rva, 0x2050);
        assert_eq!(row.flags, 0x1886);
        assert_eq!(row.name, 0x12);
        assert_eq!(row.signature, 0x34);
        assert_eq!(row.param_list, 1);
        assert!(row.is_special_name());
        assert!(row.attributes().contains(MethodAttributes::RTSPECIAL_NAME));
        assert!(!row.attributes().contains(MethodAttributes::STATIC));
    }
}
