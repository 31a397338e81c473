use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::parser::Parser,
    metadata::tables::{
        CustomAttributeRaw, FieldRaw, MetadataTable, MethodDefRaw, PropertyMapRaw, PropertyRaw,
        TableId, TableInfo, TableInfoRef, TypeDefRaw, TypeRefRaw,
    },
    Error, Result,
};

/// Size of the fixed part of the `#~` header, before the row counts
const TABLES_HEADER_SIZE: usize = 24;

/// The decoded `#~` stream.
///
/// The header carries a bit vector of present tables followed by their row counts. The
/// row data of every present table follows in table-number order; tables this crate does
/// not use are skipped by their computed size, the seven it uses are decoded eagerly.
///
/// Streams that use pointer tables or reference portable PDB tables are rejected with
/// [`Error::NotSupported`].
#[derive(Clone, Debug)]
pub struct TablesHeader {
    /// Major version of the table schema, 2 for runtime assemblies
    pub major_version: u8,
    /// Minor version of the table schema
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    /// TypeDef rows
    pub typedefs: MetadataTable<TypeDefRaw>,
    /// TypeRef rows
    pub typerefs: MetadataTable<TypeRefRaw>,
    /// MethodDef rows
    pub methoddefs: MetadataTable<MethodDefRaw>,
    /// Field rows
    pub fields: MetadataTable<FieldRaw>,
    /// Property rows
    pub properties: MetadataTable<PropertyRaw>,
    /// PropertyMap rows
    pub property_maps: MetadataTable<PropertyMapRaw>,
    /// CustomAttribute rows
    pub custom_attributes: MetadataTable<CustomAttributeRaw>,
}

impl TablesHeader {
    /// Decode a `#~` stream.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the stream is shorter than its row counts imply,
    /// [`Error::Malformed`] if no table is present, or [`Error::NotSupported`] for pointer
    /// tables and tables beyond `GenericParamConstraint`.
    pub fn from(data: &[u8]) -> Result<TablesHeader> {
        let mut parser = Parser::new(data);
        parser.ensure_remaining(TABLES_HEADER_SIZE)?;

        parser.advance_by(4)?;
        let major_version = parser.read_le::<u8>()?;
        let minor_version = parser.read_le::<u8>()?;
        parser.advance_by(2)?;
        let valid = parser.read_le::<u64>()?;
        let sorted = parser.read_le::<u64>()?;

        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        if valid >> TableId::COUNT != 0 {
            return Err(Error::NotSupported(format!(
                "tables beyond GenericParamConstraint are present - valid mask {:#018x}",
                valid
            )));
        }

        let info = Arc::new(TableInfo::read(data, valid)?);

        let mut tables_header = TablesHeader {
            major_version,
            minor_version,
            valid,
            sorted,
            info: info.clone(),
            typedefs: MetadataTable::default(),
            typerefs: MetadataTable::default(),
            methoddefs: MetadataTable::default(),
            fields: MetadataTable::default(),
            properties: MetadataTable::default(),
            property_maps: MetadataTable::default(),
            custom_attributes: MetadataTable::default(),
        };

        let mut current_offset = TABLES_HEADER_SIZE + valid.count_ones() as usize * 4;
        for table_id in TableId::iter() {
            let rows = info.rows(table_id);
            if rows == 0 {
                continue;
            }

            if table_id.is_indirection() {
                return Err(Error::NotSupported(format!(
                    "{:?} table present - unoptimized metadata layouts are not supported",
                    table_id
                )));
            }

            let size = rows as usize * info.row_size(table_id) as usize;
            let Some(table_data) = current_offset
                .checked_add(size)
                .and_then(|end| data.get(current_offset..end))
            else {
                return Err(Error::OutOfBounds {
                    offset: current_offset,
                    needed: size,
                    len: data.len(),
                });
            };

            tables_header.add_table(table_data, table_id, rows)?;
            log::debug!("{:?}: {} rows at offset {:#x}", table_id, rows, current_offset);

            current_offset += size;
        }

        Ok(tables_header)
    }

    /// Number of present tables
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Returns true if `table` is marked present
    #[must_use]
    pub fn has_table(&self, table: TableId) -> bool {
        self.valid & (1 << table as u64) != 0
    }

    fn add_table(&mut self, data: &[u8], table_id: TableId, rows: u32) -> Result<()> {
        let info = &self.info;
        match table_id {
            TableId::TypeDef => self.typedefs = MetadataTable::read(data, rows, info)?,
            TableId::TypeRef => self.typerefs = MetadataTable::read(data, rows, info)?,
            TableId::MethodDef => self.methoddefs = MetadataTable::read(data, rows, info)?,
            TableId::Field => self.fields = MetadataTable::read(data, rows, info)?,
            TableId::Property => self.properties = MetadataTable::read(data, rows, info)?,
            TableId::PropertyMap => self.property_maps = MetadataTable::read(data, rows, info)?,
            TableId::CustomAttribute => {
                self.custom_attributes = MetadataTable::read(data, rows, info)?;
            }
            _ => {}
        }

        Ok(())
    }
}
