//! The assembly image: heaps and decoded tables of one metadata root.
//!
//! [`AssemblyImage`] borrows the `#Strings` and `#Blob` heaps from the metadata buffer and
//! owns the decoded rows of the seven tables this crate reads. It is built once and never
//! mutated afterwards; everything derived from it is a pure computation.
//!
//! # Member ranges
//!
//! TypeDef rows name their first Field and first MethodDef row. The owned run ends where
//! the next TypeDef's run begins, or at the end of the member table for the last TypeDef.
//! Properties are reached through the PropertyMap table in the same way.

use std::ops::Range;

use crate::{
    metadata::{
        root::Root,
        streams::{Blob, Strings, TablesHeader},
        tables::{
            CodedIndex, CustomAttributeRaw, FieldRaw, MetadataTable, MethodDefRaw,
            PropertyMapRaw, PropertyRaw, TableId, TableInfoRef, TypeDefRaw, TypeRefRaw,
        },
    },
    Error, Result,
};

/// Heaps and tables of a loaded assembly.
///
/// # Examples
///
/// ```rust,no_run
/// use rdschema::{AssemblyImage, File};
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
/// let image = AssemblyImage::read(file.metadata()?)?;
/// for row in 0..image.typedefs().len() {
///     println!("{}", image.full_type_name(row)?);
/// }
/// # Ok::<(), rdschema::Error>(())
/// ```
pub struct AssemblyImage<'a> {
    strings: Strings<'a>,
    blob: Blob<'a>,
    tables: TablesHeader,
}

impl<'a> AssemblyImage<'a> {
    /// Load the image from a metadata root (the bytes starting with `BSJB`).
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the root or one of the `#~`, `#Strings` and `#Blob`
    /// streams is damaged or missing, [`Error::NotSupported`] for uncompressed `#-` table
    /// streams, and any error of [`TablesHeader::from`].
    pub fn read(metadata_root: &'a [u8]) -> Result<AssemblyImage<'a>> {
        let root = Root::read(metadata_root)?;
        log::debug!(
            "Metadata root {} with {} streams",
            root.version,
            root.stream_headers.len()
        );

        if root.stream("#-").is_some() {
            return Err(Error::NotSupported(
                "uncompressed #- table stream".to_string(),
            ));
        }

        let tables = TablesHeader::from(root.stream_data(metadata_root, "#~")?)?;
        let strings = Strings::from(root.stream_data(metadata_root, "#Strings")?)?;
        let blob = Blob::from(root.stream_data(metadata_root, "#Blob")?)?;

        Ok(AssemblyImage::from_parts(strings, blob, tables))
    }

    /// Assemble an image from already decoded parts.
    #[must_use]
    pub fn from_parts(strings: Strings<'a>, blob: Blob<'a>, tables: TablesHeader) -> Self {
        AssemblyImage {
            strings,
            blob,
            tables,
        }
    }

    /// The `#Strings` heap
    #[must_use]
    pub fn strings(&self) -> Strings<'a> {
        self.strings
    }

    /// The `#Blob` heap
    #[must_use]
    pub fn blob(&self) -> &Blob<'a> {
        &self.blob
    }

    /// Row counts and index widths of all tables
    #[must_use]
    pub fn info(&self) -> &TableInfoRef {
        &self.tables.info
    }

    /// The decoded `#~` stream
    #[must_use]
    pub fn tables(&self) -> &TablesHeader {
        &self.tables
    }

    /// TypeDef rows
    #[must_use]
    pub fn typedefs(&self) -> &MetadataTable<TypeDefRaw> {
        &self.tables.typedefs
    }

    /// TypeRef rows
    #[must_use]
    pub fn typerefs(&self) -> &MetadataTable<TypeRefRaw> {
        &self.tables.typerefs
    }

    /// MethodDef rows
    #[must_use]
    pub fn methoddefs(&self) -> &MetadataTable<MethodDefRaw> {
        &self.tables.methoddefs
    }

    /// Field rows
    #[must_use]
    pub fn fields(&self) -> &MetadataTable<FieldRaw> {
        &self.tables.fields
    }

    /// Property rows
    #[must_use]
    pub fn properties(&self) -> &MetadataTable<PropertyRaw> {
        &self.tables.properties
    }

    /// PropertyMap rows
    #[must_use]
    pub fn property_maps(&self) -> &MetadataTable<PropertyMapRaw> {
        &self.tables.property_maps
    }

    /// CustomAttribute rows
    #[must_use]
    pub fn custom_attributes(&self) -> &MetadataTable<CustomAttributeRaw> {
        &self.tables.custom_attributes
    }

    /// String at `index` in the `#Strings` heap.
    ///
    /// # Errors
    /// See [`Strings::get`].
    pub fn string(&self, index: u32) -> Result<&'a str> {
        self.strings.get(index as usize)
    }

    /// Full name (`namespace\0name`) of the TypeDef at 0-based `row`.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTypeReference`] if the row does not exist, or a heap
    /// error for a damaged name.
    pub fn full_type_name(&self, row: usize) -> Result<String> {
        let typedef = self
            .typedefs()
            .get(row)
            .ok_or_else(|| self.missing_row(TableId::TypeDef, row))?;

        self.join_name(typedef.type_namespace, typedef.type_name)
    }

    /// Full name of the TypeRef at 0-based `row`.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTypeReference`] if the row does not exist, or a heap
    /// error for a damaged name.
    pub fn full_typeref_name(&self, row: usize) -> Result<String> {
        let typeref = self
            .typerefs()
            .get(row)
            .ok_or_else(|| self.missing_row(TableId::TypeRef, row))?;

        self.join_name(typeref.type_namespace, typeref.type_name)
    }

    /// Full name of the type a `TypeDefOrRef` coded index points at.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTypeReference`] for null or dangling references and for
    /// TypeSpec references, which have no name.
    pub fn type_name_of(&self, index: &CodedIndex) -> Result<String> {
        match index.resolve(self.info())? {
            (TableId::TypeDef, row) => self.full_type_name(row),
            (TableId::TypeRef, row) => self.full_typeref_name(row),
            (table, _) => Err(Error::UnresolvedTypeReference {
                table,
                row: index.row,
                rows: self.info().rows(table) as usize,
            }),
        }
    }

    /// Field rows owned by the TypeDef at 0-based `typedef`.
    #[must_use]
    pub fn field_range(&self, typedef: usize) -> Range<usize> {
        let fields = self.fields();
        self.owned_range(typedef, fields.len(), |row| fields.list_start(row.field_list))
    }

    /// MethodDef rows owned by the TypeDef at 0-based `typedef`.
    #[must_use]
    pub fn method_range(&self, typedef: usize) -> Range<usize> {
        let methods = self.methoddefs();
        self.owned_range(typedef, methods.len(), |row| {
            methods.list_start(row.method_list)
        })
    }

    /// Property rows owned by the TypeDef at 0-based `typedef`.
    ///
    /// Empty if no PropertyMap row names the type as its parent.
    #[must_use]
    pub fn property_range(&self, typedef: usize) -> Range<usize> {
        let maps = self.property_maps();
        let properties = self.properties();

        let Some(map_index) = maps
            .iter()
            .position(|map| map.parent as usize == typedef + 1)
        else {
            return 0..0;
        };

        let start = maps
            .get(map_index)
            .map_or(0, |map| properties.list_start(map.property_list));
        let end = maps
            .get(map_index + 1)
            .map_or(properties.len(), |next| {
                properties.list_start(next.property_list)
            });

        start..end.max(start)
    }

    fn owned_range(
        &self,
        typedef: usize,
        member_count: usize,
        first_member: impl Fn(&TypeDefRaw) -> usize,
    ) -> Range<usize> {
        let typedefs = self.typedefs();
        let Some(row) = typedefs.get(typedef) else {
            return 0..0;
        };

        let start = first_member(row);
        let end = typedefs
            .get(typedef + 1)
            .map_or(member_count, &first_member);

        start..end.max(start)
    }

    fn join_name(&self, namespace: u32, name: u32) -> Result<String> {
        let namespace = self.string(namespace)?;
        let name = self.string(name)?;
        Ok(format!("{namespace}\0{name}"))
    }

    fn missing_row(&self, table: TableId, row: usize) -> Error {
        Error::UnresolvedTypeReference {
            table,
            row: u32::try_from(row + 1).unwrap_or(u32::MAX),
            rows: self.info().rows(table) as usize,
        }
    }
}
