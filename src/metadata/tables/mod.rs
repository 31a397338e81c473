//! Metadata tables of the `#~` stream.
//!
//! Each supported table has a `*Raw` row type implementing [`RowReadable`]. Rows are
//! decoded eagerly into a [`MetadataTable`]; columns keep heap and table indices as stored
//! so that resolution happens through [`crate::AssemblyImage`].
//!
//! # Key Components
//! - [`TableId`] - Table numbers 0x00 to 0x2C
//! - [`TableInfo`] - Row counts, index widths and row sizes of every table
//! - [`CodedIndex`] / [`CodedIndexType`] - Tagged cross-table references
//! - [`TypeDefRaw`], [`TypeRefRaw`], [`MethodDefRaw`], [`FieldRaw`], [`PropertyRaw`],
//!   [`PropertyMapRaw`], [`CustomAttributeRaw`] - The rows this crate decodes

mod codedindex;
mod table;
mod tableid;
mod tableinfo;

mod customattribute;
mod field;
mod methoddef;
mod property;
mod propertymap;
mod typedef;
mod typeref;

pub use codedindex::{CodedIndex, CodedIndexType};
pub use table::{MetadataTable, RowReadable};
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

pub use customattribute::*;
pub use field::*;
pub use methoddef::*;
pub use property::*;
pub use propertymap::*;
pub use typedef::*;
pub use typeref::*;
