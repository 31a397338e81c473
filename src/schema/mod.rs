//! Schema derivation: from member signatures and attributes to property shapes.
//!
//! - [`value`] - the [`ValueSchema`] tree every property is described with
//! - [`shape`] - ordered [`Shape`]s and the [`Override`]s merged on top of them
//! - [`registry`] - how named game types are represented
//! - [`decoder`] - member signatures to [`ValueSchema`]s
//! - [`builder`] - type, event and conditional shapes

pub mod builder;
pub mod decoder;
pub mod registry;
pub mod shape;
pub mod value;

pub use builder::{
    rooms_entry, row_entry, structural_keys, EventInfo, EventOptions, ShapeBuilder,
    NO_DEFAULT_ROW,
};
pub use decoder::{MemberKind, MemberSite, SignatureDecoder};
pub use registry::{NamedType, TypeRegistry};
pub use shape::{Diagnostic, Override, OverrideAction, Shape, ShapeEntry};
pub use value::{FloatRange, IntRange, ValueSchema};
