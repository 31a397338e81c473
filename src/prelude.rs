//! # rdschema Prelude
//!
//! The types needed to load an assembly and derive schemas from it, for glob imports.

/// The main error type
pub use crate::Error;

/// The result type used throughout rdschema
pub use crate::Result;

/// Input file and byte parsing
pub use crate::{File, Parser};

/// Loaded metadata
pub use crate::{AssemblyImage, MetadataContext, SchemaConfig};

/// Schema derivation
pub use crate::{
    Diagnostic, EventOptions, Shape, ShapeBuilder, ShapeEntry, TypeRegistry, ValueSchema,
};

/// The level catalog
pub use crate::{build_level, character, LevelSchema};
