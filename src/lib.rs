// Copyright 2025 The rdschema Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # rdschema
//!
//! Derives the schemas of Rhythm Doctor level files from the game's own assembly.
//!
//! The level editor describes every event type in code: which fields are saved, under
//! which JSON name, and within which numeric ranges. `rdschema` reads that description
//! straight out of the ECMA-335 metadata of the game assembly, without a .NET runtime,
//! and renders it as a JSON Schema document and as TypeScript declarations.
//!
//! ## Features
//!
//! - **Metadata reader** - PE container, metadata root, `#Strings`/`#Blob` heaps and the
//!   seven tables schema derivation needs, read from a memory-mapped file
//! - **Signature decoder** - Field and property signatures to a [`ValueSchema`] tree,
//!   with range attributes applied
//! - **Shape builder** - Marked members of a type, plus the structural keys of level
//!   events and conditionals
//! - **Catalog** - The level object with its derived and hand-written events, and the
//!   character file
//! - **Emitters** - Draft-07 JSON Schema and TypeScript output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rdschema::prelude::*;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
//! let image = AssemblyImage::read(file.metadata()?)?;
//! let ctx = MetadataContext::new(&image, SchemaConfig::default())?;
//!
//! let level = build_level(&ctx)?;
//! for diagnostic in &level.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! let document = rdschema::emit::json_schema::level(&level);
//! println!("{document:#}");
//! # Ok::<(), rdschema::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Metadata root, streams, tables, the [`AssemblyImage`] and the
//!   [`MetadataContext`] built over it
//! - [`schema`] - [`ValueSchema`], [`Shape`], the [`TypeRegistry`], the
//!   [`SignatureDecoder`] and the [`ShapeBuilder`]
//! - [`catalog`] - Event and conditional types of a level file, their overrides, the
//!   hand-written shapes and the character file
//! - [`emit`] - JSON Schema and TypeScript rendering
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Every error aborts the run; types
//! the registry does not know are reported as [`Diagnostic`]s instead.
//!
//! ```rust,no_run
//! use rdschema::{AssemblyImage, Error};
//!
//! match AssemblyImage::read(&[]) {
//!     Ok(_) => println!("Loaded"),
//!     Err(Error::NotSupported(what)) => println!("Not supported: {what}"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed: {message}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo +nightly fuzz run metadata --release
//! ```

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use rdschema::prelude::*;
///
/// let file = File::from_file("Assembly-CSharp.dll".as_ref())?;
/// let image = AssemblyImage::read(file.metadata()?)?;
/// let ctx = MetadataContext::new(&image, SchemaConfig::default())?;
/// let shape = ShapeBuilder::new(&ctx).type_shape("RDLevelEditor\0SoundDataStruct")?;
/// # Ok::<(), rdschema::Error>(())
/// ```
pub mod prelude;

/// ECMA-335 metadata reading: root, streams, tables, image and context.
pub mod metadata;

/// Schema derivation from member signatures and attributes.
pub mod schema;

/// The event and conditional types of a level file.
pub mod catalog;

/// JSON Schema and TypeScript output.
pub mod emit;

/// `rdschema` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `rdschema` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use rdschema::{AssemblyImage, Error, MetadataContext, SchemaConfig, ShapeBuilder};
///
/// # let image: AssemblyImage = unimplemented!();
/// let ctx = MetadataContext::new(&image, SchemaConfig::default())?;
/// match ShapeBuilder::new(&ctx).event_shape("PlaySound", Default::default()) {
///     Ok(shape) => println!("{} properties", shape.len()),
///     Err(Error::TypeNotFound(name)) => println!("No such type: {name:?}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// # Ok::<(), rdschema::Error>(())
/// ```
pub use error::Error;

/// Low-level file and byte parsing.
pub use file::{parser::Parser, File};

/// Metadata streams and heaps.
pub use metadata::streams::{Blob, StreamHeader, Strings, TablesHeader};

/// Loaded metadata and the lookups built over it.
pub use metadata::{
    context::{MarkerNames, MetadataContext, SchemaConfig},
    image::AssemblyImage,
};

/// Schema trees, shapes and the builders producing them.
pub use schema::{
    Diagnostic, EventOptions, FloatRange, IntRange, NamedType, Override, OverrideAction, Shape,
    ShapeBuilder, ShapeEntry, SignatureDecoder, TypeRegistry, ValueSchema,
};

/// The level catalog.
pub use catalog::{build_level, character, LevelSchema};
