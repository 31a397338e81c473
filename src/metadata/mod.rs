//! ECMA-335 metadata: the root, its streams and tables, and the views built on top.
//!
//! # Key Components
//!
//! - [`root`] - The `BSJB` metadata root and its stream directory
//! - [`streams`] - `#Strings`, `#Blob` and the `#~` table stream
//! - [`tables`] - Row layouts, coded indices and table sizes
//! - [`image`] - [`AssemblyImage`](image::AssemblyImage), the loaded heaps and tables
//! - [`context`] - [`MetadataContext`](context::MetadataContext), name lookups and marker
//!   attributes over one image
//! - [`cor20header`] - The CLR header of the PE file, locating the metadata root
//! - [`token`] - Table and row packed into one `u32`
//!
//! # Examples
//!
//! ```rust,no_run
//! use rdschema::{AssemblyImage, File, MetadataContext, SchemaConfig};
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
//! let image = AssemblyImage::read(file.metadata()?)?;
//! let ctx = MetadataContext::new(&image, SchemaConfig::default())?;
//! println!("{} types", image.typedefs().len());
//! # Ok::<(), rdschema::Error>(())
//! ```

pub mod context;
pub mod cor20header;
pub mod image;
pub mod root;
pub mod streams;
pub mod tables;
pub mod token;
