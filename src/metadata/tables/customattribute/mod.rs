//! CustomAttribute table (0x0C).
//!
//! Each row applies one attribute constructor to one parent entity, with the constructor
//! arguments encoded in a `#Blob` entry. The table is sorted by parent in conforming
//! metadata, but lookups here do not rely on it.

mod raw;
mod reader;

pub use raw::*;

/// Prolog of every custom attribute value blob (ECMA-335 II.23.3)
pub const CUSTOM_ATTRIBUTE_PROLOG: u16 = 0x0001;
