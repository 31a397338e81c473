//! PropertyMap table (0x15).
//!
//! Links a TypeDef to the first Property row it owns. Rows are ordered by their property
//! list, so the run owned by one entry ends where the next entry's run starts.

mod raw;
mod reader;

pub use raw::*;
