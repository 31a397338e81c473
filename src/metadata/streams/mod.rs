//! Metadata streams: the stream headers of the metadata root, the `#Strings` and `#Blob`
//! heaps, and the `#~` table stream.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::TablesHeader;
