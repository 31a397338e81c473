use crate::{file::parser::Parser, Result};

/// Longest stream name allowed by ECMA-335 II.24.2.2, terminator included
const MAX_STREAM_NAME: usize = 32;

/// Names of the streams a runtime assembly can carry
const KNOWN_STREAMS: [&str; 6] = ["#Strings", "#US", "#Blob", "#GUID", "#~", "#-"];

/// A stream header of the metadata root: location, size and name of one stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    /// Offset of the stream from the start of the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Stream name, e.g. `#Strings`
    pub name: String,
}

impl StreamHeader {
    /// Read one stream header and leave the parser on the next 4-byte aligned header.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated input, or
    /// [`crate::Error::Malformed`] for an unknown or overlong stream name.
    pub fn read(parser: &mut Parser) -> Result<StreamHeader> {
        let offset = parser.read_le::<u32>()?;
        let size = parser.read_le::<u32>()?;

        let name_start = parser.pos();
        let name = parser.read_cstring()?;
        let name_len = parser.pos() - name_start;
        if name_len > MAX_STREAM_NAME {
            return Err(malformed_error!("Stream name too long - {} bytes", name_len));
        }

        if !KNOWN_STREAMS.contains(&name) {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        let padding = (4 - name_len % 4) % 4;
        parser.advance_by(padding)?;

        Ok(StreamHeader {
            offset,
            size,
            name: name.to_string(),
        })
    }
}
