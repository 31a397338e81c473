//! Metadata root (ECMA-335 II.24.2.1).
//!
//! The root starts with the `BSJB` signature, a padded runtime version string and the
//! stream headers. Stream offsets are relative to the start of the root.

use crate::{
    file::parser::Parser,
    metadata::streams::StreamHeader,
    Error, Result,
};

/// `BSJB`, the metadata root signature
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// Longest version string allowed by ECMA-335, padding included
const MAX_VERSION_LENGTH: u32 = 255;

/// The metadata root header and its stream directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Root {
    /// Always [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version, 1
    pub major_version: u16,
    /// Minor version, 1
    pub minor_version: u16,
    /// Reserved, 0
    pub reserved: u32,
    /// Length of the version string field, padding included
    pub length: u32,
    /// Runtime version, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved flags
    pub flags: u16,
    /// Stream headers in file order
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Read the metadata root at the start of `data`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for a bad signature, an invalid version string, no
    /// streams, or a stream extending past the end of `data`; [`Error::OutOfBounds`] on
    /// truncated headers.
    pub fn read(data: &[u8]) -> Result<Root> {
        let mut parser = Parser::new(data);

        let signature = parser.read_le::<u32>()?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {:#x}",
                signature
            ));
        }

        let major_version = parser.read_le::<u16>()?;
        let minor_version = parser.read_le::<u16>()?;
        let reserved = parser.read_le::<u32>()?;

        let length = parser.read_le::<u32>()?;
        if length > MAX_VERSION_LENGTH {
            return Err(malformed_error!("Version string too long - {}", length));
        }

        let version_bytes = parser.read_bytes(length as usize)?;
        let version_end = version_bytes
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(version_bytes.len());
        let version = std::str::from_utf8(&version_bytes[..version_end])
            .map_err(|_| Error::InvalidUtf8 { offset: 16 })?
            .to_string();

        let flags = parser.read_le::<u16>()?;
        let stream_count = parser.read_le::<u16>()?;
        if stream_count == 0 {
            return Err(malformed_error!("No valid streams have been found"));
        }

        let mut stream_headers = Vec::with_capacity(stream_count as usize);
        for _ in 0..stream_count {
            let stream = StreamHeader::read(&mut parser)?;

            match stream.offset.checked_add(stream.size) {
                Some(end) if end as usize <= data.len() => {}
                Some(_) => {
                    return Err(malformed_error!(
                        "Stream {} extends past the metadata root - {} + {} > {}",
                        stream.name,
                        stream.offset,
                        stream.size,
                        data.len()
                    ))
                }
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        stream.offset,
                        stream.size
                    ))
                }
            }

            stream_headers.push(stream);
        }

        Ok(Root {
            signature,
            major_version,
            minor_version,
            reserved,
            length,
            version,
            flags,
            stream_headers,
        })
    }

    /// The header of the stream called `name`, if present.
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|stream| stream.name == name)
    }

    /// The bytes of the stream called `name` inside `data`, the buffer the root was read from.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the stream is missing.
    pub fn stream_data<'a>(&self, data: &'a [u8], name: &str) -> Result<&'a [u8]> {
        let Some(stream) = self.stream(name) else {
            return Err(malformed_error!("Metadata root has no {} stream", name));
        };

        let start = stream.offset as usize;
        let end = start + stream.size as usize;
        data.get(start..end).ok_or(Error::OutOfBounds {
            offset: start,
            needed: stream.size as usize,
            len: data.len(),
        })
    }
}
