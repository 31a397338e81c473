//! CLI header (ECMA-335 II.25.3.3).
//!
//! The 72-byte header pointed to by the PE CLI runtime data directory. Only the leading
//! fields are decoded; the metadata directory is what the rest of the crate needs.

use crate::{file::parser::Parser, Result};

/// Size of the CLI header in bytes.
pub const COR20_HEADER_SIZE: usize = 72;

/// The decoded leading part of the CLI header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cor20Header {
    /// Header size, always 72
    pub cb: u32,
    /// Minimum major runtime version
    pub major_runtime_version: u16,
    /// Minimum minor runtime version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata root
    pub meta_data_size: u32,
    /// Runtime image flags
    pub flags: u32,
    /// Entry point token or RVA
    pub entry_point_token: u32,
}

impl Cor20Header {
    /// Decode a CLI header from `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than the header, or
    /// [`crate::Error::Malformed`] if the size field or metadata directory is invalid.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        let mut parser = Parser::new(data);
        parser.ensure_remaining(COR20_HEADER_SIZE)?;

        let cb = parser.read_le::<u32>()?;
        if cb as usize != COR20_HEADER_SIZE {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        }

        let flags = parser.read_le::<u32>()?;
        let entry_point_token = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
            entry_point_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn header_bytes(rva: u32, size: u32) -> Vec<u8> {
        let mut data = vec![0_u8; COR20_HEADER_SIZE];
        data[0..4].copy_from_slice(&72_u32.to_le_bytes());
        data[4..6].copy_from_slice(&2_u16.to_le_bytes());
        data[6..8].copy_from_slice(&5_u16.to_le_bytes());
        data[8..12].copy_from_slice(&rva.to_le_bytes());
        data[12..16].copy_from_slice(&size.to_le_bytes());
        data[16..20].copy_from_slice(&1_u32.to_le_bytes());
        data
    }

    #[test]
    fn crafted() {
        let header = Cor20Header::read(&header_bytes(0x2050, 0x1A3C)).unwrap();

        assert_eq!(header.cb, 72);
        assert_eq!(header.major_runtime_version, 2);
        assert_eq!(header.minor_runtime_version, 5);
        assert_eq!(header.meta_data_rva, 0x2050);
        assert_eq!(header.meta_data_size, 0x1A3C);
        assert_eq!(header.flags, 1);
    }

    #[test]
    fn invalid() {
        assert!(matches!(
            Cor20Header::read(&[0x48, 0x00]),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            Cor20Header::read(&header_bytes(0, 0x100)),
            Err(Error::Malformed { .. })
        ));

        let mut bad_size = header_bytes(0x2050, 0x100);
        bad_size[0] = 0x40;
        assert!(matches!(Cor20Header::read(&bad_size), Err(Error::Malformed { .. })));
    }
}
