//! Bounds-checked byte cursor for metadata heaps, signatures and attribute blobs.
//!
//! [`Parser`] wraps a borrowed byte region and a read position. Every read validates that
//! enough data remains, advances by exactly the number of bytes it consumed, and returns
//! borrowed views rather than copies where the caller does not need ownership.
//!
//! # Reads
//!
//! - [`Parser::read_le`] - fixed-width little-endian primitives (`u8`, `u16`, `i32`, `f32`, ...)
//! - [`Parser::read_compressed_uint`] - ECMA-335 II.23.2 compressed unsigned integer
//! - [`Parser::read_cstring`] - NUL-terminated strict UTF-8 string
//! - [`Parser::read_prefixed_bytes`] - compressed length followed by that many bytes
//! - [`Parser::read_ser_string`] - custom attribute `SerString`, `0xFF` meaning null
//!
//! # Examples
//!
//! ```rust
//! use rdschema::Parser;
//!
//! let data = [0x01, 0x00, 0x81, 0x02, 0x03, b'h', b'i'];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_le::<u16>()?, 1);
//! assert_eq!(parser.read_compressed_uint()?, 0x102);
//! assert_eq!(parser.read_le::<u8>()?, 3);
//! # Ok::<(), rdschema::Error>(())
//! ```

use crate::{file::io::read_le_at, file::io::CilIO, Error, Result};

/// `SerString` marker for a null string (ECMA-335 II.23.3).
const NULL_SER_STRING: u8 = 0xFF;

/// A cursor over a borrowed byte region.
///
/// The parser never copies the region. Slices and strings it returns borrow from the same
/// data the parser was created with, so they outlive the parser itself.
#[derive(Clone, Debug)]
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` positioned at the start of `data`
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Create a new `Parser` positioned at `offset` inside `data`.
    ///
    /// The offset is not validated here; the first read past the end reports
    /// [`Error::OutOfBounds`].
    #[must_use]
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Parser {
            data,
            position: offset,
        }
    }

    /// Length of the underlying region
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying region is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of bytes left after the read position
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Returns true if at least one more byte can be read
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Look at the byte under the cursor without consuming it.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] at the end of the region.
    pub fn peek_byte(&self) -> Result<u8> {
        self.ensure_remaining(1)?;
        Ok(self.data[self.position])
    }

    /// Skip `step` bytes.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if fewer than `step` bytes remain.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        self.ensure_remaining(step)?;
        self.position += step;
        Ok(())
    }

    /// Read a fixed-width little-endian value.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the region is exhausted.
    pub fn read_le<T: CilIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read an ECMA-335 compressed unsigned integer (II.23.2).
    ///
    /// The high bits of the first byte select the width: `0xxxxxxx` is one byte,
    /// `10xxxxxx` two bytes and `110xxxxx` four bytes, all big-endian.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] on truncated input, or [`Error::Malformed`] for a
    /// leading byte that matches none of the three forms.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let first_byte = self.read_le::<u8>()?;

        // 1-byte encoding: 0xxxxxxx
        if (first_byte & 0x80) == 0 {
            return Ok(u32::from(first_byte));
        }

        // 2-byte encoding: 10xxxxxx xxxxxxxx
        if (first_byte & 0xC0) == 0x80 {
            let second_byte = self.read_le::<u8>()?;
            return Ok(((u32::from(first_byte) & 0x3F) << 8) | u32::from(second_byte));
        }

        // 4-byte encoding: 110xxxxx xxxxxxxx xxxxxxxx xxxxxxxx
        if (first_byte & 0xE0) == 0xC0 {
            let b1 = u32::from(self.read_le::<u8>()?);
            let b2 = u32::from(self.read_le::<u8>()?);
            let b3 = u32::from(self.read_le::<u8>()?);
            return Ok(((u32::from(first_byte) & 0x1F) << 24) | (b1 << 16) | (b2 << 8) | b3);
        }

        Err(malformed_error!(
            "Invalid compressed uint - {:#04x} at offset {}",
            first_byte,
            self.position - 1
        ))
    }

    /// Read a NUL-terminated UTF-8 string and advance past the terminator.
    ///
    /// # Errors
    /// Returns [`Error::MissingTerminator`] if no NUL follows the read position, or
    /// [`Error::InvalidUtf8`] if the bytes before it are not valid UTF-8.
    pub fn read_cstring(&mut self) -> Result<&'a str> {
        let start = self.position;
        if start > self.data.len() {
            return Err(Error::OutOfBounds {
                offset: start,
                needed: 1,
                len: self.data.len(),
            });
        }

        let Some(length) = self.data[start..].iter().position(|&byte| byte == 0) else {
            return Err(Error::MissingTerminator { offset: start });
        };

        let string = std::str::from_utf8(&self.data[start..start + length])
            .map_err(|_| Error::InvalidUtf8 { offset: start })?;
        self.position = start + length + 1;
        Ok(string)
    }

    /// Read a compressed length followed by that many bytes, borrowed from the region.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the length or the payload is truncated.
    pub fn read_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let length = self.read_compressed_uint()? as usize;
        self.read_bytes(length)
    }

    /// Read a custom attribute `SerString`.
    ///
    /// A leading `0xFF` denotes a null string: `None` is returned and the marker is left
    /// under the cursor. Otherwise the string is a compressed length followed by UTF-8.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] on truncated input or [`Error::InvalidUtf8`].
    pub fn read_ser_string(&mut self) -> Result<Option<&'a str>> {
        if self.peek_byte()? == NULL_SER_STRING {
            return Ok(None);
        }

        let start = self.position;
        let bytes = self.read_prefixed_bytes()?;
        std::str::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::InvalidUtf8 { offset: start })
    }

    /// Read `length` raw bytes.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        self.ensure_remaining(length)?;
        let bytes = &self.data[self.position..self.position + length];
        self.position += length;
        Ok(bytes)
    }

    /// Ensure at least `needed` bytes remain after the read position.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] otherwise.
    pub fn ensure_remaining(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(Error::OutOfBounds {
                offset: self.position,
                needed,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::encode_compressed_uint;

    #[test]
    fn test_read_compressed_uint() {
        let test_cases = vec![
            (vec![0x03], 3),                             // 1-byte format
            (vec![0x7F], 0x7F),                          // 1-byte format, max value
            (vec![0x80, 0x80], 0x80),                    // 2-byte format, min value
            (vec![0xBF, 0xFF], 0x3FFF),                  // 2-byte format, max value
            (vec![0xC0, 0x00, 0x40, 0x00], 0x4000),      // 4-byte format, min value
            (vec![0xDF, 0xFF, 0xFF, 0xFF], 0x1FFF_FFFF), // 4-byte format, max value
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            assert_eq!(parser.read_compressed_uint().unwrap(), expected);
            assert_eq!(parser.pos(), input.len());
        }

        let mut parser = Parser::new(&[]);
        assert!(matches!(
            parser.read_compressed_uint(),
            Err(Error::OutOfBounds { .. })
        ));

        let mut parser = Parser::new(&[0xE0, 0x00, 0x00, 0x00]);
        assert!(matches!(
            parser.read_compressed_uint(),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn compressed_uint_width_follows_leading_bits() {
        let samples = [
            0_u32, 1, 0x3F, 0x7F, 0x80, 0x1234, 0x3FFF, 0x4000, 0x12_3456, 0x1FFF_FFFF,
        ];

        for value in samples {
            let encoded = encode_compressed_uint(value);
            let expected_width = match encoded[0] {
                byte if byte & 0x80 == 0 => 1,
                byte if byte & 0xC0 == 0x80 => 2,
                _ => 4,
            };
            assert_eq!(encoded.len(), expected_width, "width of {value:#x}");

            let mut parser = Parser::new(&encoded);
            assert_eq!(parser.read_compressed_uint().unwrap(), value);
            assert_eq!(parser.pos(), expected_width);
        }
    }

    #[test]
    fn test_read_cstring() {
        let test_cases = vec![
            (vec![0x61, 0x62, 0x63, 0x00], "abc"),                       // Simple string
            (vec![0x00], ""),                                            // Empty string
            (vec![0xE4, 0xB8, 0xAD, 0xE6, 0x96, 0x87, 0x00], "中文"), // UTF-8 string
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            assert_eq!(parser.read_cstring().unwrap(), expected);
            assert_eq!(parser.pos(), input.len());
        }

        let data = b"\0Widget\0NS\0";
        let mut parser = Parser::at(data, 1);
        assert_eq!(parser.read_cstring().unwrap(), "Widget");
        assert_eq!(parser.read_cstring().unwrap(), "NS");
    }

    #[test]
    fn cstring_errors() {
        let mut parser = Parser::new(b"abc");
        assert!(matches!(
            parser.read_cstring(),
            Err(Error::MissingTerminator { offset: 0 })
        ));

        let mut parser = Parser::at(&[0x41, 0xC3, 0x28, 0x00], 1);
        assert!(matches!(
            parser.read_cstring(),
            Err(Error::InvalidUtf8 { offset: 1 })
        ));

        // A byte order mark is kept as data, not stripped
        let mut parser = Parser::new(&[0xEF, 0xBB, 0xBF, 0x61, 0x00]);
        assert_eq!(parser.read_cstring().unwrap(), "\u{FEFF}a");
    }

    #[test]
    fn prefixed_bytes_borrow() {
        let data = [0x03, 0xAA, 0xBB, 0xCC, 0xDD];
        let mut parser = Parser::new(&data);
        let bytes = parser.read_prefixed_bytes().unwrap();
        assert_eq!(bytes, &[0xAA, 0xBB, 0xCC]);
        assert!(std::ptr::eq(bytes.as_ptr(), data[1..].as_ptr()));
        assert_eq!(parser.pos(), 4);

        let mut parser = Parser::new(&[0x05, 0x01]);
        assert!(matches!(
            parser.read_prefixed_bytes(),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn ser_string() {
        let mut parser = Parser::new(&[0x04, b'n', b'a', b'm', b'e']);
        assert_eq!(parser.read_ser_string().unwrap(), Some("name"));

        let mut parser = Parser::new(&[0xFF, 0x00]);
        assert_eq!(parser.read_ser_string().unwrap(), None);
        assert_eq!(parser.pos(), 0);

        let mut parser = Parser::new(&[0x00]);
        assert_eq!(parser.read_ser_string().unwrap(), Some(""));
    }

    #[test]
    fn test_error_handling() {
        let mut parser = Parser::new(&[0x08]);
        assert!(matches!(parser.read_compressed_uint(), Ok(8)));
        assert!(matches!(
            parser.read_compressed_uint(),
            Err(Error::OutOfBounds { .. })
        ));

        let mut parser = Parser::new(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            parser.read_le::<i32>(),
            Err(Error::OutOfBounds { offset: 0, needed: 4, len: 3 })
        ));
        assert!(matches!(parser.read_le::<f32>(), Err(Error::OutOfBounds { .. })));
        assert_eq!(parser.read_le::<u16>().unwrap(), 0x0201);
    }
}
