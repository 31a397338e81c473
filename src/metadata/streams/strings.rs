use crate::{file::parser::Parser, Result};

/// The `#Strings` heap: NUL-terminated UTF-8 identifiers addressed by byte offset.
///
/// ```rust
/// use rdschema::metadata::streams::Strings;
///
/// let heap = Strings::from(b"\0Widget\0NS\0")?;
/// assert_eq!(heap.get(1)?, "Widget");
/// assert_eq!(heap.get(8)?, "NS");
/// assert_eq!(heap.get(0)?, "");
/// # Ok::<(), rdschema::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Wrap a `#Strings` heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with the
    /// empty string.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided #Strings heap is empty"));
        }

        Ok(Strings { data })
    }

    /// The string starting at heap offset `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`], [`crate::Error::MissingTerminator`] or
    /// [`crate::Error::InvalidUtf8`].
    pub fn get(&self, index: usize) -> Result<&'a str> {
        Parser::at(self.data, index).read_cstring()
    }

    /// Size of the heap in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap has no data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data = [
            0x00,
            0x3c, 0x4d, 0x6f, 0x64, 0x75, 0x6c, 0x65, 0x3e, 0x00,
            0x2e, 0x63, 0x74, 0x6f, 0x72, 0x00,
            0x52, 0x44, 0x4c, 0x65, 0x76, 0x65, 0x6c, 0x45, 0x64, 0x69, 0x74, 0x6f, 0x72, 0x00,
        ];

        let str_view = Strings::from(&data).unwrap();

        assert_eq!(str_view.get(1).unwrap(), "<Module>");
        assert_eq!(str_view.get(10).unwrap(), ".ctor");
        assert_eq!(str_view.get(16).unwrap(), "RDLevelEditor");
        // Offsets into the middle of a string are valid suffixes
        assert_eq!(str_view.get(11).unwrap(), "ctor");
    }

    #[test]
    fn invalid() {
        assert!(Strings::from(&[]).is_err());
        assert!(Strings::from(b"abc\0").is_err());

        let str_view = Strings::from(b"\0abc").unwrap();
        assert!(matches!(str_view.get(1), Err(Error::MissingTerminator { offset: 1 })));
        assert!(matches!(str_view.get(10), Err(Error::OutOfBounds { .. })));
    }
}
