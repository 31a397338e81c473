use crate::{file::parser::Parser, Result};

/// The `#Blob` heap: length-prefixed byte sequences addressed by byte offset.
///
/// Signatures and custom attribute arguments live here. The length prefix is an ECMA-335
/// compressed unsigned integer.
#[derive(Clone, Copy, Debug)]
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wrap a `#Blob` heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with the
    /// empty blob.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// The blob starting at heap offset `index`, borrowed from the heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the length prefix or the data runs past the
    /// end of the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        Parser::at(self.data, index).read_prefixed_bytes()
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
            0x02, 0x06, 0x08,                   // field signature: int
            0x05, 0x01, 0x00, 0x00, 0x00, 0x00, // attribute blob, no arguments
        ];

        let blob = Blob::from(&data).unwrap();
        assert_eq!(blob.get(0).unwrap(), &[] as &[u8]);
        assert_eq!(blob.get(1).unwrap(), &[0x06, 0x08]);
        assert_eq!(blob.get(4).unwrap(), &[0x01, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn two_byte_length() {
        let mut data = vec![0x00, 0x80, 0x81];
        data.extend(std::iter::repeat(0xAB).take(0x81));

        let blob = Blob::from(&data).unwrap();
        assert_eq!(blob.get(1).unwrap().len(), 0x81);
    }

    #[test]
    fn invalid() {
        assert!(Blob::from(&[0x01]).is_err());

        let blob = Blob::from(&[0x00, 0x04, 0x01]).unwrap();
        assert!(matches!(blob.get(1), Err(Error::OutOfBounds { .. })));
        assert!(matches!(blob.get(9), Err(Error::OutOfBounds { .. })));
    }
}
