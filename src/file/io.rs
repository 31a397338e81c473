//! Little-endian primitive reads over byte slices.
//!
//! Every metadata structure this crate touches is little-endian: the CLI header, the
//! metadata root, the `#~` table rows and the signature and attribute blobs. This module
//! provides the bounds-checked reads all of them build on, through the [`CilIO`] trait.
//!
//! - [`read_le`] reads a value from the start of a buffer
//! - [`read_le_at`] reads at an offset and advances it
//! - [`read_le_at_dyn`] reads a 2- or 4-byte heap/table index column
//!
//! All functions return [`crate::Error::OutOfBounds`] when the buffer is too short.

use crate::{Error, Result};

/// Trait for types that can be decoded from a fixed number of little-endian bytes.
pub trait CilIO: Sized {
    /// The fixed-size byte array this type is decoded from.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decode `Self` from little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_cilio {
    ($($ty:ty => $n:literal),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; $n];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_cilio! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

/// Read `T` from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T`.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Read `T` at `offset` and advance `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let needed = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(needed) else {
        return Err(Error::OutOfBounds {
            offset: *offset,
            needed,
            len: data.len(),
        });
    };

    if end > data.len() {
        return Err(Error::OutOfBounds {
            offset: *offset,
            needed,
            len: data.len(),
        });
    }

    let Ok(bytes) = T::Bytes::try_from(&data[*offset..end]) else {
        return Err(malformed_error!(
            "Failed to convert {} bytes at offset {}",
            needed,
            offset
        ));
    };

    *offset = end;
    Ok(T::from_le_bytes(bytes))
}

/// Read a heap or table index column that is either 2 or 4 bytes wide.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the column runs past the end of `data`.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    if is_large {
        read_le_at::<u32>(data, offset)
    } else {
        Ok(u32::from(read_le_at::<u16>(data, offset)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_le_values() {
        assert_eq!(read_le::<u8>(&TEST_BUFFER).unwrap(), 0x01);
        assert_eq!(read_le::<u16>(&TEST_BUFFER).unwrap(), 0x0201);
        assert_eq!(read_le::<u32>(&TEST_BUFFER).unwrap(), 0x0403_0201);
        assert_eq!(read_le::<u64>(&TEST_BUFFER).unwrap(), 0x0807_0605_0403_0201);
        assert_eq!(read_le::<f32>(&[0x00, 0x00, 0x80, 0x3F]).unwrap(), 1.0);
    }

    #[test]
    fn read_le_at_advances() {
        let mut offset = 0;
        assert_eq!(read_le_at::<u16>(&TEST_BUFFER, &mut offset).unwrap(), 0x0201);
        assert_eq!(read_le_at::<i32>(&TEST_BUFFER, &mut offset).unwrap(), 0x0605_0403);
        assert_eq!(offset, 6);
    }

    #[test]
    fn read_le_at_dyn_widths() {
        let mut offset = 0;
        assert_eq!(read_le_at_dyn(&TEST_BUFFER, &mut offset, false).unwrap(), 0x0201);
        assert_eq!(offset, 2);
        assert_eq!(read_le_at_dyn(&TEST_BUFFER, &mut offset, true).unwrap(), 0x0605_0403);
        assert_eq!(offset, 6);
    }

    #[test]
    fn errors() {
        let mut offset = 6;
        let result = read_le_at::<u32>(&TEST_BUFFER, &mut offset);
        assert!(matches!(
            result,
            Err(Error::OutOfBounds {
                offset: 6,
                needed: 4,
                len: 8
            })
        ));
        assert_eq!(offset, 6);

        assert!(matches!(read_le::<u16>(&[0x01]), Err(Error::OutOfBounds { .. })));
    }
}
