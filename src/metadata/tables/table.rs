use std::ops::Range;

use crate::{metadata::tables::TableInfo, Result};

/// A metadata table row that can be decoded from the `#~` stream.
pub trait RowReadable: Sized {
    /// Size of one row for the given index widths
    fn row_size(sizes: &TableInfo) -> u32;

    /// Decode the row with 1-based id `rid` at `offset`, advancing `offset` past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row runs past the end of `data`.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfo) -> Result<Self>;
}

/// A fully decoded metadata table.
///
/// Rows keep their file order; `get` and indexing are 0-based, while each row keeps its
/// 1-based `rid` from the file.
#[derive(Clone, Debug)]
pub struct MetadataTable<T> {
    rows: Vec<T>,
}

impl<T> Default for MetadataTable<T> {
    fn default() -> Self {
        MetadataTable { rows: Vec::new() }
    }
}

impl<T: RowReadable> MetadataTable<T> {
    /// Decode `row_count` rows starting at the beginning of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` holds fewer rows than declared.
    pub fn read(data: &[u8], row_count: u32, sizes: &TableInfo) -> Result<Self> {
        let mut rows = Vec::with_capacity(row_count as usize);
        let mut offset = 0;

        for rid in 1..=row_count {
            rows.push(T::row_read(data, &mut offset, rid, sizes)?);
        }

        Ok(MetadataTable { rows })
    }
}

impl<T> MetadataTable<T> {
    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at 0-based `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    /// Rows in a 0-based range
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &[T] {
        &self.rows[range]
    }

    /// Iterate the rows in file order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Clamp a 1-based list column to a 0-based row position.
    ///
    /// List columns point at the first owned row; a value one past the last row (or 0 in
    /// an empty table) means "owns nothing".
    #[must_use]
    pub fn list_start(&self, list: u32) -> usize {
        (list.saturating_sub(1) as usize).min(self.rows.len())
    }
}

impl<T> From<Vec<T>> for MetadataTable<T> {
    fn from(rows: Vec<T>) -> Self {
        MetadataTable { rows }
    }
}

impl<'a, T> IntoIterator for &'a MetadataTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
