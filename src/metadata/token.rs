//! Metadata tokens (ECMA-335 II.22).

use std::fmt;

use crate::metadata::tables::TableId;

/// A metadata token: the table number in the high byte, the 1-based row below it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Create a new token from its raw value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Token of row `rid` in `table`
    #[must_use]
    pub fn from_row(table: TableId, rid: u32) -> Self {
        Token(table.token_base() | (rid & 0x00FF_FFFF))
    }

    /// The raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The table number
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The 1-based row
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true for the null token
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts() {
        let token = Token::from_row(TableId::MethodDef, 0x2A);
        assert_eq!(token.value(), 0x0600_002A);
        assert_eq!(token.table(), 0x06);
        assert_eq!(token.row(), 0x2A);
        assert_eq!(token.to_string(), "0x0600002a");
        assert!(Token::new(0).is_null());
    }
}
