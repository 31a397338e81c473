use thiserror::Error;

use crate::metadata::tables::TableId;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// Renders a `namespace\0name` key the way C# writes it.
pub(crate) fn display_name(full_name: &str) -> String {
    match full_name.split_once('\0') {
        Some(("", name)) => name.to_string(),
        Some((namespace, name)) => format!("{namespace}.{name}"),
        None => full_name.to_string(),
    }
}

/// The generic Error type, which covers every failure the metadata reader, the signature
/// decoder and the shape builder can report.
///
/// Every variant is fatal to the generation run. The two non-fatal conditions of the
/// pipeline are not errors: an absent custom attribute is an `Option::None`, and an
/// unrecognized named type becomes [`crate::schema::Diagnostic`] next to an
/// [`crate::schema::ValueSchema::Unknown`] schema.
///
/// # Error Categories
///
/// ## Byte Cursor
/// - [`Error::OutOfBounds`] - A read ran past the end of its region
/// - [`Error::MissingTerminator`] - No NUL byte after a string start
/// - [`Error::InvalidUtf8`] - String bytes are not strict UTF-8
///
/// ## Metadata resolution
/// - [`Error::UnresolvedTypeReference`] - A coded index points outside its table
/// - [`Error::MalformedAttributeBlob`] - Custom attribute blob prolog is not `0x0001`
/// - [`Error::AmbiguousConstructor`] - A marker attribute type does not have exactly one `.ctor`
/// - [`Error::TypeNotFound`] - A full type name is absent from the TypeDef table
///
/// ## Signatures and shapes
/// - [`Error::UnsupportedSignatureElement`] - Element type outside the supported set
/// - [`Error::UnsupportedGeneric`] - Generic instantiation other than `Nullable<T>`
/// - [`Error::InvalidMemberSignature`] - Field/property signature prolog mismatch
/// - [`Error::MissingControlAttribute`] - Event type without its level-event-info attribute
///
/// ## Container loading
/// - [`Error::Malformed`], [`Error::NotSupported`], [`Error::Empty`], [`Error::FileError`],
///   [`Error::GoblinErr`]
///
/// # Examples
///
/// ```rust,no_run
/// use rdschema::{Error, File};
/// use std::path::Path;
///
/// match File::from_file(Path::new("Assembly-CSharp.dll")) {
///     Ok(_) => println!("loaded"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A read would have gone past the end of the region being decoded.
    #[error("Out of bound read at offset {offset} (needed {needed} bytes, region has {len})")]
    OutOfBounds {
        /// Cursor position at which the read started
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Length of the region
        len: usize,
    },

    /// A NUL-terminated string had no terminator before the end of its region.
    #[error("Missing NUL terminator for string starting at offset {offset}")]
    MissingTerminator {
        /// Offset of the first string byte
        offset: usize,
    },

    /// String bytes failed strict UTF-8 decoding.
    #[error("Invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the first string byte
        offset: usize,
    },

    /// A coded index or simple index resolved to a row outside of its table.
    #[error("Unresolved reference - {table:?} row {row} (table has {rows} rows)")]
    UnresolvedTypeReference {
        /// Table selected by the tag bits
        table: TableId,
        /// 1-based row as stored in metadata
        row: u32,
        /// Number of rows in the selected table
        rows: usize,
    },

    /// A custom attribute blob did not start with the `0x0001` prolog.
    #[error("Malformed custom attribute blob at #Blob offset {blob_offset} - prolog {prolog:#06x}")]
    MalformedAttributeBlob {
        /// Offset of the blob inside the #Blob heap
        blob_offset: u32,
        /// The prolog value that was read
        prolog: u16,
    },

    /// A marker attribute type declares a number of constructors other than one.
    #[error("'{}' must have exactly one constructor, found {count}", display_name(.type_name))]
    AmbiguousConstructor {
        /// Full name of the attribute type
        type_name: String,
        /// Number of `.ctor` methods found
        count: usize,
    },

    /// A full type name could not be found in the TypeDef table.
    #[error("Cannot find type '{}'", display_name(.0))]
    TypeNotFound(String),

    /// The signature decoder met an element type it does not interpret.
    #[error("{owner}.{member}: unsupported signature element {element:#04x} at offset {offset}")]
    UnsupportedSignatureElement {
        /// Declaring type of the member
        owner: String,
        /// Declared name of the member
        member: String,
        /// The element type byte
        element: u8,
        /// Offset of the element inside the signature blob
        offset: usize,
    },

    /// A generic instantiation other than `Nullable<T>` with one argument.
    #[error("{owner}.{member}: unsupported generic '{}' with {arity} type argument(s)", display_name(.generic))]
    UnsupportedGeneric {
        /// Declaring type of the member
        owner: String,
        /// Declared name of the member
        member: String,
        /// Full name of the generic type definition
        generic: String,
        /// Number of type arguments in the instantiation
        arity: u32,
    },

    /// A field or property signature did not start with the expected prolog.
    #[error("{owner}.{member}: invalid {kind} signature prolog {prolog:#04x}")]
    InvalidMemberSignature {
        /// Declaring type of the member
        owner: String,
        /// Declared name of the member
        member: String,
        /// `field` or `property`
        kind: &'static str,
        /// The byte that was found
        prolog: u8,
    },

    /// An event-family type lacks the type-level control attribute.
    #[error("'{}' does not have {attribute}", display_name(.type_name))]
    MissingControlAttribute {
        /// Full name of the event type
        type_name: String,
        /// Full name of the expected control attribute
        attribute: String,
    },

    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// This file uses a metadata layout that is not supported.
    #[error("This file type is not supported - {0}")]
    NotSupported(String),

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_render_with_dots() {
        assert_eq!(
            display_name("RDLevelEditor\0LevelEvent_Flash"),
            "RDLevelEditor.LevelEvent_Flash"
        );
        assert_eq!(display_name("\0JsonPropertyAttribute"), "JsonPropertyAttribute");

        let err = Error::TypeNotFound("NS\0Widget".to_string());
        assert_eq!(err.to_string(), "Cannot find type 'NS.Widget'");
    }
}
