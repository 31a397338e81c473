//! MethodDef table (0x06).
//!
//! Only used to find attribute constructors: a custom attribute application names its
//! constructor by MethodDef row, and a marker attribute class is identified by the single
//! `.ctor` inside its method range.

use bitflags::bitflags;

mod raw;
mod reader;

pub use raw::*;

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Method modifiers of the MethodDef `Flags` column
    pub struct MethodAttributes: u16 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
    }
}

/// Name of instance constructors
pub const CONSTRUCTOR_NAME: &str = ".ctor";
