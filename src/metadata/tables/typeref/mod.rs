//! TypeRef table (0x01).
//!
//! References to types defined outside this module. The signature decoder reaches this
//! table when a field's type lives in another assembly (`System.Nullable<T>`,
//! `UnityEngine.Vector2`, `DG.Tweening.Ease`, ...).

mod raw;
mod reader;

pub use raw::*;
