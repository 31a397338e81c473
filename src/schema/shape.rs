//! Ordered property maps and the override merge applied on top of derived shapes.

use std::fmt;

use indexmap::IndexMap;

use crate::{error::display_name, schema::ValueSchema};

/// One property of a [`Shape`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeEntry {
    /// Schema of the property value
    pub schema: ValueSchema,
    /// Whether data files must contain the property
    pub required: bool,
}

impl ShapeEntry {
    /// A property data files may omit
    #[must_use]
    pub fn optional(schema: ValueSchema) -> Self {
        ShapeEntry {
            schema,
            required: false,
        }
    }

    /// A property data files must contain
    #[must_use]
    pub fn required(schema: ValueSchema) -> Self {
        ShapeEntry {
            schema,
            required: true,
        }
    }
}

/// The ordered property schema of one type.
///
/// Keys keep insertion order. Re-inserting an existing key replaces its entry in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    entries: IndexMap<String, ShapeEntry>,
}

impl Shape {
    /// An empty shape
    #[must_use]
    pub fn new() -> Self {
        Shape::default()
    }

    /// Insert or replace `key`, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, entry: ShapeEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Append `key` as an optional property
    #[must_use]
    pub fn optional(mut self, key: impl Into<String>, schema: ValueSchema) -> Self {
        self.insert(key, ShapeEntry::optional(schema));
        self
    }

    /// Append `key` as a required property
    #[must_use]
    pub fn required(mut self, key: impl Into<String>, schema: ValueSchema) -> Self {
        self.insert(key, ShapeEntry::required(schema));
        self
    }

    /// The entry called `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ShapeEntry> {
        self.entries.get(key)
    }

    /// Mutable access to the entry called `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ShapeEntry> {
        self.entries.get_mut(key)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ShapeEntry> {
        self.entries.shift_remove(key)
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the shape has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShapeEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Apply `overrides` in order.
    ///
    /// `Require` and `Widen` on a missing key have nothing to act on; they are logged and
    /// skipped.
    pub fn apply_overrides(&mut self, overrides: &[Override]) {
        for Override { key, action } in overrides {
            match action {
                OverrideAction::Replace(entry) => self.insert(key.clone(), entry.clone()),
                OverrideAction::Remove => {
                    self.remove(key);
                }
                OverrideAction::Require => match self.get_mut(key) {
                    Some(entry) => entry.required = true,
                    None => log::warn!("Cannot require missing property '{}'", key),
                },
                OverrideAction::Widen(other) => match self.get_mut(key) {
                    Some(entry) => {
                        let current = std::mem::replace(&mut entry.schema, ValueSchema::Unknown);
                        entry.schema = current.or(other.clone());
                    }
                    None => log::warn!("Cannot widen missing property '{}'", key),
                },
            }
        }
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = (&'a String, &'a ShapeEntry);
    type IntoIter = indexmap::map::Iter<'a, String, ShapeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Shape {
    type Item = (String, ShapeEntry);
    type IntoIter = indexmap::map::IntoIter<String, ShapeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A change to one property of a derived shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Override {
    /// Property name
    pub key: String,
    /// What to do with it
    pub action: OverrideAction,
}

impl Override {
    /// Set `key` to `entry`, appending it if absent
    #[must_use]
    pub fn replace(key: impl Into<String>, entry: ShapeEntry) -> Self {
        Override {
            key: key.into(),
            action: OverrideAction::Replace(entry),
        }
    }

    /// Drop `key`
    #[must_use]
    pub fn remove(key: impl Into<String>) -> Self {
        Override {
            key: key.into(),
            action: OverrideAction::Remove,
        }
    }

    /// Mark `key` required
    #[must_use]
    pub fn require(key: impl Into<String>) -> Self {
        Override {
            key: key.into(),
            action: OverrideAction::Require,
        }
    }

    /// Also accept `schema` for `key`
    #[must_use]
    pub fn widen(key: impl Into<String>, schema: ValueSchema) -> Self {
        Override {
            key: key.into(),
            action: OverrideAction::Widen(schema),
        }
    }
}

/// The actions an [`Override`] can take.
#[derive(Clone, Debug, PartialEq)]
pub enum OverrideAction {
    /// Replace the entry in place, or append it
    Replace(ShapeEntry),
    /// Delete the entry
    Remove,
    /// Keep the schema, mark the entry required
    Require,
    /// Replace the schema with its union with another schema
    Widen(ValueSchema),
}

/// A member whose type the registry does not know. It was given
/// [`ValueSchema::Unknown`] and generation went on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Full name of the declaring type
    pub type_name: String,
    /// Exposed name of the member
    pub member: String,
    /// Full name of the unrecognized type
    pub unrecognized: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: Unknown type '{}'",
            display_name(&self.type_name),
            self.member,
            display_name(&self.unrecognized)
        )
    }
}
