//! The value schema tree produced by the signature decoder.

use crate::schema::Shape;

/// Inclusive bounds of an integer schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRange {
    /// Lowest allowed value
    pub min: i32,
    /// Highest allowed value
    pub max: i32,
}

impl IntRange {
    /// The full `i32` range
    pub const FULL: IntRange = IntRange {
        min: i32::MIN,
        max: i32::MAX,
    };

    /// Bounds from `min` to `max`
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        IntRange { min, max }
    }

    /// Values of at least `min`
    #[must_use]
    pub const fn at_least(min: i32) -> Self {
        IntRange { min, max: i32::MAX }
    }

    /// Returns true if neither bound narrows the `i32` range
    #[must_use]
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for IntRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Inclusive bounds of a float schema; infinite bounds are absent bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRange {
    /// Lowest allowed value, `-inf` if unbounded
    pub min: f64,
    /// Highest allowed value, `inf` if unbounded
    pub max: f64,
}

impl FloatRange {
    /// No bounds
    pub const UNBOUNDED: FloatRange = FloatRange {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Bounds from `min` to `max`
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        FloatRange {
            min: f64::from(min),
            max: f64::from(max),
        }
    }

    /// Values of at least `min`
    #[must_use]
    pub fn at_least(min: f64) -> Self {
        FloatRange {
            min,
            max: f64::INFINITY,
        }
    }

    /// The lower bound, if finite
    #[must_use]
    pub fn finite_min(&self) -> Option<f64> {
        self.min.is_finite().then_some(self.min)
    }

    /// The upper bound, if finite
    #[must_use]
    pub fn finite_max(&self) -> Option<f64> {
        self.max.is_finite().then_some(self.max)
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Schema of one value in a data file.
///
/// The tree is closed: emitters match every variant. [`ValueSchema::Named`] marks a
/// subtree that emitters render once as a shared definition and reference elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSchema {
    /// `true` or `false`
    Boolean,
    /// 32-bit integer within bounds
    BoundedInt(IntRange),
    /// Number within bounds
    BoundedFloat(FloatRange),
    /// Any string
    String,
    /// String of at most this many characters
    BoundedString(usize),
    /// Absolute URL
    Url,
    /// String matching a regular expression
    Pattern(String),
    /// One of a fixed set of strings
    Enum(Vec<String>),
    /// Exactly this string
    Literal(String),
    /// Exactly this boolean
    BooleanLiteral(bool),
    /// Fixed-length array with one schema per position
    Tuple(Vec<ValueSchema>),
    /// The inner schema or `null`
    Nullable(Box<ValueSchema>),
    /// Array of the inner schema
    Array(Box<ValueSchema>),
    /// Array of the inner schema with a length limit
    BoundedArray {
        /// Element schema
        items: Box<ValueSchema>,
        /// Fewest elements
        min: usize,
        /// Most elements, if limited
        max: Option<usize>,
    },
    /// Any of the listed schemas
    Union(Vec<ValueSchema>),
    /// `null`
    Null,
    /// Object with the given properties
    Object(Shape),
    /// A schema with a definition id
    Named {
        /// Definition id
        id: String,
        /// The schema the id stands for
        schema: Box<ValueSchema>,
    },
    /// Anything; used for types the registry does not know
    Unknown,
}

impl ValueSchema {
    /// Integer over the full `i32` range
    #[must_use]
    pub fn int() -> Self {
        ValueSchema::BoundedInt(IntRange::FULL)
    }

    /// Unbounded number
    #[must_use]
    pub fn float() -> Self {
        ValueSchema::BoundedFloat(FloatRange::UNBOUNDED)
    }

    /// Enum of the given values
    #[must_use]
    pub fn string_enum(values: &[&str]) -> Self {
        ValueSchema::Enum(values.iter().map(ToString::to_string).collect())
    }

    /// Wrap as nullable
    #[must_use]
    pub fn nullable(self) -> Self {
        ValueSchema::Nullable(Box::new(self))
    }

    /// Wrap as array element
    #[must_use]
    pub fn array(self) -> Self {
        ValueSchema::Array(Box::new(self))
    }

    /// Wrap as element of an array of `min` to `max` elements
    #[must_use]
    pub fn array_of(self, min: usize, max: Option<usize>) -> Self {
        ValueSchema::BoundedArray {
            items: Box::new(self),
            min,
            max,
        }
    }

    /// Wrap as element of an array of exactly `len` elements
    #[must_use]
    pub fn array_of_len(self, len: usize) -> Self {
        self.array_of(len, Some(len))
    }

    /// Give the schema a definition id
    #[must_use]
    pub fn named(self, id: &str) -> Self {
        ValueSchema::Named {
            id: id.to_string(),
            schema: Box::new(self),
        }
    }

    /// Union of `self` and `other`, flattening nested unions.
    #[must_use]
    pub fn or(self, other: ValueSchema) -> Self {
        let mut variants = match self {
            ValueSchema::Union(variants) => variants,
            single => vec![single],
        };
        match other {
            ValueSchema::Union(more) => variants.extend(more),
            single => variants.push(single),
        }
        ValueSchema::Union(variants)
    }

    /// The schema behind any [`ValueSchema::Named`] wrappers
    #[must_use]
    pub fn resolved(&self) -> &ValueSchema {
        match self {
            ValueSchema::Named { schema, .. } => schema.resolved(),
            other => other,
        }
    }
}
