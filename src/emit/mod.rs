//! Output formats for derived schemas.
//!
//! Both emitters render a root object [`Shape`] as one document: a definition per
//! [`ValueSchema::Named`] id reachable from the root, then the root object referencing
//! them. The level document is rendered from [`LevelSchema::root`], the character document
//! from [`character`](crate::catalog::character).
//!
//! [`LevelSchema::root`]: crate::catalog::LevelSchema::root

use indexmap::IndexMap;

use crate::schema::{Shape, ValueSchema};

pub mod json_schema;
pub mod typescript;

/// Named schemas reachable from `root`, each id once, dependencies before their users.
#[must_use]
pub fn named_definitions(root: &Shape) -> IndexMap<&str, &ValueSchema> {
    let mut definitions = IndexMap::new();
    collect_shape(root, &mut definitions);
    definitions
}

fn collect_shape<'s>(shape: &'s Shape, definitions: &mut IndexMap<&'s str, &'s ValueSchema>) {
    for (_, entry) in shape {
        collect(&entry.schema, definitions);
    }
}

fn collect<'s>(schema: &'s ValueSchema, definitions: &mut IndexMap<&'s str, &'s ValueSchema>) {
    match schema {
        ValueSchema::Named { id, schema } => {
            if !definitions.contains_key(id.as_str()) {
                collect(schema, definitions);
                definitions.insert(id.as_str(), schema.as_ref());
            }
        }
        ValueSchema::Tuple(items) | ValueSchema::Union(items) => {
            for item in items {
                collect(item, definitions);
            }
        }
        ValueSchema::Nullable(inner)
        | ValueSchema::Array(inner)
        | ValueSchema::BoundedArray { items: inner, .. } => collect(inner, definitions),
        ValueSchema::Object(shape) => collect_shape(shape, definitions),
        ValueSchema::Boolean
        | ValueSchema::BoundedInt(_)
        | ValueSchema::BoundedFloat(_)
        | ValueSchema::String
        | ValueSchema::BoundedString(_)
        | ValueSchema::Url
        | ValueSchema::Pattern(_)
        | ValueSchema::Enum(_)
        | ValueSchema::Literal(_)
        | ValueSchema::BooleanLiteral(_)
        | ValueSchema::Null
        | ValueSchema::Unknown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{registry::condition_expression, ShapeEntry};

    #[test]
    fn definitions_in_dependency_order() {
        let mut sound = Shape::new();
        sound.insert("filename", ShapeEntry::required(ValueSchema::String));
        sound.insert(
            "ease",
            ShapeEntry::optional(ValueSchema::string_enum(&["Linear"]).named("Ease")),
        );

        let mut event = Shape::new();
        event.insert("if", ShapeEntry::optional(condition_expression()));
        event.insert(
            "sounds",
            ShapeEntry::optional(ValueSchema::Object(sound).named("Sound").array()),
        );
        event.insert("again", ShapeEntry::optional(condition_expression().nullable()));

        let mut root = Shape::new();
        root.insert(
            "events",
            ShapeEntry::required(ValueSchema::Object(event).named("PlayEvent").array()),
        );

        let definitions = named_definitions(&root);
        assert_eq!(
            definitions.keys().copied().collect::<Vec<_>>(),
            ["ConditionExpression", "Ease", "Sound", "PlayEvent"]
        );
        assert!(matches!(definitions["Sound"], ValueSchema::Object(_)));
    }
}
