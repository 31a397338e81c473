//! JSON Schema (draft-07) rendering.
//!
//! Named schemas become entries of `definitions` and are referenced with `$ref`. A union
//! whose variants each consist of a single `type` keyword collapses into one `type` array,
//! so `Nullable(String)` renders as `{"type": ["string", "null"]}`.

use serde_json::{json, Map, Value};

use crate::{
    catalog::LevelSchema,
    emit::named_definitions,
    schema::{FloatRange, IntRange, Shape, ValueSchema},
};

/// `$id` of the level schema
pub const LEVEL_SCHEMA_ID: &str = "https://0f-0b.github.io/rd-schema/level.json";

/// `$id` of the character schema
pub const CHARACTER_SCHEMA_ID: &str = "https://0f-0b.github.io/rd-schema/character.json";

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// The complete level schema document.
#[must_use]
pub fn level(level: &LevelSchema) -> Value {
    document(&level.root, LEVEL_SCHEMA_ID)
}

/// The complete character schema document.
#[must_use]
pub fn character(character: &Shape) -> Value {
    document(character, CHARACTER_SCHEMA_ID)
}

/// A draft-07 document with `root` as its top-level object and one definition per named
/// schema reachable from it.
#[must_use]
pub fn document(root: &Shape, id: &str) -> Value {
    let mut definitions = Map::new();
    for (name, schema) in named_definitions(root) {
        definitions.insert(name.to_string(), render(schema));
    }

    let mut object = Map::new();
    object.insert("$schema".to_string(), json!(DRAFT_07));
    object.insert("$id".to_string(), json!(id));
    if let Value::Object(body) = shape_schema(root) {
        object.extend(body);
    }
    if !definitions.is_empty() {
        object.insert("definitions".to_string(), Value::Object(definitions));
    }
    Value::Object(object)
}

/// An object schema for `shape`.
#[must_use]
pub fn shape_schema(shape: &Shape) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (key, entry) in shape {
        properties.insert(key.clone(), render(&entry.schema));
        if entry.required {
            required.push(Value::String(key.clone()));
        }
    }

    let mut object = Map::new();
    object.insert("type".to_string(), json!("object"));
    object.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        object.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(object)
}

/// Render one schema; named subtrees become references.
#[must_use]
pub fn render(schema: &ValueSchema) -> Value {
    match schema {
        ValueSchema::Boolean => json!({ "type": "boolean" }),
        ValueSchema::BoundedInt(range) => int(*range),
        ValueSchema::BoundedFloat(range) => float(*range),
        ValueSchema::String => json!({ "type": "string" }),
        ValueSchema::BoundedString(max) => json!({ "type": "string", "maxLength": max }),
        ValueSchema::Url => json!({ "type": "string", "format": "uri" }),
        ValueSchema::Pattern(pattern) => json!({ "type": "string", "pattern": pattern }),
        ValueSchema::Enum(values) => json!({ "type": "string", "enum": values }),
        ValueSchema::Literal(value) => json!({ "type": "string", "const": value }),
        ValueSchema::BooleanLiteral(value) => json!({ "type": "boolean", "const": value }),
        ValueSchema::Tuple(items) => json!({
            "type": "array",
            "items": items.iter().map(render).collect::<Vec<_>>(),
            "minItems": items.len(),
            "maxItems": items.len(),
        }),
        ValueSchema::Nullable(inner) => any_of(vec![render(inner), json!({ "type": "null" })]),
        ValueSchema::Array(inner) => json!({ "type": "array", "items": render(inner) }),
        ValueSchema::BoundedArray { items, min, max } => bounded_array(items, *min, *max),
        ValueSchema::Union(variants) => any_of(variants.iter().map(render).collect()),
        ValueSchema::Null => json!({ "type": "null" }),
        ValueSchema::Object(shape) => shape_schema(shape),
        ValueSchema::Named { id, .. } => reference(id),
        ValueSchema::Unknown => json!({}),
    }
}

fn int(range: IntRange) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!("integer"));
    if range.min != i32::MIN {
        object.insert("minimum".to_string(), json!(range.min));
    }
    if range.max != i32::MAX {
        object.insert("maximum".to_string(), json!(range.max));
    }
    Value::Object(object)
}

fn float(range: FloatRange) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!("number"));
    if let Some(min) = range.finite_min() {
        object.insert("minimum".to_string(), number(min));
    }
    if let Some(max) = range.finite_max() {
        object.insert("maximum".to_string(), number(max));
    }
    Value::Object(object)
}

/// Whole numbers print without a fraction
#[allow(clippy::cast_possible_truncation)]
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

fn bounded_array(items: &ValueSchema, min: usize, max: Option<usize>) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!("array"));
    object.insert("items".to_string(), render(items));
    if min > 0 {
        object.insert("minItems".to_string(), json!(min));
    }
    if let Some(max) = max {
        object.insert("maxItems".to_string(), json!(max));
    }
    Value::Object(object)
}

fn any_of(variants: Vec<Value>) -> Value {
    let types: Option<Vec<Value>> = variants
        .iter()
        .map(|variant| match variant.as_object() {
            Some(object) if object.len() == 1 => object.get("type").cloned(),
            _ => None,
        })
        .collect();

    match types {
        Some(types) if !types.is_empty() && types.iter().all(Value::is_string) => {
            json!({ "type": types })
        }
        _ => json!({ "anyOf": variants }),
    }
}

fn reference(id: &str) -> Value {
    json!({ "$ref": format!("#/definitions/{id}") })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog,
        schema::{registry::condition_expression, ShapeEntry},
    };

    #[test]
    fn scalars() {
        assert_eq!(render(&ValueSchema::int()), json!({ "type": "integer" }));
        assert_eq!(
            render(&ValueSchema::BoundedInt(IntRange::at_least(1))),
            json!({ "type": "integer", "minimum": 1 })
        );
        assert_eq!(
            render(&ValueSchema::BoundedFloat(FloatRange::new(-0.5, 2.0))),
            json!({ "type": "number", "minimum": -0.5, "maximum": 2 })
        );
        assert_eq!(render(&ValueSchema::float()), json!({ "type": "number" }));
        assert_eq!(render(&ValueSchema::Unknown), json!({}));
        assert_eq!(
            render(&ValueSchema::Literal("Flash".to_string())),
            json!({ "type": "string", "const": "Flash" })
        );
        assert_eq!(
            render(&ValueSchema::BooleanLiteral(false)),
            json!({ "type": "boolean", "const": false })
        );
        assert_eq!(
            render(&ValueSchema::BoundedString(256)),
            json!({ "type": "string", "maxLength": 256 })
        );
        assert_eq!(render(&ValueSchema::Url), json!({ "type": "string", "format": "uri" }));
    }

    #[test]
    fn nullable_and_unions() {
        assert_eq!(
            render(&ValueSchema::String.nullable()),
            json!({ "type": ["string", "null"] })
        );
        assert_eq!(
            render(&ValueSchema::BoundedFloat(FloatRange::at_least(0.0)).nullable()),
            json!({ "anyOf": [{ "type": "number", "minimum": 0 }, { "type": "null" }] })
        );
        assert_eq!(
            render(&ValueSchema::String.array().or(ValueSchema::String)),
            json!({ "anyOf": [
                { "type": "array", "items": { "type": "string" } },
                { "type": "string" },
            ] })
        );
        assert_eq!(
            render(&condition_expression()),
            json!({ "$ref": "#/definitions/ConditionExpression" })
        );
    }

    #[test]
    fn tuples_and_bounded_arrays() {
        let pair = ValueSchema::Tuple(vec![ValueSchema::float(), ValueSchema::float()]);
        assert_eq!(
            render(&pair),
            json!({
                "type": "array",
                "items": [{ "type": "number" }, { "type": "number" }],
                "minItems": 2,
                "maxItems": 2,
            })
        );
        assert_eq!(
            render(&ValueSchema::String.array_of(0, Some(21))),
            json!({ "type": "array", "items": { "type": "string" }, "maxItems": 21 })
        );
        assert_eq!(
            render(&ValueSchema::int().array_of_len(4)),
            json!({
                "type": "array",
                "items": { "type": "integer" },
                "minItems": 4,
                "maxItems": 4,
            })
        );
    }

    #[test]
    fn level_document() {
        let event = Shape::new()
            .required("type", ValueSchema::Literal("Flash".to_string()))
            .optional("if", condition_expression());
        let conditional = Shape::new().required("id", ValueSchema::int());

        let mut schema = LevelSchema::default();
        schema.root = catalog::level_root(
            ValueSchema::Union(vec![ValueSchema::Object(event).named("FlashEvent")])
                .named("Event"),
            ValueSchema::Union(vec![ValueSchema::Object(conditional).named("LastHitConditional")])
                .named("Conditional"),
        );

        let document = level(&schema);
        assert_eq!(document["$schema"], DRAFT_07);
        assert_eq!(document["$id"], LEVEL_SCHEMA_ID);
        assert_eq!(document["required"], json!(["rows", "events"]));
        assert_eq!(
            document["properties"]["$schema"],
            json!({ "type": "string", "format": "uri" })
        );
        assert_eq!(
            document["properties"]["events"],
            json!({ "type": "array", "items": { "$ref": "#/definitions/Event" } })
        );
        assert_eq!(
            document["properties"]["colorPalette"]["maxItems"],
            json!(catalog::PALETTE_SIZE)
        );
        assert_eq!(
            document["definitions"]["Event"],
            json!({ "anyOf": [{ "$ref": "#/definitions/FlashEvent" }] })
        );
        assert_eq!(document["definitions"]["FlashEvent"]["required"], json!(["type"]));
        assert_eq!(
            document["definitions"]["ConditionExpression"],
            json!({ "anyOf": [
                { "type": "string" },
                { "type": "array", "items": { "type": "integer" } },
            ] })
        );

        let keys: Vec<&String> = document["definitions"].as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            [
                "Settings",
                "RowType",
                "Player",
                "Row",
                "Decoration",
                "ConditionExpression",
                "FlashEvent",
                "Event",
                "LastHitConditional",
                "Conditional",
                "Bookmark",
                "Color",
            ]
        );
    }

    #[test]
    fn character_document() {
        let document = character(&catalog::character());
        assert_eq!(document["$id"], CHARACTER_SCHEMA_ID);
        assert_eq!(document["required"], json!(["size", "clips"]));
        assert_eq!(
            document["properties"]["size"],
            json!({
                "type": "array",
                "items": [{ "type": "integer" }, { "type": "integer" }],
                "minItems": 2,
                "maxItems": 2,
            })
        );
        assert_eq!(
            document["properties"]["clips"]["items"],
            json!({ "$ref": "#/definitions/Clip" })
        );
        assert_eq!(
            document["definitions"]["Clip"]["properties"]["loop"],
            json!({ "type": "string", "enum": ["yes", "onBeat", "no"] })
        );
        assert_eq!(
            document["definitions"]["Clip"]["required"],
            json!(["name", "frames", "loop", "fps"])
        );
    }
}
