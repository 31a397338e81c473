//! TypeScript declaration rendering.
//!
//! Every definition becomes `export type Name = ...;`. Unions of two or more variants are
//! parenthesized so they can be nested and suffixed with `[]` without changing meaning.

use std::fmt::Write;

use crate::{
    catalog::LevelSchema,
    emit::named_definitions,
    schema::{Shape, ValueSchema},
};

/// Declarations for every definition of `level`, then the `Level` type.
#[must_use]
pub fn level(level: &LevelSchema) -> String {
    document(&level.root, "Level")
}

/// Declarations for the character file, ending with the `Character` type.
#[must_use]
pub fn character(character: &Shape) -> String {
    document(character, "Character")
}

/// One declaration per named schema reachable from `root`, then `root` itself as `name`.
#[must_use]
pub fn document(root: &Shape, name: &str) -> String {
    let mut out = String::new();
    for (id, schema) in named_definitions(root) {
        declare(&mut out, id, &render(schema));
    }
    declare(&mut out, name, &shape_type(root, 0));
    out
}

/// One `export type` line
fn declare(out: &mut String, id: &str, body: &str) {
    let _ = writeln!(out, "export type {id} = {body};");
}

/// Render one schema; named subtrees render as their id.
#[must_use]
pub fn render(schema: &ValueSchema) -> String {
    render_at(schema, 0)
}

fn render_at(schema: &ValueSchema, indent: usize) -> String {
    match schema {
        ValueSchema::Boolean => "boolean".to_string(),
        ValueSchema::BoundedInt(_) | ValueSchema::BoundedFloat(_) => "number".to_string(),
        ValueSchema::String
        | ValueSchema::BoundedString(_)
        | ValueSchema::Url
        | ValueSchema::Pattern(_) => "string".to_string(),
        ValueSchema::Enum(values) => union(values.iter().map(|value| quote(value)).collect()),
        ValueSchema::Literal(value) => quote(value),
        ValueSchema::BooleanLiteral(value) => value.to_string(),
        ValueSchema::Tuple(items) => {
            let items: Vec<String> = items.iter().map(|item| render_at(item, indent)).collect();
            format!("[{}]", items.join(", "))
        }
        ValueSchema::Nullable(inner) => union(vec![render_at(inner, indent), "null".to_string()]),
        ValueSchema::Array(inner) | ValueSchema::BoundedArray { items: inner, .. } => {
            format!("{}[]", render_at(inner, indent))
        }
        ValueSchema::Union(variants) => {
            union(variants.iter().map(|variant| render_at(variant, indent)).collect())
        }
        ValueSchema::Null => "null".to_string(),
        ValueSchema::Object(shape) => shape_type(shape, indent),
        ValueSchema::Named { id, .. } => id.clone(),
        ValueSchema::Unknown => "unknown".to_string(),
    }
}

/// An object type with one property per line.
#[must_use]
pub fn shape_type(shape: &Shape, indent: usize) -> String {
    if shape.is_empty() {
        return "{}".to_string();
    }

    let padding = " ".repeat(indent + 2);
    let mut out = String::from("{\n");
    for (key, entry) in shape {
        let optional = if entry.required { "" } else { "?" };
        let _ = writeln!(
            out,
            "{padding}{}{optional}: {};",
            property_key(key),
            render_at(&entry.schema, indent + 2)
        );
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out
}

fn union(variants: Vec<String>) -> String {
    match variants.len() {
        0 => "never".to_string(),
        1 => variants.into_iter().next().unwrap_or_default(),
        _ => format!("({})", variants.join(" | ")),
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Keys that are not identifiers are quoted
fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog,
        schema::{registry::condition_expression, ShapeEntry},
    };

    #[test]
    fn value_types() {
        assert_eq!(render(&ValueSchema::int().nullable().array()), "(number | null)[]");
        assert_eq!(
            render(&ValueSchema::string_enum(&["Linear", "Out\"Sine"])),
            r#"("Linear" | "Out\"Sine")"#
        );
        assert_eq!(render(&ValueSchema::string_enum(&["Only"])), r#""Only""#);
        assert_eq!(render(&ValueSchema::Unknown), "unknown");
        assert_eq!(
            render(&ValueSchema::Tuple(vec![ValueSchema::float(), ValueSchema::Boolean])),
            "[number, boolean]"
        );
        assert_eq!(render(&condition_expression()), "ConditionExpression");
        assert_eq!(render(&ValueSchema::Union(Vec::new())), "never");
    }

    #[test]
    fn object_types() {
        let mut inner = Shape::new();
        inner.insert("x", ShapeEntry::required(ValueSchema::int()));
        let mut shape = Shape::new();
        shape.insert("type", ShapeEntry::required(ValueSchema::Literal("Flash".to_string())));
        shape.insert("if", ShapeEntry::optional(condition_expression()));
        shape.insert("p1-x", ShapeEntry::optional(ValueSchema::Object(inner)));

        assert_eq!(
            shape_type(&shape, 0),
            concat!(
                "{\n",
                "  type: \"Flash\";\n",
                "  if?: ConditionExpression;\n",
                "  \"p1-x\"?: {\n",
                "    x: number;\n",
                "  };\n",
                "}",
            )
        );
        assert_eq!(shape_type(&Shape::new(), 4), "{}");
    }

    #[test]
    fn level_declarations() {
        let event = Shape::new().optional("if", condition_expression());
        let flash = ValueSchema::Object(event.clone()).named("FlashEvent");
        let bass_drop = ValueSchema::Object(event).named("BassDropEvent");

        let mut schema = LevelSchema::default();
        schema.root = catalog::level_root(
            ValueSchema::Union(vec![flash, bass_drop]).named("Event"),
            ValueSchema::Union(Vec::new()).named("Conditional"),
        );

        let text = level(&schema);
        let lines: Vec<&str> = text.lines().filter(|line| line.starts_with("export")).collect();
        assert_eq!(
            lines,
            [
                "export type Settings = {",
                "export type RowType = (\"Classic\" | \"Oneshot\");",
                "export type Player = (\"P1\" | \"P2\" | \"CPU\");",
                "export type Row = {",
                "export type Decoration = {",
                "export type ConditionExpression = (string | number[]);",
                "export type FlashEvent = {",
                "export type BassDropEvent = {",
                "export type Event = (FlashEvent | BassDropEvent);",
                "export type Conditional = never;",
                "export type Bookmark = {",
                "export type Color = string;",
                "export type Level = {",
            ]
        );
        assert!(text.contains("  rankMaxMistakes: number[];\n"));
        assert!(text.contains("  $schema?: string;\n"));
        assert!(text.contains("  rows: Row[];\n"));
        assert!(text.contains("  colorPalette?: Color[];\n"));
    }

    #[test]
    fn character_declarations() {
        let text = character(&catalog::character());
        let lines: Vec<&str> = text.lines().filter(|line| line.starts_with("export")).collect();
        assert_eq!(lines, ["export type Clip = {", "export type Character = {"]);
        assert!(text.contains("  loop: (\"yes\" | \"onBeat\" | \"no\");\n"));
        assert!(text.contains("  size: [number, number];\n"));
        assert!(text.contains("  clips: Clip[];\n"));
    }

    #[test]
    fn literal_booleans() {
        assert_eq!(render(&ValueSchema::BooleanLiteral(true)), "true");
        assert_eq!(render(&ValueSchema::Url), "string");
        assert_eq!(render(&ValueSchema::String.array_of_len(6)), "string[]");
    }
}
