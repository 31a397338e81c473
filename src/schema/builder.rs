//! Property shapes of game types, and of the event and conditional families.
//!
//! A type exposes the properties and fields that carry the JSON property marker, in
//! table order, properties first. Members carrying the editor description or button
//! markers are editor-only and left out. Events and conditionals add a fixed set of
//! structural keys in front of those members.

use crate::{
    error::display_name,
    file::parser::Parser,
    metadata::{context::MetadataContext, tables::TableId},
    schema::{
        decoder::{MemberKind, MemberSite, SignatureDecoder},
        registry::condition_expression,
        Diagnostic, FloatRange, IntRange, Shape, ShapeEntry, ValueSchema,
    },
    Error, Result,
};

/// `default_row` value meaning the event has no row
pub const NO_DEFAULT_ROW: i32 = -10;

/// Options for [`ShapeBuilder::event_shape`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOptions {
    /// The event is always placed on the first track and has no `y` key
    pub fixed_y: bool,
}

/// Fixed arguments of the level-event-info attribute of an event type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventInfo {
    /// Nonzero if the event can target rooms
    pub rooms_usage: i32,
    /// The event carries a bar position
    pub has_bar: bool,
    /// The event carries a beat position
    pub has_beat: bool,
    /// The event carries its type name
    pub has_type: bool,
    /// The event targets a named object instead of a track
    pub has_target: bool,
    /// Row the editor places the event on, [`NO_DEFAULT_ROW`] if it has none
    pub default_row: i32,
}

impl EventInfo {
    /// Read the fixed arguments from an attribute blob positioned after its prolog.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] for a truncated blob.
    pub fn read(parser: &mut Parser) -> Result<Self> {
        // Two enum arguments the schema has no use for
        parser.advance_by(8)?;

        Ok(EventInfo {
            rooms_usage: parser.read_le::<i32>()?,
            has_bar: parser.read_le::<u8>()? != 0,
            has_beat: parser.read_le::<u8>()? != 0,
            has_type: parser.read_le::<u8>()? != 0,
            has_target: parser.read_le::<u8>()? != 0,
            default_row: parser.read_le::<i32>()?,
        })
    }

    /// Events with bar, beat and type keys and nothing else
    pub const BASE: EventInfo = EventInfo {
        rooms_usage: 0,
        has_bar: true,
        has_beat: true,
        has_type: true,
        has_target: false,
        default_row: NO_DEFAULT_ROW,
    };

    /// The same events, sitting on a row
    #[must_use]
    pub const fn with_row(self) -> Self {
        EventInfo {
            default_row: 0,
            ..self
        }
    }

    /// The same events, able to target rooms
    #[must_use]
    pub const fn with_rooms(self) -> Self {
        EventInfo {
            rooms_usage: 1,
            ..self
        }
    }

    /// Returns true if events of this type sit on a row
    #[must_use]
    pub fn has_row(&self) -> bool {
        self.default_row != NO_DEFAULT_ROW
    }

    /// Returns true if events of this type can target rooms
    #[must_use]
    pub fn has_rooms(&self) -> bool {
        self.rooms_usage != 0
    }
}

/// Builds [`Shape`]s from the types of a [`MetadataContext`].
///
/// One builder is meant to serve a whole schema run: diagnostics accumulate across calls.
///
/// # Examples
///
/// ```rust,no_run
/// use rdschema::{AssemblyImage, File, MetadataContext, SchemaConfig, ShapeBuilder};
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
/// let image = AssemblyImage::read(file.metadata()?)?;
/// let ctx = MetadataContext::new(&image, SchemaConfig::default())?;
///
/// let mut builder = ShapeBuilder::new(&ctx);
/// let shape = builder.event_shape("PlaySound", Default::default())?;
/// for (key, entry) in &shape {
///     println!("{key}{}", if entry.required { "" } else { "?" });
/// }
/// # Ok::<(), rdschema::Error>(())
/// ```
pub struct ShapeBuilder<'c, 'a> {
    ctx: &'c MetadataContext<'a>,
    decoder: SignatureDecoder<'c, 'a>,
}

impl<'c, 'a> ShapeBuilder<'c, 'a> {
    /// A builder without diagnostics
    #[must_use]
    pub fn new(ctx: &'c MetadataContext<'a>) -> Self {
        ShapeBuilder {
            ctx,
            decoder: SignatureDecoder::new(ctx),
        }
    }

    /// Diagnostics collected so far
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.decoder.diagnostics()
    }

    /// Consume the builder, returning its diagnostics
    #[must_use]
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.decoder.take_diagnostics()
    }

    /// Shape of the type called `full_name` (`namespace\0name`), from its marked members.
    ///
    /// Every entry is optional.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if no such type exists, or any error of
    /// [`SignatureDecoder::decode_member`] and attribute lookups.
    pub fn type_shape(&mut self, full_name: &str) -> Result<Shape> {
        let typedef = self.ctx.typedef_by_name(full_name)?;
        self.members(typedef, full_name)
    }

    /// Control attribute of the event type `LevelEvent_<name>`.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the event type does not exist,
    /// [`Error::MissingControlAttribute`] if it does not carry the control attribute.
    pub fn event_info(&self, name: &str) -> Result<EventInfo> {
        let full_name = self.family_type(&format!("LevelEvent_{name}"));
        let typedef = self.ctx.typedef_by_name(&full_name)?;

        let constructor = self.ctx.markers().level_event_info;
        let Some(mut args) = self
            .ctx
            .custom_attribute(TableId::TypeDef, typedef, constructor)?
        else {
            return Err(Error::MissingControlAttribute {
                type_name: full_name,
                attribute: display_name(&self.ctx.config().markers.level_event_info),
            });
        };

        EventInfo::read(&mut args)
    }

    /// Shape of the event type `LevelEvent_<name>`: structural keys followed by the type's
    /// own marked members.
    ///
    /// A member named like a structural key replaces it in place. `row` and `target`
    /// stay required when they are structural.
    ///
    /// # Errors
    /// See [`ShapeBuilder::event_info`] and [`ShapeBuilder::type_shape`].
    pub fn event_shape(&mut self, name: &str, options: EventOptions) -> Result<Shape> {
        let info = self.event_info(name)?;
        let full_name = self.family_type(&format!("LevelEvent_{name}"));

        let mut shape = structural_keys(name, &info, options);
        let typedef = self.ctx.typedef_by_name(&full_name)?;
        let members = self.members(typedef, &full_name)?;
        merge_members(&mut shape, members);
        Ok(shape)
    }

    /// Shape of the conditional type `Conditional_<name>`.
    ///
    /// # Errors
    /// See [`ShapeBuilder::type_shape`].
    pub fn conditional_shape(&mut self, name: &str) -> Result<Shape> {
        let full_name = self.family_type(&format!("Conditional_{name}"));
        let typedef = self.ctx.typedef_by_name(&full_name)?;

        let mut shape = Shape::new();
        shape.insert("type", ShapeEntry::required(ValueSchema::Literal(name.to_string())));
        shape.insert("tag", ShapeEntry::optional(ValueSchema::String));
        shape.insert("name", ShapeEntry::required(ValueSchema::String));
        shape.insert("id", ShapeEntry::required(ValueSchema::int()));

        let members = self.members(typedef, &full_name)?;
        merge_members(&mut shape, members);
        Ok(shape)
    }

    fn family_type(&self, name: &str) -> String {
        format!("{}\0{}", self.ctx.config().editor_namespace, name)
    }

    fn members(&mut self, typedef: usize, full_name: &str) -> Result<Shape> {
        let image = self.ctx.image();

        let mut shape = Shape::new();
        for row in image.property_range(typedef) {
            self.add_member(&mut shape, MemberKind::Property, row, full_name)?;
        }
        for row in image.field_range(typedef) {
            self.add_member(&mut shape, MemberKind::Field, row, full_name)?;
        }
        Ok(shape)
    }

    fn add_member(
        &mut self,
        shape: &mut Shape,
        kind: MemberKind,
        row: usize,
        owner: &str,
    ) -> Result<()> {
        let ctx = self.ctx;
        let markers = *ctx.markers();
        let table = kind.table();

        let Some(mut json_property) = ctx.custom_attribute(table, row, markers.json_property)?
        else {
            return Ok(());
        };
        if ctx.has_attribute(table, row, markers.description)?
            || ctx.has_attribute(table, row, markers.button)?
        {
            return Ok(());
        }

        let image = ctx.image();
        let declared = match kind {
            MemberKind::Field => image.fields().get(row).map(|field| field.name),
            MemberKind::Property => image.properties().get(row).map(|property| property.name),
        };
        let Some(declared) = declared else {
            return Ok(());
        };
        let declared = image.string(declared)?;
        let name = json_property
            .read_ser_string()?
            .filter(|name| !name.is_empty())
            .unwrap_or(declared);

        let site = MemberSite {
            kind,
            row,
            owner: owner.to_string(),
            name: name.to_string(),
        };
        let schema = self.decoder.decode_member(&site)?;
        shape.insert(name, ShapeEntry::optional(schema));
        Ok(())
    }
}

/// The keys every event of type `name` carries before its own members.
///
/// In order: `bar`, `beat`, `y`, `type`, `if`, `tag`, `runTag`, `active`, `rooms`, `row`,
/// `target`, each present as `info` and `options` say.
#[must_use]
pub fn structural_keys(name: &str, info: &EventInfo, options: EventOptions) -> Shape {
    let mut shape = Shape::new();
    if info.has_bar {
        shape.insert("bar", ShapeEntry::optional(ValueSchema::BoundedInt(IntRange::at_least(1))));
    }
    if info.has_beat {
        shape.insert(
            "beat",
            ShapeEntry::optional(ValueSchema::BoundedFloat(FloatRange::at_least(1.0))),
        );
    }
    if !options.fixed_y && !info.has_target {
        shape.insert("y", ShapeEntry::optional(ValueSchema::int()));
    }
    if info.has_type {
        shape.insert("type", ShapeEntry::required(ValueSchema::Literal(name.to_string())));
    }
    shape.insert("if", ShapeEntry::optional(condition_expression()));
    shape.insert("tag", ShapeEntry::optional(ValueSchema::String));
    shape.insert("runTag", ShapeEntry::optional(ValueSchema::Boolean));
    shape.insert("active", ShapeEntry::optional(ValueSchema::Boolean));
    if info.has_rooms() {
        shape.insert("rooms", rooms_entry());
    }
    if info.has_row() {
        shape.insert("row", row_entry());
    }
    if info.has_target {
        shape.insert("target", ShapeEntry::required(ValueSchema::String));
    }
    shape
}

/// The `row` key of events, rows and decorations
#[must_use]
pub fn row_entry() -> ShapeEntry {
    ShapeEntry::required(ValueSchema::int())
}

/// The `rooms` key of events, rows and decorations
#[must_use]
pub fn rooms_entry() -> ShapeEntry {
    ShapeEntry::optional(ValueSchema::int().array())
}

fn merge_members(shape: &mut Shape, members: Shape) {
    for (key, entry) in members.into_iter() {
        let keeps_required = matches!(key.as_str(), "row" | "target")
            && shape.get(&key).is_some_and(|existing| existing.required);
        let entry = ShapeEntry {
            required: entry.required || keeps_required,
            ..entry
        };
        shape.insert(key, entry);
    }
}
