//! Resolved state shared by the signature decoder and the shape builder.
//!
//! A [`MetadataContext`] is built once per [`AssemblyImage`]. It indexes every TypeDef by
//! its full name, resolves the constructor of each marker attribute class and holds the
//! named type registry, so later lookups never have to rescan the tables for them.

use std::collections::HashMap;

use crate::{
    file::parser::Parser,
    metadata::{
        image::AssemblyImage,
        tables::{TableId, CONSTRUCTOR_NAME, CUSTOM_ATTRIBUTE_PROLOG},
    },
    schema::TypeRegistry,
    Error, Result,
};

/// Full names (`namespace\0name`) of the attribute classes the shape builder consults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerNames {
    /// Type-level control attribute of event types
    pub level_event_info: String,
    /// Exposes a member as a data-file property, optionally renaming it
    pub json_property: String,
    /// `(min, max)` of an integer member
    pub int_info: String,
    /// `(min, max)` of a float member
    pub float_info: String,
    /// `(minX, minY, maxX, maxY)` of a `Float2` member
    pub float2_info: String,
    /// `(minX, minY, maxX, maxY)` of a `Vector2` member
    pub vector2_info: String,
    /// Editor-only description text
    pub description: String,
    /// Editor-only button
    pub button: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        MarkerNames {
            level_event_info: "\0LevelEventInfoAttribute".to_string(),
            json_property: "\0JsonPropertyAttribute".to_string(),
            int_info: "\0IntInfoAttribute".to_string(),
            float_info: "\0FloatInfoAttribute".to_string(),
            float2_info: "\0Float2InfoAttribute".to_string(),
            vector2_info: "\0Vector2InfoAttribute".to_string(),
            description: "RDLevelEditor\0DescriptionAttribute".to_string(),
            button: "RDLevelEditor\0ButtonAttribute".to_string(),
        }
    }
}

/// Configuration of schema derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Narrow integer bounds with the int-range attribute. Float ranges always apply.
    pub clamp_int_ranges: bool,
    /// Namespace of the `LevelEvent_*` and `Conditional_*` type families
    pub editor_namespace: String,
    /// Marker attribute classes
    pub markers: MarkerNames,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            clamp_int_ranges: false,
            editor_namespace: "RDLevelEditor".to_string(),
            markers: MarkerNames::default(),
        }
    }
}

/// MethodDef rows (0-based) of the marker attribute constructors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerConstructors {
    /// See [`MarkerNames::level_event_info`]
    pub level_event_info: usize,
    /// See [`MarkerNames::json_property`]
    pub json_property: usize,
    /// See [`MarkerNames::int_info`]
    pub int_info: usize,
    /// See [`MarkerNames::float_info`]
    pub float_info: usize,
    /// See [`MarkerNames::float2_info`]
    pub float2_info: usize,
    /// See [`MarkerNames::vector2_info`]
    pub vector2_info: usize,
    /// See [`MarkerNames::description`]
    pub description: usize,
    /// See [`MarkerNames::button`]
    pub button: usize,
}

/// An assembly image together with everything resolved from it up front.
///
/// # Examples
///
/// ```rust,no_run
/// use rdschema::{AssemblyImage, File, MetadataContext, SchemaConfig};
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
/// let image = AssemblyImage::read(file.metadata()?)?;
/// let ctx = MetadataContext::new(&image, SchemaConfig::default())?;
///
/// let flash = ctx.typedef_by_name("RDLevelEditor\0LevelEvent_Flash")?;
/// println!("LevelEvent_Flash is TypeDef row {flash}");
/// # Ok::<(), rdschema::Error>(())
/// ```
pub struct MetadataContext<'a> {
    image: &'a AssemblyImage<'a>,
    config: SchemaConfig,
    types_by_name: HashMap<String, usize>,
    markers: MarkerConstructors,
    registry: TypeRegistry,
}

impl<'a> MetadataContext<'a> {
    /// Index `image` and resolve the marker constructors named by `config`, using the
    /// built-in named type registry.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if a marker class is missing,
    /// [`Error::AmbiguousConstructor`] if one does not declare exactly one `.ctor`, or a
    /// heap error for damaged type names.
    pub fn new(image: &'a AssemblyImage<'a>, config: SchemaConfig) -> Result<Self> {
        Self::with_registry(image, config, TypeRegistry::builtin())
    }

    /// Same as [`MetadataContext::new`], with a caller-supplied registry.
    ///
    /// # Errors
    /// See [`MetadataContext::new`].
    pub fn with_registry(
        image: &'a AssemblyImage<'a>,
        config: SchemaConfig,
        registry: TypeRegistry,
    ) -> Result<Self> {
        let mut types_by_name = HashMap::with_capacity(image.typedefs().len());
        for row in 0..image.typedefs().len() {
            // Nested types may share a name with a top-level type; the first row wins
            types_by_name
                .entry(image.full_type_name(row)?)
                .or_insert(row);
        }

        let mut ctx = MetadataContext {
            image,
            config,
            types_by_name,
            markers: MarkerConstructors::default(),
            registry,
        };

        let names = &ctx.config.markers;
        ctx.markers = MarkerConstructors {
            level_event_info: ctx.resolve_constructor(&names.level_event_info)?,
            json_property: ctx.resolve_constructor(&names.json_property)?,
            int_info: ctx.resolve_constructor(&names.int_info)?,
            float_info: ctx.resolve_constructor(&names.float_info)?,
            float2_info: ctx.resolve_constructor(&names.float2_info)?,
            vector2_info: ctx.resolve_constructor(&names.vector2_info)?,
            description: ctx.resolve_constructor(&names.description)?,
            button: ctx.resolve_constructor(&names.button)?,
        };

        Ok(ctx)
    }

    /// The image this context was built from
    #[must_use]
    pub fn image(&self) -> &'a AssemblyImage<'a> {
        self.image
    }

    /// The configuration this context was built with
    #[must_use]
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Resolved marker constructors
    #[must_use]
    pub fn markers(&self) -> &MarkerConstructors {
        &self.markers
    }

    /// The named type registry
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// 0-based TypeDef row of the type called `full_name` (`namespace\0name`).
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if no TypeDef has that name.
    pub fn typedef_by_name(&self, full_name: &str) -> Result<usize> {
        self.types_by_name
            .get(full_name)
            .copied()
            .ok_or_else(|| Error::TypeNotFound(full_name.to_string()))
    }

    /// Find the application of the attribute constructor at MethodDef row `constructor` on
    /// row `row` of `table`.
    ///
    /// The whole CustomAttribute table is scanned; the first match wins. The returned
    /// parser is positioned after the blob prolog, at the first fixed argument.
    ///
    /// # Errors
    /// Returns [`Error::MalformedAttributeBlob`] if the matching blob does not start with
    /// the `0x0001` prolog, or a heap error if it cannot be read.
    pub fn custom_attribute(
        &self,
        table: TableId,
        row: usize,
        constructor: usize,
    ) -> Result<Option<Parser<'a>>> {
        let Some(application) = self.image.custom_attributes().iter().find(|attribute| {
            attribute.parent.tag == table
                && attribute.parent.row as usize == row + 1
                && attribute.constructor.tag == TableId::MethodDef
                && attribute.constructor.row as usize == constructor + 1
        }) else {
            return Ok(None);
        };

        let blob = self.image.blob().get(application.value as usize)?;
        let mut parser = Parser::new(blob);
        let prolog = parser.read_le::<u16>().map_err(|_| Error::MalformedAttributeBlob {
            blob_offset: application.value,
            prolog: 0,
        })?;
        if prolog != CUSTOM_ATTRIBUTE_PROLOG {
            return Err(Error::MalformedAttributeBlob {
                blob_offset: application.value,
                prolog,
            });
        }

        Ok(Some(parser))
    }

    /// Returns true if the attribute constructor at `constructor` is applied to `row`.
    ///
    /// # Errors
    /// See [`MetadataContext::custom_attribute`].
    pub fn has_attribute(&self, table: TableId, row: usize, constructor: usize) -> Result<bool> {
        Ok(self.custom_attribute(table, row, constructor)?.is_some())
    }

    fn resolve_constructor(&self, full_name: &str) -> Result<usize> {
        let typedef = self.typedef_by_name(full_name)?;
        let image = self.image;

        let mut constructors = Vec::new();
        for row in image.method_range(typedef) {
            let Some(method) = image.methoddefs().get(row) else {
                continue;
            };
            if method.is_special_name() && image.string(method.name)? == CONSTRUCTOR_NAME {
                constructors.push(row);
            }
        }

        match constructors.as_slice() {
            [constructor] => {
                log::debug!(
                    "Marker {} resolved to MethodDef row {}",
                    full_name.replace('\0', "."),
                    constructor + 1
                );
                Ok(*constructor)
            }
            _ => Err(Error::AmbiguousConstructor {
                type_name: full_name.to_string(),
                count: constructors.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{context, load, ImageBuilder, Target};

    #[test]
    fn resolves_names_and_markers() {
        let (mut builder, markers) = ImageBuilder::with_standard_markers();
        let widget = builder.add_type("NS", "Widget");
        let data = builder.build();
        let image = load(&data);
        let ctx = context(&image);

        assert_eq!(ctx.typedef_by_name("NS\0Widget").unwrap(), widget);
        assert!(matches!(
            ctx.typedef_by_name("NS\0Gadget"),
            Err(Error::TypeNotFound(name)) if name == "NS\0Gadget"
        ));

        // One .ctor per marker class, in marker order
        assert_eq!(ctx.markers().level_event_info, markers.level_event_info);
        assert_eq!(ctx.markers().button, markers.button);
    }

    #[test]
    fn missing_marker_class() {
        let mut builder = ImageBuilder::new();
        builder.add_attribute_type("", "JsonPropertyAttribute");
        let data = builder.build();
        let image = load(&data);

        assert!(matches!(
            MetadataContext::new(&image, SchemaConfig::default()),
            Err(Error::TypeNotFound(name)) if name == "\0LevelEventInfoAttribute"
        ));
    }

    #[test]
    fn two_constructors_are_ambiguous() {
        let (mut builder, markers) = ImageBuilder::with_standard_markers();
        builder.add_method(markers.int_info, ".ctor", 0x1886);
        let data = builder.build();
        let image = load(&data);

        let err = MetadataContext::new(&image, SchemaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::AmbiguousConstructor { count: 2, .. }));
        assert_eq!(
            err.to_string(),
            "'IntInfoAttribute' must have exactly one constructor, found 2"
        );
    }

    #[test]
    fn methods_without_special_name_are_not_constructors() {
        let (mut builder, markers) = ImageBuilder::with_standard_markers();
        builder.add_method(markers.float_info, ".ctor", 0x0006);
        let data = builder.build();
        let image = load(&data);

        assert!(MetadataContext::new(&image, SchemaConfig::default()).is_ok());
    }

    #[test]
    fn attribute_lookup() {
        let (mut builder, markers) = ImageBuilder::with_standard_markers();
        let widget = builder.add_type("NS", "Widget");
        let count = builder.add_field(widget, "count", 0x0006, &[0x06, 0x08]);
        let ratio = builder.add_field(widget, "ratio", 0x0006, &[0x06, 0x0C]);
        builder.attribute(count, markers.int_info, &[0x01, 0, 0, 0, 0x09, 0, 0, 0]);
        builder.raw_attribute(ratio, markers.int_info, vec![0x02, 0x00]);
        builder.attribute(Target::Type(widget), markers.description, &[]);
        let data = builder.build();
        let image = load(&data);
        let ctx = context(&image);
        let int_info = ctx.markers().int_info;

        let count_row = image.field_range(widget).start;
        let mut args = ctx
            .custom_attribute(TableId::Field, count_row, int_info)
            .unwrap()
            .unwrap();
        assert_eq!(args.read_le::<i32>().unwrap(), 1);
        assert_eq!(args.read_le::<i32>().unwrap(), 9);

        assert!(ctx
            .custom_attribute(TableId::Field, count_row, ctx.markers().float_info)
            .unwrap()
            .is_none());
        assert!(ctx
            .custom_attribute(TableId::TypeDef, count_row, int_info)
            .unwrap()
            .is_none());
        assert!(ctx
            .has_attribute(TableId::TypeDef, widget, ctx.markers().description)
            .unwrap());

        assert!(matches!(
            ctx.custom_attribute(TableId::Field, count_row + 1, int_info),
            Err(Error::MalformedAttributeBlob { prolog: 2, .. })
        ));
    }
}
