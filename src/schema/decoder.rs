//! Field and property signature decoding (ECMA-335 II.23.2).
//!
//! A member signature is a prolog byte followed by one type. The decoder walks the type
//! recursively and builds a [`ValueSchema`]. Range attributes are attached to the member,
//! not to the type, so every step of the walk knows which member it is decoding for.
//!
//! Supported elements: `BOOLEAN`, `I4`, `R4`, `STRING`, `VALUETYPE`/`CLASS` of a registered
//! type, `GENERICINST` of `System.Nullable<T>`, and `SZARRAY`.

use crate::{
    error::display_name,
    file::parser::Parser,
    metadata::{
        context::MetadataContext,
        tables::{CodedIndex, CodedIndexType, FieldAttributes, TableId},
    },
    schema::{Diagnostic, FloatRange, IntRange, NamedType, Shape, ShapeEntry, ValueSchema},
    Error, Result,
};

/// Element type bytes
pub mod element {
    /// `bool`
    pub const BOOLEAN: u8 = 0x02;
    /// `int32`
    pub const I4: u8 = 0x08;
    /// `float32`
    pub const R4: u8 = 0x0C;
    /// `string`
    pub const STRING: u8 = 0x0E;
    /// Value type, followed by a `TypeDefOrRef` coded index
    pub const VALUETYPE: u8 = 0x11;
    /// Reference type, followed by a `TypeDefOrRef` coded index
    pub const CLASS: u8 = 0x12;
    /// Generic instantiation: type, argument count, arguments
    pub const GENERICINST: u8 = 0x15;
    /// Single-dimensional zero-based array
    pub const SZARRAY: u8 = 0x1D;
}

/// Prolog of a field signature
pub const FIELD_SIGNATURE: u8 = 0x06;
/// Prolog of an instance property signature (`PROPERTY | HASTHIS`)
pub const PROPERTY_SIGNATURE: u8 = 0x28;

const NULLABLE: &str = "System\0Nullable`1";

/// Structs nested deeper than this are treated as cyclic
const MAX_STRUCT_DEPTH: usize = 16;

/// Whether a member is a Field or a Property row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    /// Field table row
    Field,
    /// Property table row
    Property,
}

impl MemberKind {
    /// The table the member lives in
    #[must_use]
    pub fn table(self) -> TableId {
        match self {
            MemberKind::Field => TableId::Field,
            MemberKind::Property => TableId::Property,
        }
    }

    /// `field` or `property`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
        }
    }
}

/// The member a signature belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSite {
    /// Field or Property
    pub kind: MemberKind,
    /// 0-based row in the member's table
    pub row: usize,
    /// Full name of the declaring type
    pub owner: String,
    /// Member name as data files spell it
    pub name: String,
}

/// Turns member signatures into [`ValueSchema`] trees, collecting diagnostics for
/// unrecognized named types.
pub struct SignatureDecoder<'c, 'a> {
    ctx: &'c MetadataContext<'a>,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
}

impl<'c, 'a> SignatureDecoder<'c, 'a> {
    /// A decoder without diagnostics
    #[must_use]
    pub fn new(ctx: &'c MetadataContext<'a>) -> Self {
        SignatureDecoder {
            ctx,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Diagnostics collected so far
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the collected diagnostics, leaving none behind
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Decode the signature of `member`, validating its prolog first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMemberSignature`] for a wrong prolog or a property with
    /// parameters, and any error of [`SignatureDecoder::decode`].
    pub fn decode_member(&mut self, member: &MemberSite) -> Result<ValueSchema> {
        let image = self.ctx.image();
        let signature = match member.kind {
            MemberKind::Field => image.fields().get(member.row).map(|field| field.signature),
            MemberKind::Property => image
                .properties()
                .get(member.row)
                .map(|property| property.signature),
        };
        let Some(signature) = signature else {
            let table = member.kind.table();
            return Err(Error::UnresolvedTypeReference {
                table,
                row: u32::try_from(member.row + 1).unwrap_or(u32::MAX),
                rows: image.info().rows(table) as usize,
            });
        };

        let mut parser = Parser::new(image.blob().get(signature as usize)?);
        let prolog = parser.read_le::<u8>()?;
        let valid = match member.kind {
            MemberKind::Field => prolog == FIELD_SIGNATURE,
            MemberKind::Property => {
                prolog == PROPERTY_SIGNATURE && parser.read_compressed_uint()? == 0
            }
        };
        if !valid {
            return Err(Error::InvalidMemberSignature {
                owner: display_name(&member.owner),
                member: member.name.clone(),
                kind: member.kind.as_str(),
                prolog,
            });
        }

        self.decode(&mut parser, member)
    }

    /// Decode one type at the parser position, consuming exactly its bytes.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedSignatureElement`] for element types outside the
    /// supported set, [`Error::UnsupportedGeneric`] for generics other than
    /// `Nullable<T>`, [`Error::UnresolvedTypeReference`] for dangling type references, and
    /// read errors for truncated signatures.
    pub fn decode(&mut self, parser: &mut Parser<'a>, member: &MemberSite) -> Result<ValueSchema> {
        let offset = parser.pos();
        match parser.read_le::<u8>()? {
            element::BOOLEAN => Ok(ValueSchema::Boolean),
            element::I4 => self.int(member),
            element::R4 => self.float(member),
            element::STRING => Ok(ValueSchema::String),
            element::VALUETYPE | element::CLASS => {
                let name = self.read_type_name(parser)?;
                self.named(&name, member)
            }
            element::GENERICINST => self.generic(parser, member),
            element::SZARRAY => Ok(self.decode(parser, member)?.array()),
            other => Err(unsupported_element(member, other, offset)),
        }
    }

    fn int(&self, member: &MemberSite) -> Result<ValueSchema> {
        if !self.ctx.config().clamp_int_ranges {
            return Ok(ValueSchema::BoundedInt(IntRange::FULL));
        }

        let constructor = self.ctx.markers().int_info;
        let range = match self.member_attribute(member, constructor)? {
            Some(mut args) => IntRange::new(args.read_le::<i32>()?, args.read_le::<i32>()?),
            None => IntRange::FULL,
        };
        Ok(ValueSchema::BoundedInt(range))
    }

    fn float(&self, member: &MemberSite) -> Result<ValueSchema> {
        let constructor = self.ctx.markers().float_info;
        let range = match self.member_attribute(member, constructor)? {
            Some(mut args) => FloatRange::new(args.read_le::<f32>()?, args.read_le::<f32>()?),
            None => FloatRange::UNBOUNDED,
        };
        Ok(ValueSchema::BoundedFloat(range))
    }

    fn generic(&mut self, parser: &mut Parser<'a>, member: &MemberSite) -> Result<ValueSchema> {
        let offset = parser.pos();
        let inner = parser.read_le::<u8>()?;
        if inner != element::VALUETYPE && inner != element::CLASS {
            return Err(unsupported_element(member, inner, offset));
        }

        let generic = self.read_type_name(parser)?;
        let arity = parser.read_compressed_uint()?;
        if generic != NULLABLE || arity != 1 {
            return Err(Error::UnsupportedGeneric {
                owner: display_name(&member.owner),
                member: member.name.clone(),
                generic,
                arity,
            });
        }

        Ok(self.decode(parser, member)?.nullable())
    }

    fn named(&mut self, name: &str, member: &MemberSite) -> Result<ValueSchema> {
        let Some(named) = self.ctx.registry().get(name).copied() else {
            let diagnostic = Diagnostic {
                type_name: member.owner.clone(),
                member: member.name.clone(),
                unrecognized: name.to_string(),
            };
            log::warn!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
            return Ok(ValueSchema::Unknown);
        };

        let markers = *self.ctx.markers();
        match named {
            NamedType::Enum(values) => Ok(ValueSchema::string_enum(values)),
            NamedType::SharedEnum { id, values } => Ok(ValueSchema::string_enum(values).named(id)),
            NamedType::Schema(schema) => Ok(schema()),
            NamedType::Float2 => {
                let (x, y) = self.pair_bounds(member, markers.float2_info)?;
                Ok(ValueSchema::Tuple(vec![
                    ValueSchema::BoundedFloat(x).nullable(),
                    ValueSchema::BoundedFloat(y).nullable(),
                ]))
            }
            NamedType::Vector2 => {
                let (x, y) = self.pair_bounds(member, markers.vector2_info)?;
                Ok(ValueSchema::Tuple(vec![
                    ValueSchema::BoundedFloat(x),
                    ValueSchema::BoundedFloat(y),
                ]))
            }
            NamedType::Struct { id, required } => {
                let typedef = self.ctx.typedef_by_name(name)?;
                let shape = self.struct_shape(typedef, name, required)?;
                Ok(ValueSchema::Object(shape).named(id))
            }
            NamedType::Opaque => Ok(ValueSchema::Unknown),
        }
    }

    /// Shape a struct from its instance fields. A JSON property attribute renames a
    /// field but is not required.
    fn struct_shape(
        &mut self,
        typedef: usize,
        full_name: &str,
        required: &[&str],
    ) -> Result<Shape> {
        if self.depth >= MAX_STRUCT_DEPTH {
            return Err(malformed_error!(
                "Struct nesting deeper than {} at {}",
                MAX_STRUCT_DEPTH,
                display_name(full_name)
            ));
        }

        self.depth += 1;
        let shape = self.struct_fields(typedef, full_name, required);
        self.depth -= 1;
        shape
    }

    fn struct_fields(
        &mut self,
        typedef: usize,
        full_name: &str,
        required: &[&str],
    ) -> Result<Shape> {
        let image = self.ctx.image();
        let json_property = self.ctx.markers().json_property;

        let mut shape = Shape::new();
        for row in image.field_range(typedef) {
            let Some(field) = image.fields().get(row) else {
                continue;
            };
            if field.flags & FieldAttributes::STATIC != 0 {
                continue;
            }

            let declared = image.string(field.name)?;
            let name = match self.ctx.custom_attribute(TableId::Field, row, json_property)? {
                Some(mut args) => args
                    .read_ser_string()?
                    .filter(|name| !name.is_empty())
                    .unwrap_or(declared),
                None => declared,
            };

            let site = MemberSite {
                kind: MemberKind::Field,
                row,
                owner: full_name.to_string(),
                name: name.to_string(),
            };
            let schema = self.decode_member(&site)?;
            let entry = if required.contains(&name) {
                ShapeEntry::required(schema)
            } else {
                ShapeEntry::optional(schema)
            };
            shape.insert(name, entry);
        }

        Ok(shape)
    }

    /// X and Y bounds from a `(minX, minY, maxX, maxY)` attribute on the member.
    fn pair_bounds(
        &self,
        member: &MemberSite,
        constructor: usize,
    ) -> Result<(FloatRange, FloatRange)> {
        let Some(mut args) = self.member_attribute(member, constructor)? else {
            return Ok((FloatRange::UNBOUNDED, FloatRange::UNBOUNDED));
        };

        let min_x = args.read_le::<f32>()?;
        let min_y = args.read_le::<f32>()?;
        let max_x = args.read_le::<f32>()?;
        let max_y = args.read_le::<f32>()?;
        Ok((FloatRange::new(min_x, max_x), FloatRange::new(min_y, max_y)))
    }

    fn member_attribute(
        &self,
        member: &MemberSite,
        constructor: usize,
    ) -> Result<Option<Parser<'a>>> {
        self.ctx
            .custom_attribute(member.kind.table(), member.row, constructor)
    }

    fn read_type_name(&self, parser: &mut Parser<'a>) -> Result<String> {
        let encoded = parser.read_compressed_uint()?;
        let index = CodedIndex::decode(encoded, CodedIndexType::TypeDefOrRef)?;
        self.ctx.image().type_name_of(&index)
    }
}

fn unsupported_element(member: &MemberSite, element: u8, offset: usize) -> Error {
    Error::UnsupportedSignatureElement {
        owner: display_name(&member.owner),
        member: member.name.clone(),
        element,
        offset,
    }
}
