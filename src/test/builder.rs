//! Synthetic metadata writer for tests.
//!
//! [`ImageBuilder`] collects types, members and custom attribute applications and
//! serializes them into a `BSJB` metadata root with `#~`, `#Strings` and `#Blob` streams.
//! All heap and table indices are written 2 bytes wide, so builders stay small.
//!
//! Only the standard library is used here; the integration tests include this file too.

#![allow(dead_code)]

use std::collections::HashMap;

/// Element type bytes used in signatures
pub mod element {
    pub const BOOLEAN: u8 = 0x02;
    pub const I4: u8 = 0x08;
    pub const R4: u8 = 0x0C;
    pub const STRING: u8 = 0x0E;
    pub const VALUETYPE: u8 = 0x11;
    pub const CLASS: u8 = 0x12;
    pub const GENERICINST: u8 = 0x15;
    pub const SZARRAY: u8 = 0x1D;
    pub const OBJECT: u8 = 0x1C;
}

/// Field signature prolog
pub const FIELD_SIG: u8 = 0x06;
/// Instance property signature prolog
pub const PROPERTY_SIG: u8 = 0x28;

const MODULE: u8 = 0x00;
const TYPE_REF: u8 = 0x01;
const TYPE_DEF: u8 = 0x02;
const FIELD: u8 = 0x04;
const METHOD_DEF: u8 = 0x06;
const CUSTOM_ATTRIBUTE: u8 = 0x0C;
const PROPERTY_MAP: u8 = 0x15;
const PROPERTY: u8 = 0x17;

const METHOD_SPECIAL_NAME: u16 = 0x0800 | 0x1000 | 0x0006;

/// ECMA-335 compressed unsigned integer encoding.
pub fn encode_compressed_uint(value: u32) -> Vec<u8> {
    match value {
        0..=0x7F => vec![value as u8],
        0x80..=0x3FFF => vec![0x80 | (value >> 8) as u8, value as u8],
        _ => {
            assert!(value <= 0x1FFF_FFFF, "value {value:#x} not encodable");
            vec![
                0xC0 | (value >> 24) as u8,
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            ]
        }
    }
}

/// `TypeDefOrRefOrSpecEncoded` for the TypeDef at 0-based `row`.
pub fn typedef_ref(row: usize) -> Vec<u8> {
    encode_compressed_uint((row as u32 + 1) << 2)
}

/// `TypeDefOrRefOrSpecEncoded` for the TypeRef at 0-based `row`.
pub fn typeref_ref(row: usize) -> Vec<u8> {
    encode_compressed_uint(((row as u32 + 1) << 2) | 1)
}

/// Custom attribute `SerString`.
pub fn ser_string(value: Option<&str>) -> Vec<u8> {
    match value {
        None => vec![0xFF],
        Some(text) => {
            let mut out = encode_compressed_uint(text.len() as u32);
            out.extend_from_slice(text.as_bytes());
            out
        }
    }
}

/// Fixed arguments of a level-event-info attribute.
pub fn level_event_info(
    rooms_usage: i32,
    has_bar: bool,
    has_beat: bool,
    has_type: bool,
    has_target: bool,
    default_row: i32,
) -> Vec<u8> {
    let mut args = vec![0; 8];
    args.extend_from_slice(&rooms_usage.to_le_bytes());
    args.extend([
        u8::from(has_bar),
        u8::from(has_beat),
        u8::from(has_type),
        u8::from(has_target),
    ]);
    args.extend_from_slice(&default_row.to_le_bytes());
    args
}

/// Fixed arguments holding little-endian `f32` values.
pub fn f32_args(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// Fixed arguments holding little-endian `i32` values.
pub fn i32_args(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// Something a custom attribute can be applied to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// TypeDef by 0-based row
    Type(usize),
    /// Field by owning TypeDef and position inside it
    Field(usize, usize),
    /// Property by owning TypeDef and position inside it
    Property(usize, usize),
}

struct Member {
    name: String,
    flags: u16,
    signature: Vec<u8>,
}

struct TypeEntry {
    namespace: String,
    name: String,
    fields: Vec<Member>,
    methods: Vec<Member>,
    properties: Vec<Member>,
}

struct Attribute {
    target: Target,
    attribute_type: usize,
    blob: Vec<u8>,
}

/// Builder for synthetic metadata roots.
#[derive(Default)]
pub struct ImageBuilder {
    types: Vec<TypeEntry>,
    typerefs: Vec<(String, String)>,
    attributes: Vec<Attribute>,
}

/// Full names of the marker attribute classes the standard builder defines.
pub const STANDARD_MARKERS: [(&str, &str); 8] = [
    ("", "LevelEventInfoAttribute"),
    ("", "JsonPropertyAttribute"),
    ("", "IntInfoAttribute"),
    ("", "FloatInfoAttribute"),
    ("", "Float2InfoAttribute"),
    ("", "Vector2InfoAttribute"),
    ("RDLevelEditor", "DescriptionAttribute"),
    ("RDLevelEditor", "ButtonAttribute"),
];

/// TypeDef rows of the standard marker classes, in [`STANDARD_MARKERS`] order.
#[derive(Clone, Copy, Debug)]
pub struct Markers {
    pub level_event_info: usize,
    pub json_property: usize,
    pub int_info: usize,
    pub float_info: usize,
    pub float2_info: usize,
    pub vector2_info: usize,
    pub description: usize,
    pub button: usize,
}

impl ImageBuilder {
    pub fn new() -> Self {
        ImageBuilder::default()
    }

    /// A builder that already defines every standard marker attribute class.
    pub fn with_standard_markers() -> (Self, Markers) {
        let mut builder = ImageBuilder::new();
        let rows: Vec<usize> = STANDARD_MARKERS
            .iter()
            .map(|(namespace, name)| builder.add_attribute_type(namespace, name))
            .collect();

        let markers = Markers {
            level_event_info: rows[0],
            json_property: rows[1],
            int_info: rows[2],
            float_info: rows[3],
            float2_info: rows[4],
            vector2_info: rows[5],
            description: rows[6],
            button: rows[7],
        };
        (builder, markers)
    }

    /// Add a TypeDef, returning its 0-based row.
    pub fn add_type(&mut self, namespace: &str, name: &str) -> usize {
        self.types.push(TypeEntry {
            namespace: namespace.to_string(),
            name: name.to_string(),
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        });
        self.types.len() - 1
    }

    /// Add a TypeDef with a single `.ctor`, usable as an attribute class.
    pub fn add_attribute_type(&mut self, namespace: &str, name: &str) -> usize {
        let row = self.add_type(namespace, name);
        self.add_method(row, ".ctor", METHOD_SPECIAL_NAME);
        row
    }

    /// Add a TypeRef, returning its 0-based row.
    pub fn add_typeref(&mut self, namespace: &str, name: &str) -> usize {
        self.typerefs
            .push((namespace.to_string(), name.to_string()));
        self.typerefs.len() - 1
    }

    pub fn add_field(&mut self, owner: usize, name: &str, flags: u16, signature: &[u8]) -> Target {
        let fields = &mut self.types[owner].fields;
        fields.push(Member {
            name: name.to_string(),
            flags,
            signature: signature.to_vec(),
        });
        Target::Field(owner, fields.len() - 1)
    }

    pub fn add_method(&mut self, owner: usize, name: &str, flags: u16) {
        self.types[owner].methods.push(Member {
            name: name.to_string(),
            flags,
            signature: vec![0x20, 0x00, 0x01],
        });
    }

    pub fn add_property(&mut self, owner: usize, name: &str, signature: &[u8]) -> Target {
        let properties = &mut self.types[owner].properties;
        properties.push(Member {
            name: name.to_string(),
            flags: 0,
            signature: signature.to_vec(),
        });
        Target::Property(owner, properties.len() - 1)
    }

    /// Apply the attribute class at TypeDef `attribute_type` with the given fixed
    /// arguments; the `0x0001` prolog and an empty named-argument count are added.
    pub fn attribute(&mut self, target: Target, attribute_type: usize, args: &[u8]) {
        let mut blob = vec![0x01, 0x00];
        blob.extend_from_slice(args);
        blob.extend_from_slice(&[0x00, 0x00]);
        self.raw_attribute(target, attribute_type, blob);
    }

    /// Apply an attribute with a verbatim value blob.
    pub fn raw_attribute(&mut self, target: Target, attribute_type: usize, blob: Vec<u8>) {
        self.attributes.push(Attribute {
            target,
            attribute_type,
            blob,
        });
    }

    /// Serialize to a metadata root.
    pub fn build(&self) -> Vec<u8> {
        self.build_streams(None)
    }

    /// Serialize to a metadata root lacking the stream called `name`.
    pub fn build_without_stream(&self, name: &str) -> Vec<u8> {
        self.build_streams(Some(name))
    }

    fn build_streams(&self, skip: Option<&str>) -> Vec<u8> {
        let mut heaps = Heaps::new();
        let tables = self.write_tables(&mut heaps);

        let streams: Vec<(&str, Vec<u8>)> = vec![
            ("#~", tables),
            ("#Strings", heaps.strings),
            ("#Blob", heaps.blob),
        ]
        .into_iter()
        .filter(|(name, _)| Some(*name) != skip)
        .collect();

        write_root(&streams)
    }

    fn first_field(&self, owner: usize) -> usize {
        self.types[..owner].iter().map(|t| t.fields.len()).sum()
    }

    fn first_method(&self, owner: usize) -> usize {
        self.types[..owner].iter().map(|t| t.methods.len()).sum()
    }

    fn first_property(&self, owner: usize) -> usize {
        self.types[..owner].iter().map(|t| t.properties.len()).sum()
    }

    fn write_tables(&self, heaps: &mut Heaps) -> Vec<u8> {
        let field_count: usize = self.types.iter().map(|t| t.fields.len()).sum();
        let method_count: usize = self.types.iter().map(|t| t.methods.len()).sum();
        let property_count: usize = self.types.iter().map(|t| t.properties.len()).sum();
        let owners: Vec<usize> = (0..self.types.len())
            .filter(|&owner| !self.types[owner].properties.is_empty())
            .collect();

        let counts = [
            (MODULE, 1),
            (TYPE_REF, self.typerefs.len()),
            (TYPE_DEF, self.types.len()),
            (FIELD, field_count),
            (METHOD_DEF, method_count),
            (CUSTOM_ATTRIBUTE, self.attributes.len()),
            (PROPERTY_MAP, owners.len()),
            (PROPERTY, property_count),
        ];
        for (table, count) in counts {
            // 5 tag bits in HasCustomAttribute keep 2-byte columns below 2048 rows
            assert!(count < 2048, "table {table:#x} too large for the builder");
        }

        let mut rows = Vec::new();

        // Module
        put_u16(&mut rows, 0);
        put_u16(&mut rows, heaps.string("Synthetic.dll"));
        rows.extend_from_slice(&[0; 6]);

        for (namespace, name) in &self.typerefs {
            put_u16(&mut rows, 0);
            put_u16(&mut rows, heaps.string(name));
            put_u16(&mut rows, heaps.string(namespace));
        }

        for (owner, entry) in self.types.iter().enumerate() {
            rows.extend_from_slice(&0x0010_0001_u32.to_le_bytes());
            put_u16(&mut rows, heaps.string(&entry.name));
            put_u16(&mut rows, heaps.string(&entry.namespace));
            put_u16(&mut rows, 0);
            put_index(&mut rows, self.first_field(owner) + 1);
            put_index(&mut rows, self.first_method(owner) + 1);
        }

        for field in self.types.iter().flat_map(|t| &t.fields) {
            put_u16(&mut rows, field.flags);
            put_u16(&mut rows, heaps.string(&field.name));
            put_u16(&mut rows, heaps.blob(&field.signature));
        }

        for method in self.types.iter().flat_map(|t| &t.methods) {
            rows.extend_from_slice(&0_u32.to_le_bytes());
            put_u16(&mut rows, 0);
            put_u16(&mut rows, method.flags);
            put_u16(&mut rows, heaps.string(&method.name));
            put_u16(&mut rows, heaps.blob(&method.signature));
            put_u16(&mut rows, 1);
        }

        for attribute in &self.attributes {
            let (tag, row) = match attribute.target {
                Target::Type(owner) => (3, owner),
                Target::Field(owner, index) => (1, self.first_field(owner) + index),
                Target::Property(owner, index) => (9, self.first_property(owner) + index),
            };
            put_u16(&mut rows, (((row + 1) << 5) | tag) as u16);

            let ctor = self.first_method(attribute.attribute_type) + 1;
            put_u16(&mut rows, ((ctor << 3) | 2) as u16);
            put_u16(&mut rows, heaps.blob(&attribute.blob));
        }

        for &owner in &owners {
            put_index(&mut rows, owner + 1);
            put_index(&mut rows, self.first_property(owner) + 1);
        }

        for property in self.types.iter().flat_map(|t| &t.properties) {
            put_u16(&mut rows, property.flags);
            put_u16(&mut rows, heaps.string(&property.name));
            put_u16(&mut rows, heaps.blob(&property.signature));
        }

        let mut valid = 0_u64;
        let mut header = Vec::new();
        header.extend_from_slice(&0_u32.to_le_bytes());
        header.extend_from_slice(&[2, 0, 0, 1]);
        for (table, count) in counts {
            if count > 0 {
                valid |= 1 << table;
            }
        }
        header.extend_from_slice(&valid.to_le_bytes());
        header.extend_from_slice(&0_u64.to_le_bytes());
        for (_, count) in counts {
            if count > 0 {
                header.extend_from_slice(&(count as u32).to_le_bytes());
            }
        }

        header.extend_from_slice(&rows);
        header
    }
}

struct Heaps {
    strings: Vec<u8>,
    string_offsets: HashMap<String, u16>,
    blob: Vec<u8>,
}

impl Heaps {
    fn new() -> Self {
        Heaps {
            strings: vec![0],
            string_offsets: HashMap::from([(String::new(), 0)]),
            blob: vec![0],
        }
    }

    fn string(&mut self, value: &str) -> u16 {
        if let Some(offset) = self.string_offsets.get(value) {
            return *offset;
        }

        let offset = self.strings.len();
        assert!(offset <= 0xFFFF, "#Strings heap too large for the builder");
        self.strings.extend_from_slice(value.as_bytes());
        self.strings.push(0);
        self.string_offsets.insert(value.to_string(), offset as u16);
        offset as u16
    }

    fn blob(&mut self, value: &[u8]) -> u16 {
        let offset = self.blob.len();
        assert!(offset <= 0xFFFF, "#Blob heap too large for the builder");
        self.blob
            .extend_from_slice(&encode_compressed_uint(value.len() as u32));
        self.blob.extend_from_slice(value);
        offset as u16
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_index(out: &mut Vec<u8>, value: usize) {
    put_u16(out, value as u16);
}

fn write_root(streams: &[(&str, Vec<u8>)]) -> Vec<u8> {
    const VERSION: &[u8; 12] = b"v4.0.30319\0\0";

    let mut padded_names = Vec::new();
    for (name, _) in streams {
        let mut bytes = name.as_bytes().to_vec();
        bytes.push(0);
        while bytes.len() % 4 != 0 {
            bytes.push(0);
        }
        padded_names.push(bytes);
    }

    let header_len = 16
        + VERSION.len()
        + 4
        + padded_names.iter().map(|name| 8 + name.len()).sum::<usize>();

    let mut out = Vec::new();
    out.extend_from_slice(&0x424A_5342_u32.to_le_bytes());
    put_u16(&mut out, 1);
    put_u16(&mut out, 1);
    out.extend_from_slice(&0_u32.to_le_bytes());
    out.extend_from_slice(&(VERSION.len() as u32).to_le_bytes());
    out.extend_from_slice(VERSION);
    put_u16(&mut out, 0);
    put_u16(&mut out, streams.len() as u16);

    let mut offset = header_len;
    let mut bodies = Vec::new();
    for ((_, data), name) in streams.iter().zip(&padded_names) {
        let mut body = data.clone();
        while body.len() % 4 != 0 {
            body.push(0);
        }
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(name);
        offset += body.len();
        bodies.push(body);
    }

    for body in bodies {
        out.extend_from_slice(&body);
    }
    out
}
