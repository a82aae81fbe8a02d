use std::fmt;

use crate::error::TypeError;

/// A schema declaration, as far as the binary decoding layer needs one.
///
/// The variant set is closed: every kind of value the format can carry has
/// exactly one variant here, and code that cares about a particular kind
/// matches on it rather than probing.
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────┐
/// │ Kind    │ Encoding                                     │
/// ├─────────┼──────────────────────────────────────────────┤
/// │ null    │ zero bytes                                   │
/// │ boolean │ one byte, 0 or 1                             │
/// │ int     │ zig-zag varint, fits in 32 bits              │
/// │ long    │ zig-zag varint, 64 bits                      │
/// │ float   │ 4 bytes, little-endian IEEE-754              │
/// │ double  │ 8 bytes, little-endian IEEE-754              │
/// │ bytes   │ long length prefix + raw bytes               │
/// │ string  │ long length prefix + UTF-8 bytes             │
/// │ fixed   │ exactly `size` raw bytes, no prefix          │
/// │ record  │ fields in declaration order                  │
/// │ enum    │ int symbol index                             │
/// │ array   │ blocks of items                              │
/// │ map     │ blocks of string keys + values               │
/// │ union   │ long branch index + branch value             │
/// └─────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Record(RecordSchema),
    Enum(EnumSchema),
    Array(Box<Schema>),
    Map(Box<Schema>),
    Union(Vec<Schema>),
    Fixed(FixedSchema),
}

impl Schema {
    /// Shorthand for a `fixed` schema with the given full name and size.
    pub fn fixed(name: impl Into<Name>, size: usize) -> Self {
        Self::Fixed(FixedSchema::new(name, size))
    }

    /// The kind tag of this schema.
    #[must_use]
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Null => SchemaKind::Null,
            Self::Boolean => SchemaKind::Boolean,
            Self::Int => SchemaKind::Int,
            Self::Long => SchemaKind::Long,
            Self::Float => SchemaKind::Float,
            Self::Double => SchemaKind::Double,
            Self::Bytes => SchemaKind::Bytes,
            Self::String => SchemaKind::String,
            Self::Record(_) => SchemaKind::Record,
            Self::Enum(_) => SchemaKind::Enum,
            Self::Array(_) => SchemaKind::Array,
            Self::Map(_) => SchemaKind::Map,
            Self::Union(_) => SchemaKind::Union,
            Self::Fixed(_) => SchemaKind::Fixed,
        }
    }

    /// The name of a named schema (record, enum, fixed).
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Record(record) => Some(&record.name),
            Self::Enum(enumeration) => Some(&enumeration.name),
            Self::Fixed(fixed) => Some(&fixed.name),
            _ => None,
        }
    }

    /// The declared size of a `fixed` schema.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Fixed(fixed) => Some(fixed.size),
            _ => None,
        }
    }
}

/// Kind tag of a [`Schema`], without the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Record,
    Enum,
    Array,
    Map,
    Union,
    Fixed,
}

impl SchemaKind {
    /// The lowercase type name used in schema declarations.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Record => "record",
            Self::Enum => "enum",
            Self::Array => "array",
            Self::Map => "map",
            Self::Union => "union",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A possibly namespaced schema name.
///
/// Built from a dotted full name: everything before the last `.` is the
/// namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Name {
    pub name: String,
    pub namespace: Option<String>,
}

impl Name {
    /// The dotted full name, `namespace.name` or just `name`.
    #[must_use]
    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl From<&str> for Name {
    fn from(fullname: &str) -> Self {
        match fullname.rsplit_once('.') {
            Some((namespace, name)) if !namespace.is_empty() => Self {
                name: name.to_owned(),
                namespace: Some(namespace.to_owned()),
            },
            _ => Self {
                name: fullname.trim_start_matches('.').to_owned(),
                namespace: None,
            },
        }
    }
}

impl From<String> for Name {
    fn from(fullname: String) -> Self {
        Self::from(fullname.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{namespace}.")?;
        }
        f.write_str(&self.name)
    }
}

/// A `fixed` declaration: a named byte sequence of exactly `size` bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedSchema {
    pub name: Name,
    pub size: usize,
}

impl FixedSchema {
    pub fn new(name: impl Into<Name>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl TryFrom<Schema> for FixedSchema {
    type Error = TypeError;

    fn try_from(schema: Schema) -> Result<Self, Self::Error> {
        match schema {
            Schema::Fixed(fixed) => Ok(fixed),
            other => Err(TypeError::SchemaKindMismatch {
                found: other.kind(),
            }),
        }
    }
}

impl From<FixedSchema> for Schema {
    fn from(fixed: FixedSchema) -> Self {
        Self::Fixed(fixed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordSchema {
    pub name: Name,
    pub fields: Vec<RecordField>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordField {
    pub name: String,
    pub schema: Schema,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumSchema {
    pub name: Name,
    pub symbols: Vec<String>,
}
