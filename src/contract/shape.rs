//! Compile-time shape descriptors for record types and their fields.

use std::{
    any::TypeId,
    collections::{BTreeMap, HashMap},
    fmt,
};

/// Structural kind of a field type, as seen by the schema builder.
#[derive(Debug, Clone)]
pub enum Shape {
    /// UTF-8 text.
    Text,
    /// 8-bit signed integer.
    Int8,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit signed integer.
    Int16,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit unsigned integer.
    Uint32,
    /// Platform-width signed integer (`isize`).
    Int,
    /// Platform-width unsigned integer (`usize`).
    Uint,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit unsigned integer.
    Uint64,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
    /// Boolean.
    Bool,
    /// Nested record registered as its own definition.
    Record(RecordDescriptor),
    /// Opaque value with no declared structure.
    Any,
    /// Optional value or owned indirection, unwrapped one level.
    Optional(Box<Shape>),
    /// Homogeneous collection.
    Sequence(Box<Shape>),
    /// Key/value mapping.
    Map(Box<Shape>, Box<Shape>),
    /// Kind the generator has no mapping for, named for diagnostics.
    Unsupported(&'static str),
}

impl Shape {
    /// Shape of a nested record type.
    pub fn record<T: Record>() -> Self {
        Shape::Record(RecordDescriptor::of::<T>())
    }

    /// Short kind name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Text => "text",
            Shape::Int8 => "int8",
            Shape::Uint8 => "uint8",
            Shape::Int16 => "int16",
            Shape::Uint16 => "uint16",
            Shape::Int32 => "int32",
            Shape::Uint32 => "uint32",
            Shape::Int => "int",
            Shape::Uint => "uint",
            Shape::Int64 => "int64",
            Shape::Uint64 => "uint64",
            Shape::Float32 => "float32",
            Shape::Float64 => "float64",
            Shape::Bool => "bool",
            Shape::Record(_) => "record",
            Shape::Any => "any",
            Shape::Optional(_) => "optional",
            Shape::Sequence(_) => "sequence",
            Shape::Map(_, _) => "map",
            Shape::Unsupported(kind) => *kind,
        }
    }
}

/// Types that can report their [`Shape`] without a value at hand.
pub trait Describe {
    /// Structural shape of the implementing type.
    fn shape() -> Shape;
}

/// Record types whose fields become schema properties.
///
/// Implementors usually pair this with [`describe_record!`](crate::describe_record) so the
/// record can also appear as a field of another record.
pub trait Record: 'static {
    /// Name the record is registered under in `#/definitions`.
    fn type_name() -> &'static str;

    /// Fields in declaration order.
    fn fields() -> Vec<FieldDescriptor>;
}

/// Type handle for a record: identity, display name and a lazy field list.
///
/// Fields are produced on demand so self-referential records can be described.
#[derive(Clone, Copy)]
pub struct RecordDescriptor {
    id: TypeId,
    name: &'static str,
    fields: fn() -> Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Build the handle for `T`.
    pub fn of<T: Record>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
            fields: T::fields,
        }
    }

    /// Identity of the underlying Rust type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Registered type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Materialize the field list.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        (self.fields)()
    }
}

impl fmt::Debug for RecordDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RecordDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordDescriptor {}

/// One field of a record: identifier, structural tags and shape.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    ident: &'static str,
    tags: Vec<(&'static str, &'static str)>,
    shape: Shape,
}

impl FieldDescriptor {
    /// Describe a field named `ident` of type `T`, with no tags yet.
    pub fn of<T: Describe + ?Sized>(ident: &'static str) -> Self {
        Self {
            ident,
            tags: Vec::new(),
            shape: T::shape(),
        }
    }

    /// Describe a field with an explicit shape.
    pub fn with_shape(ident: &'static str, shape: Shape) -> Self {
        Self {
            ident,
            tags: Vec::new(),
            shape,
        }
    }

    /// Attach a structural tag such as `("json", "name,omitempty")`.
    pub fn tag(mut self, namespace: &'static str, value: &'static str) -> Self {
        self.tags.push((namespace, value));
        self
    }

    /// Field identifier in the Rust type.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Field shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Raw tag value for `namespace`, modifiers included.
    pub fn tag_value(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map(|(_, value)| *value)
    }

    /// Exposed name under `namespace`: the leading tag component, trimmed.
    ///
    /// Returns `None` when the tag is missing or its name component is empty.
    pub fn exposed_name(&self, namespace: &str) -> Option<&'static str> {
        let raw = self.tag_value(namespace)?;
        let name = raw.split(',').next().unwrap_or_default().trim();
        (!name.is_empty()).then_some(name)
    }
}

/// Implement [`Describe`] for one or more [`Record`] types.
#[macro_export]
macro_rules! describe_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::contract::Describe for $ty {
                fn shape() -> $crate::contract::Shape {
                    $crate::contract::Shape::record::<$ty>()
                }
            }
        )+
    };
}

macro_rules! describe_scalar {
    ($($ty:ty => $shape:expr),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    $shape
                }
            }
        )+
    };
}

describe_scalar! {
    String => Shape::Text,
    str => Shape::Text,
    char => Shape::Text,
    i8 => Shape::Int8,
    u8 => Shape::Uint8,
    i16 => Shape::Int16,
    u16 => Shape::Uint16,
    i32 => Shape::Int32,
    u32 => Shape::Uint32,
    isize => Shape::Int,
    usize => Shape::Uint,
    i64 => Shape::Int64,
    u64 => Shape::Uint64,
    i128 => Shape::Unsupported("int128"),
    u128 => Shape::Unsupported("uint128"),
    f32 => Shape::Float32,
    f64 => Shape::Float64,
    bool => Shape::Bool,
    serde_json::Value => Shape::Any,
}

impl<T: Describe + ?Sized> Describe for &'static T {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }
}

impl<T: Describe> Describe for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

impl<T: Describe> Describe for [T] {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
}
