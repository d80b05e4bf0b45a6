//! Type Descriptors
//!
//! The closed set of type tags a generated program can mention. Backends map
//! each tag to their own syntax; width information is kept even when a
//! backend collapses every numeric kind into one representation.

use std::fmt;

/// Primitive kinds.
///
/// `Int` is the target's native integer; the sized kinds must keep their
/// width in targets that distinguish them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Primitive {
    Bool,
    Int,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
}

impl Primitive {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }
}

/// A type descriptor.
///
/// Immutable and compared by value. `Pointer` is part of the grammar but no
/// backend lowers it; emitting one is an unsupported-construct error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDesc {
    Primitive(Primitive),
    /// A model declared elsewhere in the program, referenced by name.
    Model(String),
    Array(Box<TypeDesc>),
    Map {
        key: Box<TypeDesc>,
        value: Box<TypeDesc>,
    },
    Pointer(Box<TypeDesc>),
}

impl TypeDesc {
    pub const BOOL: TypeDesc = TypeDesc::Primitive(Primitive::Bool);
    pub const INT: TypeDesc = TypeDesc::Primitive(Primitive::Int);
    pub const INT32: TypeDesc = TypeDesc::Primitive(Primitive::Int32);
    pub const INT64: TypeDesc = TypeDesc::Primitive(Primitive::Int64);
    pub const FLOAT32: TypeDesc = TypeDesc::Primitive(Primitive::Float32);
    pub const FLOAT64: TypeDesc = TypeDesc::Primitive(Primitive::Float64);
    pub const STRING: TypeDesc = TypeDesc::Primitive(Primitive::String);

    pub fn model(name: impl Into<String>) -> Self {
        TypeDesc::Model(name.into())
    }

    pub fn array(element: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(element))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn pointer(pointee: TypeDesc) -> Self {
        TypeDesc::Pointer(Box::new(pointee))
    }
}

/// Backend-neutral rendering, used in diagnostics only.
impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Primitive(p) => f.write_str(p.name()),
            TypeDesc::Model(name) => f.write_str(name),
            TypeDesc::Array(element) => write!(f, "[{element}]"),
            TypeDesc::Map { key, value } => write!(f, "{{{key}: {value}}}"),
            TypeDesc::Pointer(pointee) => write!(f, "*{pointee}"),
        }
    }
}
