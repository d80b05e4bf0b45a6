//! Value Expressions
//!
//! A closed tree of expression nodes. Every node exposes its variant tag and
//! whether it needs an enclosing method (a receiver or local bindings) to be
//! evaluated, through the [`ValueNode`] trait.
//!
//! Floats are stored as `u64` bits so that values keep `Eq` and `Hash`.

use crate::{Operator, TypeDesc};

/// Variant tag of a [`Value`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueKind {
    Null,
    String,
    Int,
    Float,
    Bool,
    Array,
    Map,
    Id,
    OwnField,
    ModelField,
    ArrayElement,
    MapElement,
    Combined,
    IntToString,
}

impl ValueKind {
    /// Kinds that refer to a binding instead of carrying data.
    ///
    /// Any value containing one of these is method-dependent.
    pub const fn is_reference(self) -> bool {
        matches!(
            self,
            Self::Id | Self::OwnField | Self::ModelField | Self::ArrayElement | Self::MapElement
        )
    }
}

/// Capability every value node provides.
pub trait ValueNode {
    /// The variant tag.
    fn kind(&self) -> ValueKind;

    /// True if the node or any descendant refers to a binding, which makes it
    /// usable only inside a method body.
    fn is_method_dependent(&self) -> bool;
}

/// One `key => value` pair of a map literal.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

impl MapEntry {
    pub fn new(key: Value, value: Value) -> Self {
        MapEntry { key, value }
    }
}

/// A value expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Null,
    String(String),
    Int(i64),
    /// IEEE 754 bits; build with [`Value::float`].
    Float(u64),
    Bool(bool),
    /// Array literal. Elements lower in this order.
    Array {
        element_type: TypeDesc,
        elements: Vec<Value>,
    },
    /// Map literal. Entries lower in insertion order; key uniqueness is the
    /// caller's responsibility.
    Map {
        key_type: TypeDesc,
        value_type: TypeDesc,
        entries: Vec<MapEntry>,
    },
    /// A local variable or parameter.
    Id(String),
    /// A member of the implicit receiver.
    OwnField(Box<Value>),
    /// A member of a named external value.
    ModelField { model: String, field: Box<Value> },
    ArrayElement { array: Box<Value>, index: Box<Value> },
    MapElement { map: Box<Value>, key: Box<Value> },
    Combined {
        left: Box<Value>,
        op: Operator,
        right: Box<Value>,
    },
    /// Base-10 text of an integer value.
    IntToString(Box<Value>),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn float(value: f64) -> Self {
        Value::Float(value.to_bits())
    }

    pub fn array(element_type: TypeDesc, elements: Vec<Value>) -> Self {
        Value::Array {
            element_type,
            elements,
        }
    }

    pub fn map(key_type: TypeDesc, value_type: TypeDesc, entries: Vec<MapEntry>) -> Self {
        Value::Map {
            key_type,
            value_type,
            entries,
        }
    }

    pub fn id(name: impl Into<String>) -> Self {
        Value::Id(name.into())
    }

    /// `field` of the receiver, e.g. `own_field("count")` for `this.count`.
    pub fn own_field(field: impl Into<String>) -> Self {
        Value::OwnField(Box::new(Value::Id(field.into())))
    }

    pub fn model_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        Value::ModelField {
            model: model.into(),
            field: Box::new(Value::Id(field.into())),
        }
    }

    pub fn array_element(array: Value, index: Value) -> Self {
        Value::ArrayElement {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    pub fn map_element(map: Value, key: Value) -> Self {
        Value::MapElement {
            map: Box::new(map),
            key: Box::new(key),
        }
    }

    pub fn combined(left: Value, op: Operator, right: Value) -> Self {
        Value::Combined {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn int_to_string(int_value: Value) -> Self {
        Value::IntToString(Box::new(int_value))
    }

    /// Direct children, in lowering order.
    pub fn children(&self) -> Vec<&Value> {
        let mut children = Vec::new();
        self.push_children(&mut children);
        children
    }

    fn push_children<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Value::Null
            | Value::String(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Bool(_)
            | Value::Id(_) => {}
            Value::Array { elements, .. } => out.extend(elements),
            Value::Map { entries, .. } => {
                out.extend(entries.iter().flat_map(|entry| [&entry.key, &entry.value]));
            }
            Value::OwnField(field) | Value::ModelField { field, .. } => out.push(&**field),
            Value::ArrayElement { array, index } => out.extend([&**array, &**index]),
            Value::MapElement { map, key } => out.extend([&**map, &**key]),
            Value::Combined { left, right, .. } => out.extend([&**left, &**right]),
            Value::IntToString(inner) => out.push(&**inner),
        }
    }
}

impl ValueNode for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Array { .. } => ValueKind::Array,
            Value::Map { .. } => ValueKind::Map,
            Value::Id(_) => ValueKind::Id,
            Value::OwnField(_) => ValueKind::OwnField,
            Value::ModelField { .. } => ValueKind::ModelField,
            Value::ArrayElement { .. } => ValueKind::ArrayElement,
            Value::MapElement { .. } => ValueKind::MapElement,
            Value::Combined { .. } => ValueKind::Combined,
            Value::IntToString(_) => ValueKind::IntToString,
        }
    }

    /// Walks an explicit worklist, without recursion.
    fn is_method_dependent(&self) -> bool {
        let mut pending = vec![self];
        while let Some(value) = pending.pop() {
            if value.kind().is_reference() {
                return true;
            }
            value.push_children(&mut pending);
        }
        false
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}
