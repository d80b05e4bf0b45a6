//! Type and value lowering for TypeScript.
//!
//! Every numeric kind collapses to `number`. Values resolve against `this`
//! for receiver fields; the resolver needs no other context.

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{Operator, Primitive, TypeDesc, Value};

use super::BACKEND;
use crate::literal::{finite_float, quote};
use crate::stack::ensure_sufficient_stack;

pub fn resolve_type(ty: &TypeDesc) -> Result<String> {
    ensure_sufficient_stack(|| match ty {
        TypeDesc::Primitive(p) => Ok(resolve_primitive(*p).to_string()),
        TypeDesc::Model(name) => Ok(name.clone()),
        TypeDesc::Array(element) => Ok(format!("{}[]", resolve_type(element)?)),
        TypeDesc::Map { key, value } => Ok(format!(
            "Map<{}, {}>",
            resolve_type(key)?,
            resolve_type(value)?
        )),
        TypeDesc::Pointer(_) => Err(CodegenError::unsupported(
            BACKEND,
            format!("pointer type `{ty}`"),
        )),
    })
}

fn resolve_primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::Bool => "boolean",
        Primitive::Int
        | Primitive::Int32
        | Primitive::Int64
        | Primitive::Float32
        | Primitive::Float64 => "number",
        Primitive::String => "string",
    }
}

fn operator(op: Operator) -> &'static str {
    match op {
        Operator::Eq => "===",
        Operator::NotEq => "!==",
        other => other.as_symbol(),
    }
}

pub fn resolve_value(value: &Value) -> Result<String> {
    ensure_sufficient_stack(|| match value {
        Value::Null => Ok("null".to_string()),
        Value::String(text) => Ok(quote(text)),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(bits) => {
            let f = f64::from_bits(*bits);
            Ok(finite_float(f).unwrap_or_else(|| {
                if f.is_nan() {
                    "NaN".to_string()
                } else if f.is_sign_positive() {
                    "Infinity".to_string()
                } else {
                    "-Infinity".to_string()
                }
            }))
        }
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array { elements, .. } => {
            let elements = resolve_all(elements)?;
            Ok(format!("[{}]", elements.join(", ")))
        }
        Value::Map {
            key_type,
            value_type,
            entries,
        } => {
            let map_type = resolve_type(&TypeDesc::map(key_type.clone(), value_type.clone()))?;
            let entries = entries
                .iter()
                .map(|entry| {
                    Ok(format!(
                        "[{}, {}]",
                        resolve_value(&entry.key)?,
                        resolve_value(&entry.value)?
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("new {map_type}([{}])", entries.join(", ")))
        }
        Value::Id(name) => Ok(name.clone()),
        Value::OwnField(field) => Ok(format!("this.{}", resolve_value(field)?)),
        Value::ModelField { model, field } => Ok(format!("{model}.{}", resolve_value(field)?)),
        Value::ArrayElement { array, index } => Ok(format!(
            "{}[{}]",
            resolve_value(array)?,
            resolve_value(index)?
        )),
        Value::MapElement { map, key } => Ok(format!(
            "{}.get({})",
            resolve_value(map)?,
            resolve_value(key)?
        )),
        Value::Combined { left, op, right } => Ok(format!(
            "{} {} {}",
            resolve_operand(left)?,
            operator(*op),
            resolve_operand(right)?
        )),
        Value::IntToString(inner) => Ok(format!("String({})", resolve_value(inner)?)),
    })
}

/// Operands that are themselves operations are parenthesised.
fn resolve_operand(value: &Value) -> Result<String> {
    let text = resolve_value(value)?;
    Ok(match value {
        Value::Combined { .. } => format!("({text})"),
        _ => text,
    })
}

pub(crate) fn resolve_all(values: &[Value]) -> Result<Vec<String>> {
    values.iter().map(resolve_value).collect()
}
