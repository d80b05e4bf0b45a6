//! Type and value lowering for Go.
//!
//! Go keeps every numeric width. Receiver fields resolve against the receiver
//! variable of the enclosing method, so value lowering takes the receiver name
//! and records the packages the emitted text refers to.

use std::collections::BTreeSet;

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{Primitive, TypeDesc, Value};

use super::BACKEND;
use crate::literal::{finite_float, quote};
use crate::stack::ensure_sufficient_stack;

/// Packages referenced by lowered text, kept sorted for the import block.
pub type Imports = BTreeSet<&'static str>;

pub fn resolve_type(ty: &TypeDesc) -> Result<String> {
    ensure_sufficient_stack(|| match ty {
        TypeDesc::Primitive(p) => Ok(resolve_primitive(*p).to_string()),
        TypeDesc::Model(name) => Ok(name.clone()),
        TypeDesc::Array(element) => Ok(format!("[]{}", resolve_type(element)?)),
        TypeDesc::Map { key, value } => Ok(format!(
            "map[{}]{}",
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
        Primitive::Bool => "bool",
        Primitive::Int => "int",
        Primitive::Int32 => "int32",
        Primitive::Int64 => "int64",
        Primitive::Float32 => "float32",
        Primitive::Float64 => "float64",
        Primitive::String => "string",
    }
}

/// Receiver variable of a method on `model`: its first letter, lowercased.
pub fn receiver_name(model: &str) -> String {
    model
        .chars()
        .next()
        .map_or_else(|| "m".to_string(), |c| c.to_lowercase().collect())
}

/// Lower `value`. `receiver` is `None` outside a method body, where
/// `OwnField` has nothing to resolve against.
pub fn resolve_value(value: &Value, receiver: Option<&str>, imports: &mut Imports) -> Result<String> {
    ensure_sufficient_stack(|| match value {
        Value::Null => Ok("nil".to_string()),
        Value::String(text) => Ok(quote(text)),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(bits) => {
            let f = f64::from_bits(*bits);
            Ok(match finite_float(f) {
                Some(text) => float_literal(text),
                None => {
                    imports.insert("math");
                    if f.is_nan() {
                        "math.NaN()".to_string()
                    } else if f.is_sign_positive() {
                        "math.Inf(1)".to_string()
                    } else {
                        "math.Inf(-1)".to_string()
                    }
                }
            })
        }
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array {
            element_type,
            elements,
        } => {
            let ty = resolve_type(&TypeDesc::array(element_type.clone()))?;
            let elements = elements
                .iter()
                .map(|e| resolve_value(e, receiver, imports))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("{ty}{{{}}}", elements.join(", ")))
        }
        Value::Map {
            key_type,
            value_type,
            entries,
        } => {
            let ty = resolve_type(&TypeDesc::map(key_type.clone(), value_type.clone()))?;
            let entries = entries
                .iter()
                .map(|entry| {
                    Ok(format!(
                        "{}: {}",
                        resolve_value(&entry.key, receiver, imports)?,
                        resolve_value(&entry.value, receiver, imports)?
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("{ty}{{{}}}", entries.join(", ")))
        }
        Value::Id(name) => Ok(name.clone()),
        Value::OwnField(field) => {
            let Some(receiver) = receiver else {
                return Err(CodegenError::unsupported(
                    BACKEND,
                    "receiver field outside a method body",
                ));
            };
            Ok(format!("{receiver}.{}", resolve_value(field, Some(receiver), imports)?))
        }
        Value::ModelField { model, field } => Ok(format!(
            "{model}.{}",
            resolve_value(field, receiver, imports)?
        )),
        Value::ArrayElement { array, index } => Ok(format!(
            "{}[{}]",
            resolve_value(array, receiver, imports)?,
            resolve_value(index, receiver, imports)?
        )),
        Value::MapElement { map, key } => Ok(format!(
            "{}[{}]",
            resolve_value(map, receiver, imports)?,
            resolve_value(key, receiver, imports)?
        )),
        Value::Combined { left, op, right } => Ok(format!(
            "{} {} {}",
            resolve_operand(left, receiver, imports)?,
            op.as_symbol(),
            resolve_operand(right, receiver, imports)?
        )),
        Value::IntToString(inner) => {
            imports.insert("strconv");
            Ok(format!(
                "strconv.FormatInt(int64({}), 10)",
                resolve_value(inner, receiver, imports)?
            ))
        }
    })
}

/// Go infers `int` for `3`, so integral floats keep a fractional part.
fn float_literal(mut text: String) -> String {
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Like [`resolve_value`], but parenthesises operations.
pub(crate) fn resolve_operand(
    value: &Value,
    receiver: Option<&str>,
    imports: &mut Imports,
) -> Result<String> {
    let text = resolve_value(value, receiver, imports)?;
    Ok(match value {
        Value::Combined { .. } => format!("({text})"),
        _ => text,
    })
}
