#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use agnostic_diagnostic::ErrorCode;
use agnostic_ir::{MapEntry, Operator};
use pretty_assertions::assert_eq;

fn counter(ts: &mut TypeScriptBackend) -> Result<()> {
    ts.model(
        "Counter",
        &[
            Field::new("count", TypeDesc::INT),
            Field::new("tags", TypeDesc::array(TypeDesc::STRING)),
        ],
    )
}

#[test]
fn test_model_and_method() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    counter(&mut ts)?;
    let body = ts.return_method(
        "Counter",
        "Add",
        &TypeDesc::INT,
        &[Field::new("by", TypeDesc::INT)],
    )?;
    ts.assign(
        body,
        &Value::own_field("count"),
        &Value::combined(Value::own_field("count"), Operator::Add, Value::id("by")),
    )?;
    ts.return_value(body, &Value::own_field("count"))?;

    assert_eq!(
        ts.render()?,
        "export class Counter {\n\
         \tcount: number;\n\
         \ttags: string[];\n\
         \tpublic Add(by: number): number {\n\
         \t\tthis.count = this.count + by;\n\
         \t\treturn this.count;\n\
         \t}\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_method_before_model_is_spliced() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    let early = ts.method("Counter", "reset", &[])?;
    ts.assign(early, &Value::own_field("count"), &Value::Int(0))?;
    counter(&mut ts)?;
    ts.method("Counter", "noop", &[])?;

    assert_eq!(
        ts.render()?,
        "export class Counter {\n\
         \tcount: number;\n\
         \ttags: string[];\n\
         \tpublic reset() {\n\
         \t\tthis.count = 0;\n\
         \t}\n\
         \tpublic noop() {\n\
         \t}\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_statements_after_splice_target_keep_nesting() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    let body = ts.method("Counter", "scan", &[])?;
    counter(&mut ts)?;
    let inner = ts.for_each(body, &Value::own_field("tags"), "", "tag")?;
    let then = ts.if_then(inner, &Value::combined(Value::id("tag"), Operator::Eq, Value::string("x")))?;
    ts.return_value(then, &Value::Bool(true))?;
    ts.return_value(body, &Value::Bool(false))?;

    assert_eq!(
        ts.render()?,
        "export class Counter {\n\
         \tcount: number;\n\
         \ttags: string[];\n\
         \tpublic scan() {\n\
         \t\tfor (const tag of this.tags) {\n\
         \t\t\tif (tag === \"x\") {\n\
         \t\t\t\treturn true;\n\
         \t\t\t}\n\
         \t\t}\n\
         \t\treturn false;\n\
         \t}\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_broken_reference_at_render() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    // Declaring the method succeeds; the missing model surfaces at render.
    let body = ts.method("Ghost", "haunt", &[])?;
    ts.return_value(body, &Value::Null)?;
    let err = ts.render().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1002);
    assert_eq!(
        err.to_string(),
        "no model with name \"Ghost\" found for method `haunt`"
    );
    Ok(())
}

#[test]
fn test_enum_codes() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    ts.enumeration("Color", &["Red", "Green", "Blue"])?;
    counter(&mut ts)?;
    assert_eq!(
        ts.render()?,
        "export enum Color {\n\
         \tRed = 0,\n\
         \tGreen = 1,\n\
         \tBlue = 2,\n\
         }\n\
         \n\
         export class Counter {\n\
         \tcount: number;\n\
         \ttags: string[];\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_for_each_binding_forms() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    counter(&mut ts)?;
    let body = ts.method("Counter", "loops", &[])?;
    let tags = Value::own_field("tags");
    ts.for_each(body, &tags, "", "")?;
    ts.for_each(body, &tags, "i", "")?;
    ts.for_each(body, &tags, "i", "t")?;

    let text = ts.render()?;
    assert!(text.contains("for (let _i = 0; _i < this.tags.length; _i++) {"));
    assert!(text.contains("for (let i = 0; i < this.tags.length; i++) {"));
    assert!(text.contains("for (const [i, t] of this.tags.entries()) {"));
    Ok(())
}

#[test]
fn test_collection_statements() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    counter(&mut ts)?;
    let body = ts.method("Counter", "edit", &[])?;
    let tags = Value::own_field("tags");
    ts.append_value(body, &tags, &Value::string("a"))?;
    ts.append_array(
        body,
        &tags,
        &Value::array(TypeDesc::STRING, vec![Value::string("b"), Value::string("c")]),
    )?;
    ts.remove_value(body, &tags, &Value::Int(1))?;
    ts.declare(
        body,
        "m",
        &Value::map(
            TypeDesc::STRING,
            TypeDesc::INT,
            vec![
                MapEntry::new(Value::string("z"), Value::Int(1)),
                MapEntry::new(Value::string("a"), Value::Int(2)),
            ],
        ),
    )?;
    ts.map_put(body, &Value::id("m"), &Value::string("k"), &Value::Int(3))?;
    ts.map_delete(body, &Value::id("m"), &Value::string("z"))?;

    assert_eq!(
        ts.render()?,
        "export class Counter {\n\
         \tcount: number;\n\
         \ttags: string[];\n\
         \tpublic edit() {\n\
         \t\tthis.tags.push(\"a\");\n\
         \t\tthis.tags.push(...[\"b\", \"c\"]);\n\
         \t\tthis.tags.splice(1, 1);\n\
         \t\tlet m = new Map<string, number>([[\"z\", 1], [\"a\", 2]]);\n\
         \t\tm.set(\"k\", 3);\n\
         \t\tm.delete(\"z\");\n\
         \t}\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_if_else() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    counter(&mut ts)?;
    let body = ts.return_method("Counter", "sign", &TypeDesc::STRING, &[])?;
    let cond = Value::combined(Value::own_field("count"), Operator::Lt, Value::Int(0));
    let (then, otherwise) = ts.if_else(body, &cond)?;
    ts.return_value(then, &Value::string("-"))?;
    ts.return_value(otherwise, &Value::int_to_string(Value::own_field("count")))?;

    let text = ts.render()?;
    assert!(text.contains(
        "\t\tif (this.count < 0) {\n\
         \t\t\treturn \"-\";\n\
         \t\t} else {\n\
         \t\t\treturn String(this.count);\n\
         \t\t}\n"
    ));
    Ok(())
}

#[test]
fn test_render_twice_is_stable() -> Result<()> {
    let mut ts = TypeScriptBackend::new();
    ts.method("Counter", "noop", &[])?;
    counter(&mut ts)?;
    let first = ts.render()?;
    assert_eq!(ts.render()?, first);
    Ok(())
}

#[test]
fn test_pointer_type_is_unsupported() {
    let mut ts = TypeScriptBackend::new();
    let err = ts
        .model("Node", &[Field::new("next", TypeDesc::pointer(TypeDesc::model("Node")))])
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(err.to_string(), "typescript: unsupported pointer type `*Node`");
}

#[test]
fn test_statement_outside_method() {
    let mut ts = TypeScriptBackend::new();
    let err = ts
        .return_value(BlockId::ROOT, &Value::Null)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn test_invalid_block_handle() {
    let mut ts = TypeScriptBackend::new();
    let err = ts
        .return_value(BlockId::new(99), &Value::Null)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
}

#[test]
fn test_values() -> Result<()> {
    let nested = Value::combined(
        Value::combined(Value::Int(1), Operator::Add, Value::Int(2)),
        Operator::Mul,
        Value::Int(3),
    );
    assert_eq!(resolve_value(&nested)?, "(1 + 2) * 3");
    assert_eq!(resolve_value(&Value::float(f64::NAN))?, "NaN");
    assert_eq!(resolve_value(&Value::float(f64::NEG_INFINITY))?, "-Infinity");
    assert_eq!(resolve_value(&Value::float(0.5))?, "0.5");
    assert_eq!(
        resolve_value(&Value::map_element(Value::own_field("m"), Value::string("k")))?,
        "this.m.get(\"k\")"
    );
    assert_eq!(
        resolve_value(&Value::array_element(Value::id("xs"), Value::Int(0)))?,
        "xs[0]"
    );
    assert_eq!(resolve_value(&Value::model_field("other", "count"))?, "other.count");
    assert_eq!(
        resolve_value(&Value::array(TypeDesc::INT, Vec::new()))?,
        "[]"
    );
    assert_eq!(
        resolve_type(&TypeDesc::map(TypeDesc::STRING, TypeDesc::array(TypeDesc::FLOAT64)))?,
        "Map<string, number[]>"
    );
    Ok(())
}
