#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::contract::{Backend, BodyBuilder};
use crate::golang::GoBackend;
use crate::typescript::TypeScriptBackend;
use agnostic_diagnostic::ErrorCode;
use agnostic_ir::{Decl, Field, Operator, TypeDesc, Value};
use pretty_assertions::assert_eq;

/// A counter whose method is recorded before its model.
fn record() -> Result<Program> {
    let mut program = Program::new();
    let body = program.return_method(
        "Counter",
        "Total",
        &TypeDesc::INT,
        &[Field::new("extra", TypeDesc::array(TypeDesc::INT))],
    )?;
    {
        let mut body = BodyBuilder::new(&mut program, body);
        body.declare("sum", &Value::own_field("count"))?;
        let mut each = body.for_each(&Value::id("extra"), "", "n")?;
        each.assign(
            &Value::id("sum"),
            &Value::combined(Value::id("sum"), Operator::Add, Value::id("n")),
        )?;
        drop(each);
        let (then, otherwise) = body.if_else(&Value::combined(
            Value::id("sum"),
            Operator::Gt,
            Value::Int(100),
        ))?;
        body.nested(then).return_value(&Value::Int(100))?;
        body.nested(otherwise).return_value(&Value::id("sum"))?;
    }
    program.model("Counter", &[Field::new("count", TypeDesc::INT)])?;
    Ok(program)
}

#[test]
fn test_recorded_structure() -> Result<()> {
    let program = record()?;
    assert_eq!(program.decls().len(), 2);
    assert_eq!(program.block_count(), 4);
    let Some(Decl::Method(method)) = program.decls().first() else {
        panic!("method recorded first");
    };
    assert_eq!(method.model, "Counter");
    assert_eq!(program.block(method.body).map(<[_]>::len), Some(3));
    Ok(())
}

#[test]
fn test_replay_into_typescript() -> Result<()> {
    let program = record()?;
    let mut ts = TypeScriptBackend::new();
    replay(&program, &mut ts)?;
    assert_eq!(
        ts.render()?,
        "export class Counter {\n\
         \tcount: number;\n\
         \tpublic Total(extra: number[]): number {\n\
         \t\tlet sum = this.count;\n\
         \t\tfor (const n of extra) {\n\
         \t\t\tsum = sum + n;\n\
         \t\t}\n\
         \t\tif (sum > 100) {\n\
         \t\t\treturn 100;\n\
         \t\t} else {\n\
         \t\t\treturn sum;\n\
         \t\t}\n\
         \t}\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_replay_into_go() -> Result<()> {
    let program = record()?;
    let mut go = GoBackend::new("counter");
    replay(&program, &mut go)?;
    assert_eq!(
        go.render()?,
        "package counter\n\
         \n\
         func (c *Counter) Total(extra []int) int {\n\
         \tsum := c.count\n\
         \tfor _, n := range extra {\n\
         \t\tsum = sum + n\n\
         \t}\n\
         \tif sum > 100 {\n\
         \t\treturn 100\n\
         \t} else {\n\
         \t\treturn sum\n\
         \t}\n\
         }\n\
         \n\
         type Counter struct {\n\
         \tcount int\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_replay_into_program_reproduces_it() -> Result<()> {
    let program = record()?;
    let mut copy = Program::new();
    replay(&program, &mut copy)?;
    assert_eq!(copy, program);
    Ok(())
}

#[test]
fn test_replay_through_trait_object() -> Result<()> {
    let program = record()?;
    let mut backend: Box<dyn Backend> = Box::new(TypeScriptBackend::new());
    replay(&program, backend.as_mut())?;
    assert!(backend.render()?.contains("public Total("));
    Ok(())
}

#[test]
fn test_recorder_rejects_unknown_block() {
    let mut program = Program::new();
    let err = program
        .return_value(BlockId::new(3), &Value::Null)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
    let err = program
        .if_then(BlockId::new(0), &Value::Bool(true))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
    assert_eq!(program.block_count(), 0);
}

#[test]
fn test_deep_nesting_replays() -> Result<()> {
    let mut program = Program::new();
    let mut block = program.method("Deep", "dive", &[])?;
    for _ in 0..5_000 {
        block = program.if_then(block, &Value::Bool(true))?;
    }
    program.return_value(block, &Value::Null)?;
    program.model("Deep", &[])?;

    let mut copy = Program::new();
    replay(&program, &mut copy)?;
    assert_eq!(copy.block_count(), program.block_count());
    Ok(())
}
