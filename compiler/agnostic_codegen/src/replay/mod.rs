//! Program replay.
//!
//! Lowers a recorded [`Program`] into any [`Builder`], declaration by
//! declaration and statement by statement, in the order they were recorded.
//! Block handles of the program are translated to the handles the target
//! returns, so the target never sees a foreign handle.

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{BlockId, Decl, Program, Stmt};

use crate::contract::Builder;
use crate::stack::ensure_sufficient_stack;

/// Replay `program` into `builder`.
#[tracing::instrument(level = "debug", skip_all, fields(decls = program.decls().len()))]
pub fn replay<B: Builder + ?Sized>(program: &Program, builder: &mut B) -> Result<()> {
    for decl in program.decls() {
        match decl {
            Decl::Model { name, fields } => builder.model(name, fields)?,
            Decl::Enum { name, values } => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                builder.enumeration(name, &values)?;
            }
            Decl::Method(method) => {
                let target = match &method.returns {
                    Some(returns) => builder.return_method(
                        &method.model,
                        &method.name,
                        returns,
                        &method.params,
                    )?,
                    None => builder.method(&method.model, &method.name, &method.params)?,
                };
                replay_block(program, method.body, builder, target)?;
            }
        }
    }
    Ok(())
}

fn replay_block<B: Builder + ?Sized>(
    program: &Program,
    source: BlockId,
    builder: &mut B,
    target: BlockId,
) -> Result<()> {
    let stmts = program
        .block(source)
        .ok_or(CodegenError::InvalidBlock { block: source })?;
    ensure_sufficient_stack(|| {
        for stmt in stmts {
            replay_stmt(program, stmt, &mut *builder, target)?;
        }
        Ok(())
    })
}

fn replay_stmt<B: Builder + ?Sized>(
    program: &Program,
    stmt: &Stmt,
    builder: &mut B,
    target: BlockId,
) -> Result<()> {
    match stmt {
        Stmt::Assign { target: lhs, source } => builder.assign(target, lhs, source),
        Stmt::Declare { name, value } => builder.declare(target, name, value),
        Stmt::AppendValue { array, value } => builder.append_value(target, array, value),
        Stmt::AppendArray { array, values } => builder.append_array(target, array, values),
        Stmt::RemoveValue { array, index } => builder.remove_value(target, array, index),
        Stmt::MapPut { map, key, value } => builder.map_put(target, map, key, value),
        Stmt::MapDelete { map, key } => builder.map_delete(target, map, key),
        Stmt::ForEach {
            array,
            index_name,
            value_name,
            body,
        } => {
            let inner = builder.for_each(target, array, index_name, value_name)?;
            replay_block(program, *body, builder, inner)
        }
        Stmt::If { cond, body } => {
            let inner = builder.if_then(target, cond)?;
            replay_block(program, *body, builder, inner)
        }
        Stmt::IfElse {
            cond,
            then_body,
            else_body,
        } => {
            let (then_target, else_target) = builder.if_else(target, cond)?;
            replay_block(program, *then_body, builder, then_target)?;
            replay_block(program, *else_body, builder, else_target)
        }
        Stmt::Return(value) => builder.return_value(target, value),
    }
}

#[cfg(test)]
mod tests;
