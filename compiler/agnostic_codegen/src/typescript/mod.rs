//! TypeScript backend.
//!
//! Models become `export class` declarations and methods become class
//! members. Because a member must sit inside its class body, methods are
//! recorded as orphans and spliced into their class at [`Backend::render`].
//!
//! ```text
//! export class Counter {
//!     count: number;
//!     public bump(by: number) {
//!         this.count = this.count + by;
//!     }
//! }
//! ```

mod resolve;

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{used_binding, BlockId, Field, TypeDesc, Value};

use crate::arena::CodeArena;
use crate::config::BackendArgs;
use crate::contract::{Backend, Builder};
use crate::emitter::{Indent, StringEmitter};
use crate::orphan::OrphanRegistry;

pub use resolve::{resolve_type, resolve_value};

pub(crate) const BACKEND: &str = "typescript";

/// Document builder for one `.ts` file.
#[derive(Default, Debug)]
pub struct TypeScriptBackend {
    arena: CodeArena,
    orphans: OrphanRegistry,
}

impl TypeScriptBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The TypeScript backend takes no arguments; any given are ignored.
    pub fn from_args(args: &BackendArgs) -> Result<Self> {
        if !args.is_empty() {
            tracing::debug!(?args, "typescript backend ignores construction arguments");
        }
        Ok(Self::new())
    }

    /// Blank line between top-level declarations.
    fn separate(&mut self) -> Result<()> {
        if !self.arena.is_empty(BlockId::ROOT)? {
            self.arena.line(BlockId::ROOT, "")?;
        }
        Ok(())
    }

    fn params(params: &[Field]) -> Result<String> {
        let params = params
            .iter()
            .map(|p| Ok(format!("{}: {}", p.name, resolve_type(&p.ty)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(params.join(", "))
    }

    /// Record a method as an orphan of `model` and return its body.
    fn defer_method(&mut self, model: &str, name: &str, header: String) -> Result<BlockId> {
        let member = self.arena.alloc(Some(model.to_owned()));
        let body = self.arena.alloc_child(member)?;
        self.arena.line(member, header)?;
        self.arena.nest(member, body)?;
        self.arena.line(member, "}")?;
        self.orphans.defer(model, name, member);
        tracing::debug!(model, method = name, "method deferred");
        Ok(body)
    }

    /// Statements are only valid inside a method body.
    fn statement(&mut self, block: BlockId, line: String) -> Result<()> {
        if self.arena.owner(block)?.is_none() {
            return Err(CodegenError::unsupported(
                BACKEND,
                format!("statement outside a method body in block {block}"),
            ));
        }
        tracing::trace!(%block, line = %line, "statement");
        self.arena.line(block, line)
    }

    /// Open `header { ... }` in `block` and return the inner block.
    fn scope(&mut self, block: BlockId, header: String, footer: &str) -> Result<BlockId> {
        self.statement(block, header)?;
        let inner = self.arena.alloc_child(block)?;
        self.arena.nest(block, inner)?;
        self.arena.line(block, footer)?;
        Ok(inner)
    }
}

impl Builder for TypeScriptBackend {
    fn model(&mut self, name: &str, fields: &[Field]) -> Result<()> {
        let lines = fields
            .iter()
            .map(|f| Ok(format!("{}: {};", f.name, resolve_type(&f.ty)?)))
            .collect::<Result<Vec<_>>>()?;

        let body = self.arena.alloc(None);
        for line in lines {
            self.arena.line(body, line)?;
        }
        self.separate()?;
        self.arena.line(BlockId::ROOT, format!("export class {name} {{"))?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, "}")?;
        self.orphans.register_model(name, body);
        tracing::debug!(model = name, fields = fields.len(), "model registered");
        Ok(())
    }

    fn enumeration(&mut self, name: &str, values: &[&str]) -> Result<()> {
        let body = self.arena.alloc(None);
        for (code, value) in values.iter().enumerate() {
            self.arena.line(body, format!("{value} = {code},"))?;
        }
        self.separate()?;
        self.arena.line(BlockId::ROOT, format!("export enum {name} {{"))?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, "}")
    }

    fn method(&mut self, model: &str, name: &str, params: &[Field]) -> Result<BlockId> {
        let header = format!("public {name}({}) {{", Self::params(params)?);
        self.defer_method(model, name, header)
    }

    fn return_method(
        &mut self,
        model: &str,
        name: &str,
        returns: &TypeDesc,
        params: &[Field],
    ) -> Result<BlockId> {
        let header = format!(
            "public {name}({}): {} {{",
            Self::params(params)?,
            resolve_type(returns)?
        );
        self.defer_method(model, name, header)
    }

    fn assign(&mut self, block: BlockId, target: &Value, source: &Value) -> Result<()> {
        let line = format!("{} = {};", resolve_value(target)?, resolve_value(source)?);
        self.statement(block, line)
    }

    fn declare(&mut self, block: BlockId, name: &str, value: &Value) -> Result<()> {
        let line = format!("let {name} = {};", resolve_value(value)?);
        self.statement(block, line)
    }

    fn append_value(&mut self, block: BlockId, array: &Value, value: &Value) -> Result<()> {
        let line = format!("{}.push({});", resolve_value(array)?, resolve_value(value)?);
        self.statement(block, line)
    }

    fn append_array(&mut self, block: BlockId, array: &Value, values: &Value) -> Result<()> {
        let line = format!("{}.push(...{});", resolve_value(array)?, resolve_value(values)?);
        self.statement(block, line)
    }

    fn remove_value(&mut self, block: BlockId, array: &Value, index: &Value) -> Result<()> {
        let line = format!("{}.splice({}, 1);", resolve_value(array)?, resolve_value(index)?);
        self.statement(block, line)
    }

    fn map_put(&mut self, block: BlockId, map: &Value, key: &Value, value: &Value) -> Result<()> {
        let line = format!(
            "{}.set({}, {});",
            resolve_value(map)?,
            resolve_value(key)?,
            resolve_value(value)?
        );
        self.statement(block, line)
    }

    fn map_delete(&mut self, block: BlockId, map: &Value, key: &Value) -> Result<()> {
        let line = format!("{}.delete({});", resolve_value(map)?, resolve_value(key)?);
        self.statement(block, line)
    }

    fn for_each(
        &mut self,
        block: BlockId,
        array: &Value,
        index_name: &str,
        value_name: &str,
    ) -> Result<BlockId> {
        let array = resolve_value(array)?;
        // The counter of the bindingless form is read by its own condition,
        // so it never counts as unused.
        let header = match (used_binding(index_name), used_binding(value_name)) {
            (None, None) => format!("for (let _i = 0; _i < {array}.length; _i++) {{"),
            (Some(i), None) => format!("for (let {i} = 0; {i} < {array}.length; {i}++) {{"),
            (None, Some(v)) => format!("for (const {v} of {array}) {{"),
            (Some(i), Some(v)) => format!("for (const [{i}, {v}] of {array}.entries()) {{"),
        };
        self.scope(block, header, "}")
    }

    fn if_then(&mut self, block: BlockId, cond: &Value) -> Result<BlockId> {
        let header = format!("if ({}) {{", resolve_value(cond)?);
        self.scope(block, header, "}")
    }

    fn if_else(&mut self, block: BlockId, cond: &Value) -> Result<(BlockId, BlockId)> {
        let header = format!("if ({}) {{", resolve_value(cond)?);
        let then_body = self.scope(block, header, "} else {")?;
        let else_body = self.arena.alloc_child(block)?;
        self.arena.nest(block, else_body)?;
        self.arena.line(block, "}")?;
        Ok((then_body, else_body))
    }

    fn return_value(&mut self, block: BlockId, value: &Value) -> Result<()> {
        let line = format!("return {};", resolve_value(value)?);
        self.statement(block, line)
    }
}

impl Backend for TypeScriptBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extension(&self) -> &'static str {
        ".ts"
    }

    #[tracing::instrument(level = "debug", skip_all, fields(orphans = self.orphans.pending()))]
    fn render(&mut self) -> Result<String> {
        self.orphans.resolve(&mut self.arena)?;
        let mut out = StringEmitter::new(Indent::Tab);
        self.arena.render(&mut out)?;
        Ok(out.output())
    }
}

#[cfg(test)]
mod tests;
