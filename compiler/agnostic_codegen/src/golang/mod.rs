//! Go backend.
//!
//! Models become structs and methods become top-level functions with a
//! pointer receiver, so every declaration is placed where it is made and no
//! orphan splicing is needed. Methods of undeclared models are still rejected
//! when the file is rendered.
//!
//! ```text
//! package counter
//!
//! type Counter struct {
//!     count int
//! }
//!
//! func (c *Counter) Bump(by int) {
//!     c.count = c.count + by
//! }
//! ```

mod resolve;

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{used_binding, BlockId, Field, TypeDesc, Value};
use rustc_hash::FxHashSet;

use crate::arena::CodeArena;
use crate::config::BackendArgs;
use crate::contract::{Backend, Builder};
use crate::emitter::{Emitter, Indent, StringEmitter};

pub use resolve::{receiver_name, resolve_type, resolve_value, Imports};

pub(crate) const BACKEND: &str = "go";

/// Document builder for one `.go` file.
#[derive(Debug)]
pub struct GoBackend {
    package: String,
    arena: CodeArena,
    imports: Imports,
    models: FxHashSet<String>,
    methods: Vec<(String, String)>,
}

impl GoBackend {
    pub fn new(package: impl Into<String>) -> Self {
        GoBackend {
            package: package.into(),
            arena: CodeArena::new(),
            imports: Imports::new(),
            models: FxHashSet::default(),
            methods: Vec::new(),
        }
    }

    /// Requires `package`.
    pub fn from_args(args: &BackendArgs) -> Result<Self> {
        Ok(Self::new(args.require(BACKEND, "package")?))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    fn separate(&mut self) -> Result<()> {
        if !self.arena.is_empty(BlockId::ROOT)? {
            self.arena.line(BlockId::ROOT, "")?;
        }
        Ok(())
    }

    fn params(params: &[Field]) -> Result<String> {
        let params = params
            .iter()
            .map(|p| Ok(format!("{} {}", p.name, resolve_type(&p.ty)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(params.join(", "))
    }

    fn function(
        &mut self,
        model: &str,
        name: &str,
        params: &[Field],
        signature: String,
    ) -> Result<BlockId> {
        let receiver = receiver_name(model);
        for param in params {
            Self::check_binding(&receiver, &param.name)?;
        }
        let body = self.arena.alloc(Some(model.to_owned()));
        self.separate()?;
        self.arena
            .line(BlockId::ROOT, format!("func ({receiver} *{model}) {name}{signature} {{"))?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, "}")?;
        self.methods.push((model.to_owned(), name.to_owned()));
        tracing::debug!(model, method = name, "method declared");
        Ok(body)
    }

    /// Receiver of the method `block` belongs to.
    fn receiver(&self, block: BlockId) -> Result<String> {
        match self.arena.owner(block)? {
            Some(model) => Ok(receiver_name(model)),
            None => Err(CodegenError::unsupported(
                BACKEND,
                format!("statement outside a method body in block {block}"),
            )),
        }
    }

    /// A parameter or local named like the receiver would hide it.
    fn check_binding(receiver: &str, name: &str) -> Result<()> {
        if name == receiver {
            return Err(CodegenError::unsupported(
                BACKEND,
                format!("binding `{name}` shadowing the method receiver"),
            ));
        }
        Ok(())
    }

    fn value(&mut self, value: &Value, receiver: &str) -> Result<String> {
        resolve_value(value, Some(receiver), &mut self.imports)
    }

    fn statement(&mut self, block: BlockId, line: String) -> Result<()> {
        tracing::trace!(%block, line = %line, "statement");
        self.arena.line(block, line)
    }

    fn scope(&mut self, block: BlockId, header: String, footer: &str) -> Result<BlockId> {
        self.statement(block, header)?;
        let inner = self.arena.alloc_child(block)?;
        self.arena.nest(block, inner)?;
        self.arena.line(block, footer)?;
        Ok(inner)
    }
}

impl Builder for GoBackend {
    fn model(&mut self, name: &str, fields: &[Field]) -> Result<()> {
        let lines = fields
            .iter()
            .map(|f| Ok(format!("{} {}", f.name, resolve_type(&f.ty)?)))
            .collect::<Result<Vec<_>>>()?;

        let body = self.arena.alloc(None);
        for line in lines {
            self.arena.line(body, line)?;
        }
        self.separate()?;
        self.arena.line(BlockId::ROOT, format!("type {name} struct {{"))?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, "}")?;
        self.models.insert(name.to_owned());
        tracing::debug!(model = name, fields = fields.len(), "model declared");
        Ok(())
    }

    fn enumeration(&mut self, name: &str, values: &[&str]) -> Result<()> {
        self.separate()?;
        self.arena.line(BlockId::ROOT, format!("type {name} int"))?;
        if values.is_empty() {
            return Ok(());
        }
        let body = self.arena.alloc(None);
        for (i, value) in values.iter().enumerate() {
            let line = if i == 0 {
                format!("{name}_{value} {name} = iota")
            } else {
                format!("{name}_{value}")
            };
            self.arena.line(body, line)?;
        }
        self.arena.line(BlockId::ROOT, "")?;
        self.arena.line(BlockId::ROOT, "const (")?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, ")")
    }

    fn method(&mut self, model: &str, name: &str, params: &[Field]) -> Result<BlockId> {
        let signature = format!("({})", Self::params(params)?);
        self.function(model, name, params, signature)
    }

    fn return_method(
        &mut self,
        model: &str,
        name: &str,
        returns: &TypeDesc,
        params: &[Field],
    ) -> Result<BlockId> {
        let signature = format!("({}) {}", Self::params(params)?, resolve_type(returns)?);
        self.function(model, name, params, signature)
    }

    fn assign(&mut self, block: BlockId, target: &Value, source: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let line = format!("{} = {}", self.value(target, &r)?, self.value(source, &r)?);
        self.statement(block, line)
    }

    fn declare(&mut self, block: BlockId, name: &str, value: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        Self::check_binding(&r, name)?;
        let line = format!("{name} := {}", self.value(value, &r)?);
        self.statement(block, line)
    }

    fn append_value(&mut self, block: BlockId, array: &Value, value: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let array = self.value(array, &r)?;
        let line = format!("{array} = append({array}, {})", self.value(value, &r)?);
        self.statement(block, line)
    }

    fn append_array(&mut self, block: BlockId, array: &Value, values: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let array = self.value(array, &r)?;
        let line = format!("{array} = append({array}, {}...)", self.value(values, &r)?);
        self.statement(block, line)
    }

    fn remove_value(&mut self, block: BlockId, array: &Value, index: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let array = self.value(array, &r)?;
        let index = resolve::resolve_operand(index, Some(&r), &mut self.imports)?;
        let line = format!("{array} = append({array}[:{index}], {array}[{index}+1:]...)");
        self.statement(block, line)
    }

    fn map_put(&mut self, block: BlockId, map: &Value, key: &Value, value: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let line = format!(
            "{}[{}] = {}",
            self.value(map, &r)?,
            self.value(key, &r)?,
            self.value(value, &r)?
        );
        self.statement(block, line)
    }

    fn map_delete(&mut self, block: BlockId, map: &Value, key: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let line = format!("delete({}, {})", self.value(map, &r)?, self.value(key, &r)?);
        self.statement(block, line)
    }

    fn for_each(
        &mut self,
        block: BlockId,
        array: &Value,
        index_name: &str,
        value_name: &str,
    ) -> Result<BlockId> {
        let r = self.receiver(block)?;
        let index_name = used_binding(index_name);
        let value_name = used_binding(value_name);
        for binding in index_name.iter().chain(&value_name) {
            Self::check_binding(&r, binding)?;
        }
        let array = self.value(array, &r)?;
        let header = match (index_name, value_name) {
            (None, None) => format!("for range {array} {{"),
            (Some(i), None) => format!("for {i} := range {array} {{"),
            (None, Some(v)) => format!("for _, {v} := range {array} {{"),
            (Some(i), Some(v)) => format!("for {i}, {v} := range {array} {{"),
        };
        self.scope(block, header, "}")
    }

    fn if_then(&mut self, block: BlockId, cond: &Value) -> Result<BlockId> {
        let r = self.receiver(block)?;
        let header = format!("if {} {{", self.value(cond, &r)?);
        self.scope(block, header, "}")
    }

    fn if_else(&mut self, block: BlockId, cond: &Value) -> Result<(BlockId, BlockId)> {
        let r = self.receiver(block)?;
        let header = format!("if {} {{", self.value(cond, &r)?);
        let then_body = self.scope(block, header, "} else {")?;
        let else_body = self.arena.alloc_child(block)?;
        self.arena.nest(block, else_body)?;
        self.arena.line(block, "}")?;
        Ok((then_body, else_body))
    }

    fn return_value(&mut self, block: BlockId, value: &Value) -> Result<()> {
        let r = self.receiver(block)?;
        let line = format!("return {}", self.value(value, &r)?);
        self.statement(block, line)
    }
}

impl Backend for GoBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extension(&self) -> &'static str {
        ".go"
    }

    #[tracing::instrument(level = "debug", skip_all, fields(package = %self.package))]
    fn render(&mut self) -> Result<String> {
        if let Some((model, method)) = self.methods.iter().find(|(m, _)| !self.models.contains(m)) {
            return Err(CodegenError::BrokenReference {
                model: model.clone(),
                method: method.clone(),
            });
        }
        render_file(&self.package, &self.imports, &self.arena)
    }
}

/// Package clause, import block, then the document body.
pub fn render_file(package: &str, imports: &Imports, arena: &CodeArena) -> Result<String> {
    let mut out = StringEmitter::new(Indent::Tab);
    out.emit_line(0, &format!("package {package}"));
    match imports.len() {
        0 => {}
        1 => {
            for import in imports {
                out.emit_line(0, "");
                out.emit_line(0, &format!("import \"{import}\""));
            }
        }
        _ => {
            out.emit_line(0, "");
            out.emit_line(0, "import (");
            for import in imports {
                out.emit_line(1, &format!("\"{import}\""));
            }
            out.emit_line(0, ")");
        }
    }
    if !arena.is_empty(BlockId::ROOT)? {
        out.emit_line(0, "");
    }
    arena.render(&mut out)?;
    Ok(out.output())
}

#[cfg(test)]
mod tests;
