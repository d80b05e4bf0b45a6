//! Backend contract.
//!
//! [`Builder`] is the append-only, block-structured surface a generator drives:
//! declarations at the top level, statements into a block named by handle.
//! Every operation that opens a scope returns the handle of the new block.
//! [`Backend`] adds finalization and output for builders that produce a
//! source file.
//!
//! [`BodyBuilder`] wraps a builder and one block. Opening a nested scope
//! through it borrows the parent, so a child scope must be finished before the
//! parent receives further statements.

use std::path::{Path, PathBuf};

use agnostic_diagnostic::Result;
use agnostic_ir::{BlockId, Field, TypeDesc, Value};

use crate::emitter::write_document;

/// Declaration and statement operations every target implements.
pub trait Builder {
    /// Declare a model with ordered fields.
    fn model(&mut self, name: &str, fields: &[Field]) -> Result<()>;

    /// Declare an enum; values receive the codes 0, 1, 2, ... in order.
    fn enumeration(&mut self, name: &str, values: &[&str]) -> Result<()>;

    /// Declare a method of `model` and return its body.
    ///
    /// The model does not have to be declared yet.
    fn method(&mut self, model: &str, name: &str, params: &[Field]) -> Result<BlockId>;

    /// Declare a method returning `returns` and return its body.
    fn return_method(
        &mut self,
        model: &str,
        name: &str,
        returns: &TypeDesc,
        params: &[Field],
    ) -> Result<BlockId>;

    /// `target = source`
    fn assign(&mut self, block: BlockId, target: &Value, source: &Value) -> Result<()>;

    /// Declare a local initialised to `value`.
    fn declare(&mut self, block: BlockId, name: &str, value: &Value) -> Result<()>;

    /// Append one element. `array` names the extended sequence afterwards;
    /// other references to the old storage may or may not observe it.
    fn append_value(&mut self, block: BlockId, array: &Value, value: &Value) -> Result<()>;

    /// Append every element of `values`, which is left unchanged.
    fn append_array(&mut self, block: BlockId, array: &Value, values: &Value) -> Result<()>;

    /// Remove the element at `index`, keeping the order of the rest and
    /// leaving no gap.
    fn remove_value(&mut self, block: BlockId, array: &Value, index: &Value) -> Result<()>;

    /// Insert or overwrite `key`.
    fn map_put(&mut self, block: BlockId, map: &Value, key: &Value, value: &Value) -> Result<()>;

    /// Remove `key`; afterwards the key does not exist in the map.
    fn map_delete(&mut self, block: BlockId, map: &Value, key: &Value) -> Result<()>;

    /// Iterate `array`, binding the zero-based index and the element.
    ///
    /// An empty name means the binding is unused and must not be declared in
    /// a way that draws an unused-variable diagnostic.
    fn for_each(
        &mut self,
        block: BlockId,
        array: &Value,
        index_name: &str,
        value_name: &str,
    ) -> Result<BlockId>;

    /// Run the returned block when `cond` holds.
    fn if_then(&mut self, block: BlockId, cond: &Value) -> Result<BlockId>;

    /// Run the first block when `cond` holds, the second otherwise.
    fn if_else(&mut self, block: BlockId, cond: &Value) -> Result<(BlockId, BlockId)>;

    /// Return `value` from the enclosing method.
    fn return_value(&mut self, block: BlockId, value: &Value) -> Result<()>;
}

/// A builder that finalizes into one source file.
pub trait Backend: Builder {
    /// Short backend name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Suffix appended to the extension-less output path, e.g. `.ts`.
    fn extension(&self) -> &'static str;

    /// Finalize the document and serialize it.
    ///
    /// Finalization happens once; calling this again returns the same text.
    fn render(&mut self) -> Result<String>;

    /// Render, then write to `base` + [`Backend::extension`].
    ///
    /// Nothing is written when rendering fails.
    fn write(&mut self, base: &Path) -> Result<PathBuf> {
        let text = self.render()?;
        write_document(base, self.extension(), &text)
    }
}

/// A block of a builder, with the statement operations bound to it.
pub struct BodyBuilder<'a, B: Builder + ?Sized> {
    builder: &'a mut B,
    block: BlockId,
}

impl<'a, B: Builder + ?Sized> BodyBuilder<'a, B> {
    pub fn new(builder: &'a mut B, block: BlockId) -> Self {
        BodyBuilder { builder, block }
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Switch to another block of the same builder, e.g. an `else` branch.
    pub fn nested(&mut self, block: BlockId) -> BodyBuilder<'_, B> {
        BodyBuilder::new(&mut *self.builder, block)
    }

    pub fn assign(&mut self, target: &Value, source: &Value) -> Result<()> {
        self.builder.assign(self.block, target, source)
    }

    pub fn declare(&mut self, name: &str, value: &Value) -> Result<()> {
        self.builder.declare(self.block, name, value)
    }

    pub fn append_value(&mut self, array: &Value, value: &Value) -> Result<()> {
        self.builder.append_value(self.block, array, value)
    }

    pub fn append_array(&mut self, array: &Value, values: &Value) -> Result<()> {
        self.builder.append_array(self.block, array, values)
    }

    pub fn remove_value(&mut self, array: &Value, index: &Value) -> Result<()> {
        self.builder.remove_value(self.block, array, index)
    }

    pub fn map_put(&mut self, map: &Value, key: &Value, value: &Value) -> Result<()> {
        self.builder.map_put(self.block, map, key, value)
    }

    pub fn map_delete(&mut self, map: &Value, key: &Value) -> Result<()> {
        self.builder.map_delete(self.block, map, key)
    }

    pub fn for_each(
        &mut self,
        array: &Value,
        index_name: &str,
        value_name: &str,
    ) -> Result<BodyBuilder<'_, B>> {
        let inner = self.builder.for_each(self.block, array, index_name, value_name)?;
        Ok(self.nested(inner))
    }

    pub fn if_then(&mut self, cond: &Value) -> Result<BodyBuilder<'_, B>> {
        let inner = self.builder.if_then(self.block, cond)?;
        Ok(self.nested(inner))
    }

    /// Returns the handles of both branches; open each with [`Self::nested`].
    pub fn if_else(&mut self, cond: &Value) -> Result<(BlockId, BlockId)> {
        self.builder.if_else(self.block, cond)
    }

    pub fn return_value(&mut self, value: &Value) -> Result<()> {
        self.builder.return_value(self.block, value)
    }
}
