//! Code arena.
//!
//! A backend document is a tree of lines and nested blocks. The arena owns
//! every block; a parent refers to a child only through its [`BlockId`]. A
//! block rendered inside a parent is indented one level deeper, so nesting in
//! the arena is nesting in the output.
//!
//! Each block records the model whose method it belongs to (`owner`). Blocks
//! allocated as children inherit it, which is how a statement deep inside a
//! loop knows its receiver.

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{next_block_id, BlockId};

use crate::emitter::Emitter;
use crate::stack::ensure_sufficient_stack;

/// One entry of a block.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Code {
    Line(String),
    Block(BlockId),
}

#[derive(Clone, Default, Debug)]
struct CodeBlock {
    owner: Option<String>,
    code: Vec<Code>,
}

/// Arena of code blocks. Block 0 is the document root.
#[derive(Clone, Debug)]
pub struct CodeArena {
    blocks: Vec<CodeBlock>,
}

impl Default for CodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeArena {
    pub fn new() -> Self {
        CodeArena {
            blocks: vec![CodeBlock::default()],
        }
    }

    /// Allocate a detached block.
    pub fn alloc(&mut self, owner: Option<String>) -> BlockId {
        let id = next_block_id(self.blocks.len());
        self.blocks.push(CodeBlock {
            owner,
            code: Vec::new(),
        });
        id
    }

    /// Allocate a detached block owned by the same model as `parent`.
    pub fn alloc_child(&mut self, parent: BlockId) -> Result<BlockId> {
        let owner = self.get(parent)?.owner.clone();
        Ok(self.alloc(owner))
    }

    fn get(&self, id: BlockId) -> Result<&CodeBlock> {
        self.blocks
            .get(id.index())
            .ok_or(CodegenError::InvalidBlock { block: id })
    }

    fn get_mut(&mut self, id: BlockId) -> Result<&mut CodeBlock> {
        self.blocks
            .get_mut(id.index())
            .ok_or(CodegenError::InvalidBlock { block: id })
    }

    pub fn owner(&self, id: BlockId) -> Result<Option<&str>> {
        Ok(self.get(id)?.owner.as_deref())
    }

    pub fn is_empty(&self, id: BlockId) -> Result<bool> {
        Ok(self.get(id)?.code.is_empty())
    }

    pub fn line(&mut self, id: BlockId, text: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.code.push(Code::Line(text.into()));
        Ok(())
    }

    /// Place `child` at the current end of `parent`.
    pub fn nest(&mut self, parent: BlockId, child: BlockId) -> Result<()> {
        self.get(child)?;
        self.get_mut(parent)?.code.push(Code::Block(child));
        Ok(())
    }

    /// Remove and return everything in a block.
    pub fn take(&mut self, id: BlockId) -> Result<Vec<Code>> {
        Ok(std::mem::take(&mut self.get_mut(id)?.code))
    }

    /// Append entries to a block, keeping their order.
    pub fn extend(&mut self, id: BlockId, code: Vec<Code>) -> Result<()> {
        self.get_mut(id)?.code.extend(code);
        Ok(())
    }

    /// Render the whole document, root entries at level zero.
    pub fn render(&self, emitter: &mut impl Emitter) -> Result<()> {
        self.render_block(BlockId::ROOT, 0, emitter)
    }

    fn render_block(&self, id: BlockId, level: usize, emitter: &mut impl Emitter) -> Result<()> {
        ensure_sufficient_stack(|| {
            for code in &self.get(id)?.code {
                match code {
                    Code::Line(text) => emitter.emit_line(level, text),
                    Code::Block(child) => self.render_block(*child, level + 1, &mut *emitter)?,
                }
            }
            Ok(())
        })
    }
}
