//! Orphan resolution.
//!
//! Some targets nest methods inside the model declaration, but a method may
//! be declared before or after its model. Instead of placing a method when it
//! is declared, the backend records it as an *orphan*: a detached block
//! tagged with the owning model's name. Models register the block that will
//! hold their members.
//!
//! [`OrphanRegistry::resolve`] runs once, when the document is finalized. It
//! moves every orphan's contents into its model's block, in the order the
//! orphans were created. An orphan whose model was never declared is a
//! `BrokenReference`; it is reported there and never earlier.

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::BlockId;
use rustc_hash::FxHashMap;

use crate::arena::CodeArena;

#[derive(Clone, Debug)]
struct Orphan {
    owner: String,
    method: String,
    block: BlockId,
}

/// Model placeholders and pending orphans of one document.
#[derive(Default, Debug)]
pub struct OrphanRegistry {
    models: FxHashMap<String, BlockId>,
    pending: Vec<Orphan>,
}

impl OrphanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the block that receives `model`'s methods.
    ///
    /// A model declared twice keeps the later block.
    pub fn register_model(&mut self, model: &str, body: BlockId) {
        if self.models.insert(model.to_owned(), body).is_some() {
            tracing::debug!(model, "model redeclared; methods attach to the latest declaration");
        }
    }

    /// Record `block` as belonging to `owner`, to be spliced at finalization.
    pub fn defer(&mut self, owner: &str, method: &str, block: BlockId) {
        self.pending.push(Orphan {
            owner: owner.to_owned(),
            method: method.to_owned(),
            block,
        });
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Splice every pending orphan into its model.
    ///
    /// All owners are checked before anything moves, so a failed resolution
    /// leaves the arena untouched.
    #[tracing::instrument(level = "debug", skip_all, fields(pending = self.pending.len()))]
    pub fn resolve(&mut self, arena: &mut CodeArena) -> Result<()> {
        let mut targets = Vec::with_capacity(self.pending.len());
        for orphan in &self.pending {
            let target = self.models.get(&orphan.owner).copied().ok_or_else(|| {
                CodegenError::BrokenReference {
                    model: orphan.owner.clone(),
                    method: orphan.method.clone(),
                }
            })?;
            targets.push(target);
        }

        for (orphan, target) in std::mem::take(&mut self.pending).into_iter().zip(targets) {
            let code = arena.take(orphan.block)?;
            arena.extend(target, code)?;
            tracing::trace!(model = %orphan.owner, method = %orphan.method, "orphan spliced");
        }
        Ok(())
    }
}
