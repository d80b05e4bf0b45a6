//! Recorded Program IR
//!
//! The data form of a generated program: declarations in call order plus an
//! arena of statement blocks. Method bodies and nested scopes are addressed by
//! [`BlockId`]; the `Program` owns every statement.
//!
//! Models and methods are associated by name only. Nothing here checks that a
//! method's model exists; that is resolved (or rejected) when a backend
//! finalizes its document.

use crate::{next_block_id, BlockId, Field, TypeDesc, Value};

/// A method declaration. `returns: None` is a plain method, `Some` a
/// returning one.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub model: String,
    pub name: String,
    pub params: Vec<Field>,
    pub returns: Option<TypeDesc>,
    pub body: BlockId,
}

/// Top-level declarations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    Model { name: String, fields: Vec<Field> },
    /// Values receive the codes 0, 1, 2, ... in declaration order.
    Enum { name: String, values: Vec<String> },
    Method(MethodDecl),
}

/// Statements.
///
/// Binding names in `ForEach` use the empty string for "unused".
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    Assign {
        target: Value,
        source: Value,
    },
    Declare {
        name: String,
        value: Value,
    },
    AppendValue {
        array: Value,
        value: Value,
    },
    AppendArray {
        array: Value,
        values: Value,
    },
    RemoveValue {
        array: Value,
        index: Value,
    },
    MapPut {
        map: Value,
        key: Value,
        value: Value,
    },
    MapDelete {
        map: Value,
        key: Value,
    },
    ForEach {
        array: Value,
        index_name: String,
        value_name: String,
        body: BlockId,
    },
    If {
        cond: Value,
        body: BlockId,
    },
    IfElse {
        cond: Value,
        then_body: BlockId,
        else_body: BlockId,
    },
    Return(Value),
}

/// `Some(name)` for a bound name, `None` for the empty "unused" marker.
pub fn used_binding(name: &str) -> Option<&str> {
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// A whole generated program.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    decls: Vec<Decl>,
    blocks: Vec<Vec<Stmt>>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations in the order they were made.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn block(&self, id: BlockId) -> Option<&[Stmt]> {
        self.blocks.get(id.index()).map(Vec::as_slice)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Vec<Stmt>> {
        self.blocks.get_mut(id.index())
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Allocate an empty block.
    pub fn new_block(&mut self) -> BlockId {
        let id = next_block_id(self.blocks.len());
        self.blocks.push(Vec::new());
        id
    }

    pub fn add_model(&mut self, name: impl Into<String>, fields: Vec<Field>) {
        self.decls.push(Decl::Model {
            name: name.into(),
            fields,
        });
    }

    pub fn add_enum(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.decls.push(Decl::Enum {
            name: name.into(),
            values,
        });
    }

    /// Declare a method and return the handle of its (empty) body.
    pub fn add_method(
        &mut self,
        model: impl Into<String>,
        name: impl Into<String>,
        params: Vec<Field>,
        returns: Option<TypeDesc>,
    ) -> BlockId {
        let body = self.new_block();
        self.decls.push(Decl::Method(MethodDecl {
            model: model.into(),
            name: name.into(),
            params,
            returns,
            body,
        }));
        body
    }
}
