//! Agnostic IR - Backend-Agnostic Intermediate Representation
//!
//! This crate contains the data model shared by every backend:
//! - Type descriptors (primitive, model, array, map, pointer)
//! - Value expressions and the method-dependence capability
//! - Models, enums, methods and statement blocks (`Program`)
//! - Facts used by the fact compiler
//!
//! # Design Philosophy
//!
//! - **Closed grammars**: every family is an enum; lowering matches exhaustively.
//! - **Handles, not aliases**: statement blocks live in an arena and are
//!   addressed by `BlockId`.
//! - **Deterministic**: all sequences are ordered `Vec`s; nothing here iterates
//!   a hash map.
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

mod block_id;
mod fact;
mod field;
mod operators;
pub mod program;
mod types;
mod value;

pub use block_id::{next_block_id, BlockId};
pub use fact::{Fact, SideEffect};
pub use field::Field;
pub use operators::Operator;
pub use program::{used_binding, Decl, MethodDecl, Program, Stmt};
pub use types::{Primitive, TypeDesc};
pub use value::{MapEntry, Value, ValueKind, ValueNode};
