//! Agnostic Fact Compiler
//!
//! A [`Suite`] describes the methods of a model under test as [`Case`]s, each
//! with a table of [`Fact`](agnostic_ir::Fact)s. Compilation has two halves:
//!
//! - [`compile_suite_program`] declares `TestModel` and one method per case
//!   on any program [`Builder`](agnostic_codegen::Builder);
//! - [`compile_suite`] turns every fact into an independent test procedure
//!   on a [`TestBackend`].
//!
//! # Example
//!
//! ```text
//! Case "Add" (x: int) -> int
//!   Fact "AddsOne": inputs [1], output 2
//!
//! jest:    test("AddAddsOne", () => { ... expect(output).toEqual(2); });
//! testify: func TestAddAddsOne(t *testing.T) { ... require.EqualValues(t, 2, output) }
//! ```

mod backend;
mod case;
pub mod jest;
pub mod plan;
pub mod testify;

pub use backend::{compile_suite, compile_suite_program, create_test_backend, TestBackend, TEST_MODEL};
pub use case::{Case, Generator, Suite};
pub use jest::JestBackend;
pub use plan::TestProcedure;
pub use testify::TestifyBackend;
