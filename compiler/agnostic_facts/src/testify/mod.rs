//! Go test emitter using `testing` and testify's `require`.
//!
//! Assertions use `require.EqualValues`, so an `int64` result compares equal
//! to an untyped literal. `go test` skips `Testxxx`, so the first letter after
//! the `Test` prefix is uppercased.

use agnostic_codegen::golang::{render_file, resolve_value, Imports};
use agnostic_codegen::{BackendArgs, CodeArena};
use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{BlockId, Value};
use rustc_hash::FxHashSet;

use crate::backend::{TestBackend, TEST_MODEL};
use crate::plan::TestProcedure;

const BACKEND: &str = "testify";

#[derive(Debug)]
pub struct TestifyBackend {
    package: String,
    arena: CodeArena,
    imports: Imports,
    functions: FxHashSet<String>,
}

impl TestifyBackend {
    pub fn new(package: impl Into<String>) -> Self {
        let mut imports = Imports::new();
        imports.insert("testing");
        imports.insert("github.com/stretchr/testify/require");
        TestifyBackend {
            package: package.into(),
            arena: CodeArena::new(),
            imports,
            functions: FxHashSet::default(),
        }
    }

    /// Requires `package`.
    pub fn from_args(args: &BackendArgs) -> Result<Self> {
        Ok(Self::new(args.require(BACKEND, "package")?))
    }

    fn literal(&mut self, value: &Value) -> Result<String> {
        resolve_value(value, None, &mut self.imports)
    }
}

impl TestBackend for TestifyBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extension(&self) -> &'static str {
        "_test.go"
    }

    fn procedure(&mut self, procedure: &TestProcedure<'_>) -> Result<()> {
        let function = function_name(&procedure.name);
        if self.functions.contains(&function) {
            return Err(CodegenError::invalid_suite(format!(
                "test function `{function}` is produced by more than one procedure"
            )));
        }
        let inputs = procedure
            .inputs
            .iter()
            .map(|input| self.literal(input))
            .collect::<Result<Vec<_>>>()?;
        let call = format!("model.{}({})", procedure.method, inputs.join(", "));

        let body = self.arena.alloc(None);
        self.arena.line(body, format!("model := {TEST_MODEL}{{}}"))?;
        match procedure.output {
            Some(output) => {
                let expected = self.literal(output)?;
                self.arena.line(body, format!("output := {call}"))?;
                self.arena
                    .line(body, format!("require.EqualValues(t, {expected}, output)"))?;
            }
            None => self.arena.line(body, call)?,
        }
        for effect in procedure.side_effects {
            let expected = self.literal(&effect.expected)?;
            self.arena.line(
                body,
                format!("require.EqualValues(t, {expected}, model.{})", effect.field),
            )?;
        }

        if !self.arena.is_empty(BlockId::ROOT)? {
            self.arena.line(BlockId::ROOT, "")?;
        }
        self.arena
            .line(BlockId::ROOT, format!("func {function}(t *testing.T) {{"))?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, "}")?;
        self.functions.insert(function);
        Ok(())
    }

    fn render(&mut self) -> Result<String> {
        render_file(&self.package, &self.imports, &self.arena)
    }
}

/// `Test` plus the procedure name with its first letter uppercased.
fn function_name(procedure: &str) -> String {
    let mut chars = procedure.chars();
    match chars.next() {
        Some(first) => format!("Test{}{}", first.to_uppercase(), chars.as_str()),
        None => "Test".to_string(),
    }
}
