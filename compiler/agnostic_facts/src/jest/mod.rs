//! Jest test emitter for the TypeScript backend.
//!
//! ```text
//! import { TestModel } from "./model";
//!
//! test("AddAddsOne", () => {
//!     const model = new TestModel();
//!     const output = model.Add(1);
//!     expect(output).toEqual(2);
//! });
//! ```

use agnostic_codegen::typescript::resolve_value;
use agnostic_codegen::{quote, BackendArgs, CodeArena, Emitter, Indent, StringEmitter};
use agnostic_diagnostic::Result;
use agnostic_ir::BlockId;

use crate::backend::{TestBackend, TEST_MODEL};
use crate::plan::TestProcedure;

const BACKEND: &str = "jest";

#[derive(Debug)]
pub struct JestBackend {
    module: String,
    arena: CodeArena,
}

impl JestBackend {
    /// `module` is the import path of the file declaring the model under test.
    pub fn new(module: impl Into<String>) -> Self {
        JestBackend {
            module: module.into(),
            arena: CodeArena::new(),
        }
    }

    /// Requires `module`.
    pub fn from_args(args: &BackendArgs) -> Result<Self> {
        Ok(Self::new(args.require(BACKEND, "module")?))
    }
}

impl TestBackend for JestBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extension(&self) -> &'static str {
        ".test.ts"
    }

    fn procedure(&mut self, procedure: &TestProcedure<'_>) -> Result<()> {
        let inputs = procedure
            .inputs
            .iter()
            .map(resolve_value)
            .collect::<Result<Vec<_>>>()?;
        let call = format!("model.{}({})", procedure.method, inputs.join(", "));

        let body = self.arena.alloc(None);
        self.arena
            .line(body, format!("const model = new {TEST_MODEL}();"))?;
        match procedure.output {
            Some(output) => {
                self.arena.line(body, format!("const output = {call};"))?;
                self.arena.line(
                    body,
                    format!("expect(output).toEqual({});", resolve_value(output)?),
                )?;
            }
            None => self.arena.line(body, format!("{call};"))?,
        }
        for effect in procedure.side_effects {
            self.arena.line(
                body,
                format!(
                    "expect(model.{}).toEqual({});",
                    effect.field,
                    resolve_value(&effect.expected)?
                ),
            )?;
        }

        self.arena.line(BlockId::ROOT, "")?;
        self.arena.line(
            BlockId::ROOT,
            format!("test({}, () => {{", quote(&procedure.name)),
        )?;
        self.arena.nest(BlockId::ROOT, body)?;
        self.arena.line(BlockId::ROOT, "});")
    }

    fn render(&mut self) -> Result<String> {
        let mut out = StringEmitter::new(Indent::Tab);
        out.emit_line(
            0,
            &format!("import {{ {TEST_MODEL} }} from {};", quote(&self.module)),
        );
        self.arena.render(&mut out)?;
        Ok(out.output())
    }
}
