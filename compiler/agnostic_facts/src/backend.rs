//! Test backend contract and suite compilation.

use std::path::{Path, PathBuf};

use agnostic_codegen::{write_document, BackendArgs, BackendKind, Builder};
use agnostic_diagnostic::Result;
use agnostic_ir::Field;

use crate::jest::JestBackend;
use crate::plan::{plan, plan_case, validate, TestProcedure};
use crate::testify::TestifyBackend;
use crate::{Case, Suite};

/// Name of the model every generated test instantiates.
pub const TEST_MODEL: &str = "TestModel";

/// A target that turns test procedures into one test file.
pub trait TestBackend {
    fn name(&self) -> &'static str;

    /// Suffix appended to the extension-less output path, e.g. `_test.go`.
    fn extension(&self) -> &'static str;

    /// Emit one procedure.
    fn procedure(&mut self, procedure: &TestProcedure<'_>) -> Result<()>;

    /// Serialize the test file.
    fn render(&mut self) -> Result<String>;

    /// Emit one procedure per fact of `case`.
    fn test(&mut self, case: &Case) -> Result<()> {
        for procedure in plan_case(case)? {
            self.procedure(&procedure)?;
        }
        Ok(())
    }

    /// Render, then write to `base` + [`TestBackend::extension`].
    fn write(&mut self, base: &Path) -> Result<PathBuf> {
        let text = self.render()?;
        write_document(base, self.extension(), &text)
    }
}

/// Validate `suite`, then emit every procedure into `backend`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(backend = backend.name(), facts = suite.fact_count())
)]
pub fn compile_suite(suite: &Suite, backend: &mut dyn TestBackend) -> Result<()> {
    let procedures = plan(suite)?;
    for procedure in &procedures {
        backend.procedure(procedure)?;
        tracing::debug!(name = %procedure.name, "test procedure synthesized");
    }
    Ok(())
}

/// Declare the model under test and one method per case, with each body
/// written by the case's generator.
#[tracing::instrument(level = "debug", skip_all, fields(cases = suite.cases().len()))]
pub fn compile_suite_program(
    suite: &Suite,
    builder: &mut dyn Builder,
    fields: &[Field],
) -> Result<()> {
    validate(suite)?;
    builder.model(TEST_MODEL, fields)?;
    for case in suite.cases() {
        let body = match &case.returns {
            Some(returns) => {
                builder.return_method(TEST_MODEL, &case.name, returns, &case.parameters)?
            }
            None => builder.method(TEST_MODEL, &case.name, &case.parameters)?,
        };
        (case.generator)(&mut *builder, body)?;
    }
    Ok(())
}

/// Construct the test backend for `kind`.
pub fn create_test_backend(kind: BackendKind, args: &BackendArgs) -> Result<Box<dyn TestBackend>> {
    tracing::debug!(backend = kind.name(), "creating test backend");
    Ok(match kind {
        BackendKind::TypeScript => Box::new(JestBackend::from_args(args)?),
        BackendKind::Go => Box::new(TestifyBackend::from_args(args)?),
    })
}
