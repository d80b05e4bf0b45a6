//! Suite validation and procedure planning.
//!
//! Every fact of every case becomes one [`TestProcedure`]. A suite is checked
//! as a whole before anything is planned, so an invalid suite produces no
//! procedures at all.
//!
//! Rules:
//! - case names are unique within the suite;
//! - fact names are unique within their case;
//! - the concatenated procedure names are unique within the suite;
//! - a fact supplies exactly one input per parameter;
//! - a fact on a void case has no output;
//! - fact literals are context-free (not method-dependent).

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{Fact, SideEffect, Value, ValueNode};
use rustc_hash::FxHashSet;

use crate::{Case, Suite};

/// One synthesized test: build a fresh model, call `method` with `inputs`,
/// then check `output` and every side effect, in that order.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TestProcedure<'a> {
    /// `case.name + fact.name`.
    pub name: String,
    pub method: &'a str,
    pub inputs: &'a [Value],
    pub output: Option<&'a Value>,
    pub side_effects: &'a [SideEffect],
}

impl<'a> TestProcedure<'a> {
    fn new(case: &'a Case, fact: &'a Fact) -> Self {
        TestProcedure {
            name: procedure_name(case, fact),
            method: &case.name,
            inputs: &fact.inputs,
            output: fact.output.as_ref(),
            side_effects: &fact.side_effects,
        }
    }
}

pub fn procedure_name(case: &Case, fact: &Fact) -> String {
    format!("{}{}", case.name, fact.name)
}

/// Check one case on its own.
pub fn validate_case(case: &Case) -> Result<()> {
    let mut facts = FxHashSet::default();
    for fact in &case.facts {
        if !facts.insert(fact.name.as_str()) {
            return Err(CodegenError::invalid_suite(format!(
                "duplicate fact `{}` in case `{}`",
                fact.name, case.name
            )));
        }
        if fact.inputs.len() != case.parameters.len() {
            return Err(CodegenError::invalid_suite(format!(
                "fact `{}` of case `{}` has {} inputs, expected {}",
                fact.name,
                case.name,
                fact.inputs.len(),
                case.parameters.len()
            )));
        }
        if fact.output.is_some() && case.returns.is_none() {
            return Err(CodegenError::invalid_suite(format!(
                "fact `{}` expects an output but case `{}` returns nothing",
                fact.name, case.name
            )));
        }
        if fact.literals().any(ValueNode::is_method_dependent) {
            return Err(CodegenError::invalid_suite(format!(
                "fact `{}` of case `{}` refers to a variable or field",
                fact.name, case.name
            )));
        }
    }
    Ok(())
}

/// Check every rule across the whole suite.
pub fn validate(suite: &Suite) -> Result<()> {
    let mut cases = FxHashSet::default();
    let mut procedures = FxHashSet::default();
    for case in suite.cases() {
        if !cases.insert(case.name.as_str()) {
            return Err(CodegenError::invalid_suite(format!(
                "duplicate case `{}`",
                case.name
            )));
        }
        validate_case(case)?;
        for fact in &case.facts {
            let name = procedure_name(case, fact);
            if procedures.contains(&name) {
                return Err(CodegenError::invalid_suite(format!(
                    "test name `{name}` is produced by more than one case"
                )));
            }
            procedures.insert(name);
        }
    }
    Ok(())
}

/// Procedures of one case, in fact order.
pub fn plan_case(case: &Case) -> Result<Vec<TestProcedure<'_>>> {
    validate_case(case)?;
    Ok(case
        .facts
        .iter()
        .map(|fact| TestProcedure::new(case, fact))
        .collect())
}

/// Procedures of a whole suite, in case order then fact order.
#[tracing::instrument(level = "debug", skip_all, fields(cases = suite.cases().len()))]
pub fn plan(suite: &Suite) -> Result<Vec<TestProcedure<'_>>> {
    validate(suite)?;
    Ok(suite
        .cases()
        .iter()
        .flat_map(|case| case.facts.iter().map(move |fact| TestProcedure::new(case, fact)))
        .collect())
}
