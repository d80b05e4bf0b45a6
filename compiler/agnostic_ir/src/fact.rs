//! Facts: declarative input/output/side-effect tables.
//!
//! A fact states that calling a method with `inputs` produces `output` and
//! leaves the listed fields holding the expected values. The fact compiler
//! turns each one into an independent test procedure.

use crate::Value;

/// A field of the model under test that must hold `expected` after the call.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SideEffect {
    pub field: String,
    pub expected: Value,
}

impl SideEffect {
    pub fn new(field: impl Into<String>, expected: Value) -> Self {
        SideEffect {
            field: field.into(),
            expected,
        }
    }
}

/// One scenario of a test case.
///
/// `output: None` means the result is not captured or checked.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Fact {
    pub name: String,
    pub inputs: Vec<Value>,
    pub side_effects: Vec<SideEffect>,
    pub output: Option<Value>,
}

impl Fact {
    pub fn new(name: impl Into<String>) -> Self {
        Fact {
            name: name.into(),
            inputs: Vec::new(),
            side_effects: Vec::new(),
            output: None,
        }
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = Value>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: Value) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use]
    pub fn with_side_effect(mut self, field: impl Into<String>, expected: Value) -> Self {
        self.side_effects.push(SideEffect::new(field, expected));
        self
    }

    /// Every literal the fact carries: inputs, output, then expectations.
    pub fn literals(&self) -> impl Iterator<Item = &Value> {
        self.inputs
            .iter()
            .chain(self.output.iter())
            .chain(self.side_effects.iter().map(|effect| &effect.expected))
    }
}
