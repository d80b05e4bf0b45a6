//! Test cases and suites.

use std::fmt;

use agnostic_codegen::Builder;
use agnostic_diagnostic::Result;
use agnostic_ir::{BlockId, Fact, Field, TypeDesc};

/// Writes the body of a case's method into the given block.
pub type Generator = Box<dyn Fn(&mut dyn Builder, BlockId) -> Result<()>>;

/// A method of the model under test, with the facts that describe it.
pub struct Case {
    /// Method name; unique within a suite.
    pub name: String,
    pub description: String,
    pub parameters: Vec<Field>,
    /// `None` for a method that returns nothing.
    pub returns: Option<TypeDesc>,
    pub generator: Generator,
    pub facts: Vec<Fact>,
}

impl Case {
    /// A parameterless, void case with an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Case {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
            returns: None,
            generator: Box::new(|_, _| Ok(())),
            facts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.parameters.push(Field::new(name, ty));
        self
    }

    #[must_use]
    pub fn with_returns(mut self, returns: TypeDesc) -> Self {
        self.returns = Some(returns);
        self
    }

    #[must_use]
    pub fn with_generator(
        mut self,
        generator: impl Fn(&mut dyn Builder, BlockId) -> Result<()> + 'static,
    ) -> Self {
        self.generator = Box::new(generator);
        self
    }

    #[must_use]
    pub fn with_fact(mut self, fact: Fact) -> Self {
        self.facts.push(fact);
        self
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("returns", &self.returns)
            .field("facts", &self.facts)
            .finish_non_exhaustive()
    }
}

/// An ordered collection of cases.
#[derive(Default, Debug)]
pub struct Suite {
    cases: Vec<Case>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_case(mut self, case: Case) -> Self {
        self.push(case);
        self
    }

    pub fn push(&mut self, case: Case) {
        self.cases.push(case);
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Total number of facts, i.e. of test procedures the suite compiles to.
    pub fn fact_count(&self) -> usize {
        self.cases.iter().map(|case| case.facts.len()).sum()
    }
}

impl FromIterator<Case> for Suite {
    fn from_iter<T: IntoIterator<Item = Case>>(iter: T) -> Self {
        Suite {
            cases: iter.into_iter().collect(),
        }
    }
}
