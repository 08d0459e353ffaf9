//! Operators with non-deterministic outcomes.

use super::Fact;

/// A planning operator.
///
/// Each outcome is a set of assignments; exactly one outcome occurs when
/// the operator is applied, chosen by the environment. A deterministic
/// operator has a single outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operator {
    pub name: String,
    pub precondition: Vec<Fact>,
    pub outcomes: Vec<Vec<Fact>>,
}

impl Operator {
    /// Creates a non-deterministic operator.
    pub fn new(
        name: impl Into<String>,
        precondition: impl IntoIterator<Item = Fact>,
        outcomes: impl IntoIterator<Item = Vec<Fact>>,
    ) -> Self {
        Self {
            name: name.into(),
            precondition: precondition.into_iter().collect(),
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Creates an operator with a single outcome.
    pub fn deterministic(
        name: impl Into<String>,
        precondition: impl IntoIterator<Item = Fact>,
        effect: impl IntoIterator<Item = Fact>,
    ) -> Self {
        Self::new(name, precondition, [effect.into_iter().collect()])
    }

    pub fn is_deterministic(&self) -> bool {
        self.outcomes.len() == 1
    }

    pub fn is_applicable(&self, values: &[usize]) -> bool {
        self.precondition
            .iter()
            .all(|f| values.get(f.var) == Some(&f.value))
    }

    /// Variables assigned by any outcome, sorted and de-duplicated.
    pub fn affected_variables(&self) -> Vec<usize> {
        let mut vars: Vec<usize> = self.outcomes.iter().flatten().map(|f| f.var).collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Returns true if some outcome assigns `var`.
    pub fn affects(&self, var: usize) -> bool {
        self.outcomes.iter().flatten().any(|f| f.var == var)
    }
}
