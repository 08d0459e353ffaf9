//! Projection of a problem onto a pattern.
//!
//! Abstract states are ranked with a mixed-radix perfect hash over the
//! pattern's variables, in pattern order.

use pdbforge_core::{ExplicitState, Fact, PdbError, Pattern, Problem, Result};
use smallvec::SmallVec;

const MAX_ABSTRACT_STATES: usize = u32::MAX as usize;

/// A fact over pattern positions instead of problem variables.
type LocalFact = (usize, usize);

/// An operator restricted to the pattern's variables.
#[derive(Debug, Clone)]
pub(crate) struct AbstractOperator {
    precondition: SmallVec<[LocalFact; 4]>,
    outcomes: Vec<SmallVec<[LocalFact; 4]>>,
}

impl AbstractOperator {
    fn is_applicable(&self, values: &[usize]) -> bool {
        self.precondition.iter().all(|&(pos, val)| values[pos] == val)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    pattern: Pattern,
    domains: Vec<usize>,
    multipliers: Vec<usize>,
    num_states: usize,
    operators: Vec<AbstractOperator>,
}

impl Projection {
    pub(crate) fn new(problem: &Problem, pattern: &Pattern) -> Result<Self> {
        problem.check_pattern(pattern)?;

        let domains: Vec<usize> = pattern.iter().map(|v| problem.domain_size(v)).collect();
        let mut multipliers = Vec::with_capacity(domains.len());
        let mut num_states: usize = 1;
        for &d in &domains {
            multipliers.push(num_states);
            num_states = num_states.checked_mul(d).ok_or_else(|| PdbError::TooLarge {
                pattern: pattern.clone(),
                states: exact_count(problem, pattern),
            })?;
        }

        // Ranks and distances are stored as `u32`.
        if num_states > MAX_ABSTRACT_STATES {
            return Err(PdbError::TooLarge {
                pattern: pattern.clone(),
                states: exact_count(problem, pattern),
            });
        }

        let local = |f: &Fact| pattern.position(f.var).map(|pos| (pos, f.value));
        let operators = problem
            .operators()
            .iter()
            // Operators that never touch the pattern only induce self-loops.
            .filter(|op| pattern.iter().any(|v| op.affects(v)))
            .filter_map(|op| {
                let precondition: SmallVec<[LocalFact; 4]> =
                    op.precondition.iter().filter_map(local).collect();
                if has_conflict(&precondition) {
                    return None;
                }
                let outcomes: Vec<SmallVec<[LocalFact; 4]>> = op
                    .outcomes
                    .iter()
                    .map(|effect| effect.iter().filter_map(local).collect())
                    .collect();
                Some(AbstractOperator {
                    precondition,
                    outcomes,
                })
            })
            .collect();

        Ok(Self {
            pattern: pattern.clone(),
            domains,
            multipliers,
            num_states,
            operators,
        })
    }

    pub(crate) fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub(crate) fn num_states(&self) -> usize {
        self.num_states
    }

    /// Rank of the abstract state a concrete state projects to.
    ///
    /// `state` must assign an in-domain value to every pattern variable
    /// (see [`Problem::check_state`]).
    #[inline]
    pub(crate) fn rank_state(&self, state: &ExplicitState) -> usize {
        debug_assert!(
            self.pattern
                .iter()
                .zip(&self.domains)
                .all(|(var, &d)| state.values().get(var).is_some_and(|&v| v < d)),
            "state {:?} does not fit pattern {}",
            state.values(),
            self.pattern
        );
        self.pattern
            .iter()
            .zip(&self.multipliers)
            .map(|(var, m)| state.value(var) * m)
            .sum()
    }

    #[inline]
    fn rank_local(&self, values: &[usize]) -> usize {
        values.iter().zip(&self.multipliers).map(|(v, m)| v * m).sum()
    }

    fn unrank_into(&self, mut index: usize, values: &mut [usize]) {
        for (slot, &d) in values.iter_mut().zip(&self.domains) {
            *slot = index % d;
            index /= d;
        }
    }

    /// Abstract states satisfying the conjunction `facts` restricted to the pattern.
    pub(crate) fn matching_states<'a>(
        &'a self,
        facts: &'a [Fact],
    ) -> impl Iterator<Item = usize> + 'a {
        let local: SmallVec<[LocalFact; 4]> = facts
            .iter()
            .filter_map(|f| self.pattern.position(f.var).map(|pos| (pos, f.value)))
            .collect();
        let conflict = has_conflict(&local);
        let mut values = vec![0; self.domains.len()];
        (0..self.num_states).filter(move |&index| {
            if conflict {
                return false;
            }
            self.unrank_into(index, &mut values);
            local.iter().all(|&(pos, val)| values[pos] == val)
        })
    }

    /// Calls `visit(state, operator, successors)` for every applicable
    /// abstract operator in every abstract state.
    pub(crate) fn for_each_transition(&self, mut visit: impl FnMut(usize, usize, &[usize])) {
        let mut values = vec![0; self.domains.len()];
        let mut succ = vec![0; self.domains.len()];
        let mut successors: SmallVec<[usize; 4]> = SmallVec::new();
        for index in 0..self.num_states {
            self.unrank_into(index, &mut values);
            for (op_id, op) in self.operators.iter().enumerate() {
                if !op.is_applicable(&values) {
                    continue;
                }
                successors.clear();
                for effect in &op.outcomes {
                    succ.copy_from_slice(&values);
                    for &(pos, val) in effect {
                        succ[pos] = val;
                    }
                    successors.push(self.rank_local(&succ));
                }
                visit(index, op_id, &successors);
            }
        }
    }
}

fn has_conflict(facts: &[LocalFact]) -> bool {
    facts
        .iter()
        .enumerate()
        .any(|(i, a)| facts[i + 1..].iter().any(|b| a.0 == b.0 && a.1 != b.1))
}

/// Number of abstract states of `pattern`, saturating at `u128::MAX`.
pub(crate) fn exact_count(problem: &Problem, pattern: &Pattern) -> u128 {
    pattern
        .iter()
        .map(|v| problem.domain_size(v) as u128)
        .fold(1u128, |acc, d| acc.saturating_mul(d))
}
