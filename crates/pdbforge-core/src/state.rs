//! States and beliefs as seen by heuristics.

use rand::seq::index;
use rand::Rng;

/// A fully specified world: one value per variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplicitState {
    values: Vec<usize>,
}

impl ExplicitState {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    #[inline]
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    #[inline]
    pub fn value(&self, var: usize) -> usize {
        self.values[var]
    }
}

/// A set of possible worlds.
///
/// # Example
///
/// ```
/// use pdbforge_core::{BeliefState, ExplicitState};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let belief = BeliefState::new([
///     ExplicitState::new([0, 0]),
///     ExplicitState::new([0, 1]),
///     ExplicitState::new([1, 1]),
/// ]);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
///
/// assert_eq!(belief.sample_worlds(10, &mut rng).len(), 3);
/// assert_eq!(belief.sample_worlds(2, &mut rng).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeliefState {
    worlds: Vec<ExplicitState>,
}

impl BeliefState {
    /// Creates a belief; duplicate worlds are collapsed.
    pub fn new(worlds: impl IntoIterator<Item = ExplicitState>) -> Self {
        let mut unique: Vec<ExplicitState> = Vec::new();
        for w in worlds {
            if !unique.contains(&w) {
                unique.push(w);
            }
        }
        Self { worlds: unique }
    }

    pub fn worlds(&self) -> &[ExplicitState] {
        &self.worlds
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Draws up to `amount` distinct worlds uniformly at random.
    ///
    /// When `amount` covers the whole belief every world is returned in
    /// insertion order and `rng` is left untouched.
    pub fn sample_worlds<R: Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Vec<&ExplicitState> {
        if amount >= self.worlds.len() {
            return self.worlds.iter().collect();
        }
        let mut picked: Vec<usize> = index::sample(rng, self.worlds.len(), amount).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| &self.worlds[i]).collect()
    }
}

/// The state handed to a heuristic by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    Explicit(ExplicitState),
    Belief(BeliefState),
}

impl State {
    pub fn is_belief(&self) -> bool {
        matches!(self, State::Belief(_))
    }
}

impl From<ExplicitState> for State {
    fn from(s: ExplicitState) -> Self {
        State::Explicit(s)
    }
}

impl From<BeliefState> for State {
    fn from(b: BeliefState) -> Self {
        State::Belief(b)
    }
}
