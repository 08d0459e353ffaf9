//! Patterns: the variable subsets that define one abstraction each.

use std::fmt;

use smallvec::SmallVec;

/// An immutable set of state-variable indices.
///
/// Elements are kept sorted and de-duplicated, so two patterns built from
/// the same variables in any order compare, hash and display identically.
///
/// # Example
///
/// ```
/// use pdbforge_core::Pattern;
///
/// let a = Pattern::new([2, 0, 2]);
/// let b = Pattern::new([0, 2]);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "{ 0 2 }");
/// assert!(Pattern::new([2]).is_subset_of(&a));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    vars: SmallVec<[usize; 4]>,
}

impl Pattern {
    /// Creates a pattern from any collection of variable indices.
    pub fn new(vars: impl IntoIterator<Item = usize>) -> Self {
        let mut vars: SmallVec<[usize; 4]> = vars.into_iter().collect();
        vars.sort_unstable();
        vars.dedup();
        Self { vars }
    }

    /// The empty pattern. Its abstraction has exactly one abstract state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorted variable indices.
    #[inline]
    pub fn vars(&self) -> &[usize] {
        &self.vars
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[inline]
    pub fn contains(&self, var: usize) -> bool {
        self.vars.binary_search(&var).is_ok()
    }

    /// Returns true if every variable of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Pattern) -> bool {
        // Both sides sorted: single merge pass.
        let mut theirs = other.vars.iter();
        'outer: for v in &self.vars {
            for w in theirs.by_ref() {
                if w == v {
                    continue 'outer;
                }
                if w > v {
                    return false;
                }
            }
            return false;
        }
        true
    }

    /// Returns true if the two patterns share at least one variable.
    pub fn intersects(&self, other: &Pattern) -> bool {
        self.vars.iter().any(|v| other.contains(*v))
    }

    /// Position of `var` inside the pattern, if present.
    #[inline]
    pub fn position(&self, var: usize) -> Option<usize> {
        self.vars.binary_search(&var).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.vars.iter().copied()
    }
}

impl FromIterator<usize> for Pattern {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<const N: usize> From<[usize; N]> for Pattern {
    fn from(vars: [usize; N]) -> Self {
        Self::new(vars)
    }
}

impl From<Vec<usize>> for Pattern {
    fn from(vars: Vec<usize>) -> Self {
        Self::new(vars)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for v in &self.vars {
            write!(f, "{v} ")?;
        }
        write!(f, "}}")
    }
}
