#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Plan data: the ordered primitive steps a planner produced.
///
/// Planners emit one `S` per applied operator. The steps are plain values so a
/// plan can be logged, compared in tests, or handed to an executor later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSpec<S> {
    pub steps: Vec<S>,
}

impl<S> PlanSpec<S> {
    pub fn new(steps: Vec<S>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, S> {
        self.steps.iter()
    }

    /// Number of steps for which `pred` holds.
    pub fn count_where(&self, mut pred: impl FnMut(&S) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(s)).count()
    }
}

impl<S> Default for PlanSpec<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S> FromIterator<S> for PlanSpec<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, S> IntoIterator for &'a PlanSpec<S> {
    type Item = &'a S;
    type IntoIter = core::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<S> IntoIterator for PlanSpec<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
