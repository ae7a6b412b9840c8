//! Deterministic HTN planning primitives.
//!
//! A [`HtnDomain`] holds the registration tables (operators per primitive task key, ordered
//! method alternatives per compound task key, and prune checks). [`HtnPlanner`] borrows a
//! domain and decomposes a list of tasks into a linear `htn-core::PlanSpec`, backtracking over
//! method alternatives and refused operators.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt::Debug;

pub mod check;
pub mod planner;

pub use check::{FnCheck, PruneCheck, SearchContext};
pub use planner::{HtnPlanner, HtnPlannerConfig, PlanError, Solution};

/// A task the planner can expand.
///
/// The key selects the handler table entry: an operator for primitive tasks, or the ordered
/// method alternatives for compound tasks. Tasks are compared by value.
pub trait HtnTask: Clone + PartialEq + Debug + 'static {
    type Key: Ord + Clone + Debug;

    fn key(&self) -> Self::Key;

    /// Human-readable rendering used in traces.
    fn label(&self) -> String {
        format!("{self:?}")
    }
}

/// Why an operator declined to apply. The state must be left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Refused {
    pub reason: String,
}

impl Refused {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Primitive state transition.
pub trait Operator<P, T> {
    fn name(&self) -> &str;

    /// Apply in place, or refuse without mutating `state`.
    fn apply(&self, state: &mut P, task: &T) -> Result<(), Refused>;
}

/// One decomposition alternative for a compound task.
pub trait Method<P, T> {
    fn name(&self) -> &str;

    /// `None` means the method is not applicable in `state`.
    fn decompose(&self, state: &P, task: &T) -> Option<Vec<T>>;
}

/// Closure-backed [`Operator`].
pub struct FnOperator<F> {
    name: String,
    apply: F,
}

impl<F> FnOperator<F> {
    pub fn new(name: impl Into<String>, apply: F) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }
}

impl<P, T, F> Operator<P, T> for FnOperator<F>
where
    F: Fn(&mut P, &T) -> Result<(), Refused>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, state: &mut P, task: &T) -> Result<(), Refused> {
        (self.apply)(state, task)
    }
}

/// Closure-backed [`Method`].
pub struct FnMethod<F> {
    name: String,
    decompose: F,
}

impl<F> FnMethod<F> {
    pub fn new(name: impl Into<String>, decompose: F) -> Self {
        Self {
            name: name.into(),
            decompose,
        }
    }
}

impl<P, T, F> Method<P, T> for FnMethod<F>
where
    F: Fn(&P, &T) -> Option<Vec<T>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decompose(&self, state: &P, task: &T) -> Option<Vec<T>> {
        (self.decompose)(state, task)
    }
}

/// Registration tables for one planning domain. Immutable once handed to a planner.
pub struct HtnDomain<P, T: HtnTask> {
    operators: BTreeMap<T::Key, Box<dyn Operator<P, T>>>,
    methods: BTreeMap<T::Key, Vec<Box<dyn Method<P, T>>>>,
    checks: Vec<Box<dyn PruneCheck<P, T>>>,
}

impl<P, T: HtnTask> Default for HtnDomain<P, T> {
    fn default() -> Self {
        Self {
            operators: BTreeMap::new(),
            methods: BTreeMap::new(),
            checks: Vec::new(),
        }
    }
}

impl<P, T: HtnTask> HtnDomain<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the operator for a primitive task key, replacing any earlier declaration.
    pub fn declare_operator(&mut self, key: T::Key, operator: impl Operator<P, T> + 'static) {
        self.operators.insert(key, Box::new(operator));
    }

    /// Declare the ordered alternatives for a compound task key, replacing any earlier list.
    pub fn declare_methods(&mut self, key: T::Key, methods: Vec<Box<dyn Method<P, T>>>) {
        self.methods.insert(key, methods);
    }

    /// Append one alternative to a compound task key.
    pub fn add_method(&mut self, key: T::Key, method: impl Method<P, T> + 'static) {
        self.methods.entry(key).or_default().push(Box::new(method));
    }

    /// Register a prune check consulted before every task expansion.
    pub fn add_check(&mut self, check: impl PruneCheck<P, T> + 'static) {
        self.checks.push(Box::new(check));
    }

    /// Register a closure as a prune check.
    pub fn add_check_fn<F>(&mut self, check: F)
    where
        F: Fn(&SearchContext<'_, P, T>) -> bool + 'static,
    {
        self.checks.push(Box::new(FnCheck(check)));
    }

    pub fn operator(&self, key: &T::Key) -> Option<&dyn Operator<P, T>> {
        self.operators.get(key).map(|op| op.as_ref())
    }

    pub fn methods(&self, key: &T::Key) -> &[Box<dyn Method<P, T>>] {
        self.methods.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn checks(&self) -> &[Box<dyn PruneCheck<P, T>>] {
        &self.checks
    }

    pub fn is_known(&self, key: &T::Key) -> bool {
        self.operators.contains_key(key) || self.methods.contains_key(key)
    }

    /// Registered operator names, ordered by task key.
    pub fn operator_names(&self) -> Vec<&str> {
        self.operators.values().map(|op| op.name()).collect()
    }

    /// Method names registered for `key`, in the order they are tried.
    pub fn method_names(&self, key: &T::Key) -> Vec<&str> {
        self.methods(key).iter().map(|m| m.name()).collect()
    }

    /// Compound task keys with at least one registered method.
    pub fn compound_keys(&self) -> impl Iterator<Item = &T::Key> {
        self.methods.keys()
    }
}
