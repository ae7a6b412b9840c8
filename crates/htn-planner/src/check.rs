//! Prune checks consulted before each task expansion.

/// Everything a prune check may look at. Borrowed from the planner; checks cannot mutate it.
#[derive(Debug)]
pub struct SearchContext<'a, P, T> {
    /// State the task would be expanded in.
    pub state: &'a P,
    /// Task about to be expanded.
    pub task: &'a T,
    /// Pending tasks after `task`, in execution order.
    pub remaining: &'a [T],
    /// Primitive tasks applied so far on this search path.
    pub plan: &'a [T],
    /// Decomposition depth of `task` (root tasks are at depth 0).
    pub depth: usize,
    /// Compound tasks decomposed on this search path, oldest first.
    pub ancestors: &'a [T],
}

impl<'a, P, T> SearchContext<'a, P, T> {
    pub fn new(
        state: &'a P,
        task: &'a T,
        remaining: &'a [T],
        plan: &'a [T],
        depth: usize,
        ancestors: &'a [T],
    ) -> Self {
        Self {
            state,
            task,
            remaining,
            plan,
            depth,
            ancestors,
        }
    }
}

impl<P, T> Clone for SearchContext<'_, P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, T> Copy for SearchContext<'_, P, T> {}

/// Returns `true` to abandon the branch rooted at `ctx.task`.
///
/// Checks must be pure: the planner may call them any number of times per node.
pub trait PruneCheck<P, T> {
    fn should_prune(&self, ctx: &SearchContext<'_, P, T>) -> bool;
}

/// Closure-backed [`PruneCheck`].
pub struct FnCheck<F>(pub F);

impl<P, T, F> PruneCheck<P, T> for FnCheck<F>
where
    F: Fn(&SearchContext<'_, P, T>) -> bool,
{
    fn should_prune(&self, ctx: &SearchContext<'_, P, T>) -> bool {
        (self.0)(ctx)
    }
}
