use std::fmt::Debug;
use std::rc::Rc;

use htn_core::PlanSpec;
use htn_tools::{NullTraceSink, TraceEvent, TraceSink};

use crate::{HtnDomain, HtnTask, SearchContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtnPlannerConfig {
    /// Max number of operator applications and method decompositions before giving up.
    pub max_expansions: usize,

    /// Tracing verbosity: 0 silent, 1 search summary, 2 every expansion, 3 expansions with
    /// state dumps. Never affects the result.
    pub verbose: u8,
}

impl Default for HtnPlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 1 << 22,
            verbose: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("no decomposition of the root tasks leads to a complete plan")]
    Exhausted,

    #[error("search exceeded {limit} expansions")]
    BudgetExhausted { limit: usize },
}

/// A successful search: the primitive tasks in order and the state after applying them.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<P, T> {
    pub plan: PlanSpec<T>,
    pub state: P,
}

/// One choice point on the search path.
///
/// `agenda[0]` is the task being expanded. `plan_len`/`ancestors_len` are the lengths of the
/// shared plan and ancestor vectors when the frame was entered; both only grow along a path,
/// so truncating to them restores the frame's view on backtrack.
struct Frame<P, T> {
    state: Rc<P>,
    agenda: Vec<T>,
    plan_len: usize,
    ancestors_len: usize,
    depth: usize,
    next_alternative: usize,
}

enum Step<P, T> {
    Child(Frame<P, T>),
    Skip,
    Exhausted,
}

enum Entry<P, T> {
    Open(Frame<P, T>),
    Solved(Rc<P>),
    Pruned,
}

/// Depth-first, backtracking HTN planner over a borrowed [`HtnDomain`].
///
/// For the task at the head of the agenda the planner first tries the operator registered for
/// its key (applied to a copy of the current state), then each registered method in order.
/// Prune checks run before each task is expanded; a pruned branch is treated like an exhausted
/// one.
pub struct HtnPlanner<'d, P, T: HtnTask> {
    domain: &'d HtnDomain<P, T>,
    config: HtnPlannerConfig,
}

impl<'d, P, T> HtnPlanner<'d, P, T>
where
    P: Clone + Debug,
    T: HtnTask,
{
    pub fn new(domain: &'d HtnDomain<P, T>) -> Self {
        Self {
            domain,
            config: HtnPlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HtnPlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &HtnPlannerConfig {
        &self.config
    }

    pub fn domain(&self) -> &'d HtnDomain<P, T> {
        self.domain
    }

    pub fn plan(&self, start: &P, root: &[T]) -> Result<PlanSpec<T>, PlanError> {
        self.solve(start, root).map(|solution| solution.plan)
    }

    pub fn solve(&self, start: &P, root: &[T]) -> Result<Solution<P, T>, PlanError> {
        self.solve_traced(start, root, &mut NullTraceSink)
    }

    pub fn solve_traced(
        &self,
        start: &P,
        root: &[T],
        sink: &mut dyn TraceSink,
    ) -> Result<Solution<P, T>, PlanError> {
        if self.config.verbose >= 1 {
            tracing::info!(tasks = root.len(), "htn search started");
        }
        if sink.enabled() {
            sink.emit(
                TraceEvent::new(0, "htn.search.start")
                    .with_label(format!("{} tasks", root.len())),
            );
        }

        let result = self.search(start, root, sink);

        if self.config.verbose >= 1 {
            match &result {
                Ok(solution) => tracing::info!(steps = solution.plan.len(), "htn search solved"),
                Err(err) => tracing::info!(%err, "htn search failed"),
            }
        }
        result
    }

    fn search(
        &self,
        start: &P,
        root: &[T],
        sink: &mut dyn TraceSink,
    ) -> Result<Solution<P, T>, PlanError> {
        let mut plan: Vec<T> = Vec::new();
        let mut ancestors: Vec<T> = Vec::new();
        let mut frames: Vec<Frame<P, T>> = Vec::new();
        let mut expansions: usize = 0;

        let root_frame = Frame {
            state: Rc::new(start.clone()),
            agenda: root.to_vec(),
            plan_len: 0,
            ancestors_len: 0,
            depth: 0,
            next_alternative: 0,
        };
        match self.enter(root_frame, &plan, &ancestors, 0, sink) {
            Entry::Solved(state) => return Ok(self.finish(plan, state, 0, sink)),
            Entry::Pruned => return Err(self.fail(0, sink)),
            Entry::Open(frame) => frames.push(frame),
        }

        while let Some(frame) = frames.last_mut() {
            plan.truncate(frame.plan_len);
            ancestors.truncate(frame.ancestors_len);

            let alternative = frame.next_alternative;
            frame.next_alternative += 1;

            let task = &frame.agenda[0];
            let key = task.key();
            let operator = self.domain.operator(&key);
            let methods = self.domain.methods(&key);
            let offset = usize::from(operator.is_some());

            if alternative == 0 && operator.is_none() && methods.is_empty() {
                tracing::warn!(task = ?task, "no operator or method registered for task");
                if sink.enabled() {
                    sink.emit(
                        TraceEvent::new(expansions as u64, "htn.search.unknown_task")
                            .with_depth(frame.depth as u64)
                            .with_label(task.label()),
                    );
                }
            }

            let step = if alternative < offset {
                expansions += 1;
                if expansions > self.config.max_expansions {
                    return Err(self.budget_exhausted(expansions, sink));
                }
                self.trace_expand(expansions, frame, sink);

                let Some(operator) = operator else {
                    // offset > 0 implies an operator is registered.
                    return Err(PlanError::Exhausted);
                };
                let mut next = P::clone(&frame.state);
                match operator.apply(&mut next, task) {
                    Ok(()) => {
                        plan.push(task.clone());
                        if self.config.verbose >= 3 {
                            tracing::trace!(
                                operator = operator.name(),
                                state = ?next,
                                "operator applied"
                            );
                        }
                        Step::Child(Frame {
                            state: Rc::new(next),
                            agenda: frame.agenda[1..].to_vec(),
                            plan_len: plan.len(),
                            ancestors_len: ancestors.len(),
                            depth: frame.depth + 1,
                            next_alternative: 0,
                        })
                    }
                    Err(refused) => {
                        if self.config.verbose >= 2 {
                            tracing::debug!(
                                operator = operator.name(),
                                %refused,
                                "operator refused"
                            );
                        }
                        if sink.enabled() {
                            sink.emit(
                                TraceEvent::new(expansions as u64, "htn.operator.refused")
                                    .with_depth(frame.depth as u64)
                                    .with_label(format!("{}: {refused}", operator.name())),
                            );
                        }
                        Step::Skip
                    }
                }
            } else if let Some(method) = methods.get(alternative - offset) {
                expansions += 1;
                if expansions > self.config.max_expansions {
                    return Err(self.budget_exhausted(expansions, sink));
                }
                self.trace_expand(expansions, frame, sink);

                match method.decompose(&frame.state, task) {
                    Some(subtasks) => {
                        if self.config.verbose >= 2 {
                            tracing::debug!(
                                method = method.name(),
                                depth = frame.depth,
                                subtasks = subtasks.len(),
                                "method applied"
                            );
                        }
                        ancestors.push(task.clone());
                        let mut agenda = subtasks;
                        agenda.extend_from_slice(&frame.agenda[1..]);
                        Step::Child(Frame {
                            state: Rc::clone(&frame.state),
                            agenda,
                            plan_len: plan.len(),
                            ancestors_len: ancestors.len(),
                            depth: frame.depth + 1,
                            next_alternative: 0,
                        })
                    }
                    None => Step::Skip,
                }
            } else {
                Step::Exhausted
            };

            match step {
                Step::Child(child) => match self.enter(child, &plan, &ancestors, expansions, sink) {
                    Entry::Open(child) => frames.push(child),
                    Entry::Solved(state) => return Ok(self.finish(plan, state, expansions, sink)),
                    Entry::Pruned => {}
                },
                Step::Skip => {}
                Step::Exhausted => {
                    if let Some(done) = frames.pop() {
                        if self.config.verbose >= 2 {
                            tracing::debug!(
                                task = ?done.agenda[0],
                                depth = done.depth,
                                "alternatives exhausted"
                            );
                        }
                        if sink.enabled() {
                            sink.emit(
                                TraceEvent::new(expansions as u64, "htn.method.exhausted")
                                    .with_depth(done.depth as u64)
                                    .with_label(done.agenda[0].label()),
                            );
                        }
                    }
                }
            }
        }

        Err(self.fail(expansions, sink))
    }

    /// Run the prune checks for a freshly created frame.
    fn enter(
        &self,
        frame: Frame<P, T>,
        plan: &[T],
        ancestors: &[T],
        expansions: usize,
        sink: &mut dyn TraceSink,
    ) -> Entry<P, T> {
        let Some((task, remaining)) = frame.agenda.split_first() else {
            return Entry::Solved(frame.state);
        };

        let ctx = SearchContext::new(
            frame.state.as_ref(),
            task,
            remaining,
            plan,
            frame.depth,
            ancestors,
        );
        if self.domain.checks().iter().any(|check| check.should_prune(&ctx)) {
            if self.config.verbose >= 2 {
                tracing::debug!(task = ?task, depth = frame.depth, "branch pruned");
            }
            if sink.enabled() {
                sink.emit(
                    TraceEvent::new(expansions as u64, "htn.search.prune")
                        .with_depth(frame.depth as u64)
                        .with_label(task.label()),
                );
            }
            return Entry::Pruned;
        }

        Entry::Open(frame)
    }

    fn trace_expand(&self, expansions: usize, frame: &Frame<P, T>, sink: &mut dyn TraceSink) {
        if self.config.verbose >= 2 {
            tracing::debug!(
                depth = frame.depth,
                task = ?frame.agenda[0],
                pending = frame.agenda.len() - 1,
                "expanding task"
            );
        }
        if sink.enabled() {
            sink.emit(
                TraceEvent::new(expansions as u64, "htn.search.expand")
                    .with_depth(frame.depth as u64)
                    .with_label(frame.agenda[0].label()),
            );
        }
    }

    fn finish(
        &self,
        plan: Vec<T>,
        state: Rc<P>,
        expansions: usize,
        sink: &mut dyn TraceSink,
    ) -> Solution<P, T> {
        if sink.enabled() {
            sink.emit(
                TraceEvent::new(expansions as u64, "htn.search.solved")
                    .with_label(format!("{} steps", plan.len())),
            );
        }
        let state = Rc::try_unwrap(state).unwrap_or_else(|shared| P::clone(&shared));
        Solution {
            plan: PlanSpec::new(plan),
            state,
        }
    }

    fn fail(&self, expansions: usize, sink: &mut dyn TraceSink) -> PlanError {
        if sink.enabled() {
            sink.emit(TraceEvent::new(expansions as u64, "htn.search.failed"));
        }
        PlanError::Exhausted
    }

    fn budget_exhausted(&self, expansions: usize, sink: &mut dyn TraceSink) -> PlanError {
        let limit = self.config.max_expansions;
        tracing::warn!(limit, "htn search expansion budget exhausted");
        if sink.enabled() {
            sink.emit(TraceEvent::new(expansions as u64, "htn.search.budget_exhausted"));
        }
        PlanError::BudgetExhausted { limit }
    }
}
