use core::fmt::Debug;
use core::hash::Hash;

/// Identifier of the agent a plan is built for.
///
/// State counts and tasks are keyed by agent, so identifiers need:
/// - stable ordering (`Ord`) for deterministic state iteration
/// - value equality (`Eq`, `Hash`) for task comparison during search
pub trait AgentId: Clone + Ord + Eq + Hash + Debug + 'static {}

impl AgentId for u64 {}

impl AgentId for u32 {}

impl AgentId for usize {}

impl AgentId for &'static str {}

impl AgentId for String {}
