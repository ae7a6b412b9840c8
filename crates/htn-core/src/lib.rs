//! Deterministic, domain-agnostic HTN planning primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod plan;

pub use agent::AgentId;
pub use plan::PlanSpec;
