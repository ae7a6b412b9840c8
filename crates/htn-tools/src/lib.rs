//! Tooling primitives for deterministic HTN planning.
//!
//! This crate is intentionally lightweight and planner-agnostic: planners emit plain trace
//! events into a caller-provided sink, and tooling renders them later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TeeTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
