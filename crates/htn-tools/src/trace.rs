#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A small, allocation-friendly search trace event.
///
/// This is intentionally "dumb data" so it can be recorded during a search and later rendered
/// by tooling. `step` is the planner's expansion counter, `depth` the decomposition depth the
/// event happened at, and `label` an optional rendering of the task involved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub step: u64,
    pub tag: Cow<'static, str>,
    pub depth: u64,
    pub label: Option<String>,
}

impl TraceEvent {
    pub fn new(step: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            step,
            tag: tag.into(),
            depth: 0,
            label: None,
        }
    }

    pub fn with_depth(mut self, depth: u64) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);

    /// Whether events are recorded at all. Emitters may skip building labels when this is
    /// `false`.
    fn enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Forwards every event to two sinks.
pub struct TeeTraceSink<'a> {
    pub first: &'a mut dyn TraceSink,
    pub second: &'a mut dyn TraceSink,
}

impl<'a> TeeTraceSink<'a> {
    pub fn new(first: &'a mut dyn TraceSink, second: &'a mut dyn TraceSink) -> Self {
        Self { first, second }
    }
}

impl TraceSink for TeeTraceSink<'_> {
    fn emit(&mut self, event: TraceEvent) {
        if self.first.enabled() {
            self.first.emit(event.clone());
        }
        if self.second.enabled() {
            self.second.emit(event);
        }
    }

    fn enabled(&self) -> bool {
        self.first.enabled() || self.second.enabled()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.with_tag(tag).count()
    }

    pub fn max_depth(&self) -> u64 {
        self.events.iter().map(|e| e.depth).max().unwrap_or(0)
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
