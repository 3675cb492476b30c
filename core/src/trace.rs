//! Search trace: an ordered record of every state transition.
//!
//! Emission goes through a sink so the search itself stays oblivious to
//! whether anyone is listening; sinks observe, they never steer. The
//! no-op sink costs one `enabled()` check per event site.

use serde::Serialize;
use std::collections::BTreeMap;

/// One step of the combination search, with enough fields to replay the
/// run: scores, the remaining syllable counts, words so far, frontier size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Pop {
        score: f32,
        prefix: String,
        words: Vec<String>,
        remaining: BTreeMap<char, u32>,
        frontier_size: usize,
    },
    Commit {
        word: String,
        words: Vec<String>,
        score: f32,
        remaining: BTreeMap<char, u32>,
    },
    Extend {
        letter: char,
        next_prefix: String,
        score: f32,
        remaining: BTreeMap<char, u32>,
    },
    Prune {
        frontier_size: usize,
    },
    Result {
        combo: String,
        words: Vec<String>,
        word_scores: Vec<f32>,
        score: f32,
    },
    Complete {
        result_count: usize,
    },
}

/// Observer for search transitions.
pub trait TraceSink {
    /// Gate checked before an event is materialized.
    fn enabled(&self) -> bool {
        true
    }

    fn record(&mut self, event: TraceEvent);
}

/// Sink used when tracing is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _event: TraceEvent) {}
}

/// Collects events in emission order.
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
