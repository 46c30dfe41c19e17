//! Presentation sink - fire-and-forget reporting to the UI layer
//!
//! The core never renders anything; every user-visible message, sound
//! cue and counter update goes through [`PresentationSink`]. No return
//! values are consumed by the core.

use crate::core::types::{Grade, Percent};
use crate::summon::ladder::ProbabilityTable;

/// Outbound reporting contract with the UI layer
pub trait PresentationSink {
    /// Display a log line to the player
    fn report_message(&mut self, text: &str);

    /// Play the generic failure sound cue
    fn report_failure_sound(&mut self);

    /// Update the "units on board" counter display
    fn report_unit_count(&mut self, current: u32, max: u32);

    /// Republish the active probability table and enforcement level
    fn report_probability_table(&mut self, level: u32, max_level: u32, table: &ProbabilityTable);

    /// Publish the standing lucky-summon gem costs
    fn report_lucky_gem_costs(&mut self, costs: &[(Grade, Percent, u32)]);
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn report_message(&mut self, _text: &str) {}
    fn report_failure_sound(&mut self) {}
    fn report_unit_count(&mut self, _current: u32, _max: u32) {}
    fn report_probability_table(
        &mut self,
        _level: u32,
        _max_level: u32,
        _table: &ProbabilityTable,
    ) {
    }
    fn report_lucky_gem_costs(&mut self, _costs: &[(Grade, Percent, u32)]) {}
}

/// Sink that records everything, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<String>,
    pub failure_sounds: u32,
    pub unit_counts: Vec<(u32, u32)>,
    pub table_reports: Vec<(u32, u32)>,
    /// One entry per publication, each carrying the full offer list
    pub lucky_cost_reports: Vec<Vec<(Grade, Percent, u32)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl PresentationSink for RecordingSink {
    fn report_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn report_failure_sound(&mut self) {
        self.failure_sounds += 1;
    }

    fn report_unit_count(&mut self, current: u32, max: u32) {
        self.unit_counts.push((current, max));
    }

    fn report_probability_table(&mut self, level: u32, max_level: u32, _table: &ProbabilityTable) {
        self.table_reports.push((level, max_level));
    }

    fn report_lucky_gem_costs(&mut self, costs: &[(Grade, Percent, u32)]) {
        self.lucky_cost_reports.push(costs.to_vec());
    }
}

/// Sink that forwards to the tracing subscriber, used by the demo binary
#[derive(Debug, Default)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn report_message(&mut self, text: &str) {
        tracing::info!(target: "lucky_bastion::ui", "{}", text);
    }

    fn report_failure_sound(&mut self) {
        tracing::debug!(target: "lucky_bastion::ui", "sfx: failure");
    }

    fn report_unit_count(&mut self, current: u32, max: u32) {
        tracing::debug!(target: "lucky_bastion::ui", "units: {}/{}", current, max);
    }

    fn report_probability_table(&mut self, level: u32, max_level: u32, table: &ProbabilityTable) {
        tracing::info!(
            target: "lucky_bastion::ui",
            "probability level {}/{}: {:?} (next enforce cost {})",
            level,
            max_level,
            table.chances,
            table.enforce_cost
        );
    }

    fn report_lucky_gem_costs(&mut self, costs: &[(Grade, Percent, u32)]) {
        for (grade, chance, cost) in costs {
            tracing::info!(
                target: "lucky_bastion::ui",
                "lucky offer: {} at {}% for {} gems",
                grade,
                chance,
                cost
            );
        }
    }
}
