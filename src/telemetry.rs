//! Interaction-telemetry capture for one candidate session.
//!
//! The browser reports discrete events (tab switches, free-text edits, the
//! final submit); this module folds them into the compact summary the scoring
//! oracle and the analytics view consume. The fold is pure and cannot fail:
//! missing or sparse events only produce a degenerate-but-valid summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One raw interaction event, as reported by the client.
/// Timestamps are seconds; only differences between them matter, so epoch
/// seconds and session-relative seconds both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TelemetryEvent {
    SectionActivated { id: String, at: f64 },
    FieldEdited { field: String, at: f64 },
    Submitted { at: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySummary {
    /// Seconds attributed to each log section, cumulative across revisits.
    pub time_spent_per_section: HashMap<String, f64>,
    /// Section ids in visitation order, initial section included,
    /// submit marker excluded. Always non-empty.
    pub navigation_order: Vec<String>,
    /// Count of edit events across all tracked fields, no deduplication.
    pub answer_revisions: u32,
}

impl TelemetrySummary {
    /// Total session seconds: the sum of all per-section durations.
    pub fn total_time(&self) -> f64 {
        self.time_spent_per_section.values().sum()
    }

    /// Fold a raw event log into a summary. Events after the first
    /// `Submitted` are ignored; with no `Submitted` the last event's
    /// timestamp closes the session. Returns `None` only when the log holds
    /// no `SectionActivated` at all (nothing was ever visible).
    pub fn from_events(events: &[TelemetryEvent]) -> Option<TelemetrySummary> {
        let mut recorder: Option<TelemetryRecorder> = None;
        let mut last_at = 0.0_f64;
        let mut early_edits = 0u32;

        for event in events {
            match event {
                TelemetryEvent::SectionActivated { id, at } => {
                    last_at = *at;
                    match recorder.as_mut() {
                        Some(r) => r.section_activated(id.clone(), *at),
                        None => {
                            let mut r = TelemetryRecorder::start(id.clone(), *at);
                            r.revisions = early_edits;
                            recorder = Some(r);
                        }
                    }
                }
                TelemetryEvent::FieldEdited { field, at } => {
                    last_at = *at;
                    match recorder.as_mut() {
                        Some(r) => r.field_edited(field, *at),
                        None => early_edits += 1,
                    }
                }
                TelemetryEvent::Submitted { at } => {
                    return recorder.map(|r| r.finish(*at));
                }
            }
        }

        recorder.map(|r| r.finish(last_at))
    }
}

/// Accumulates one session's events. Constructed when the initial section
/// becomes visible, so `navigation_order` always has at least one entry.
#[derive(Debug)]
pub struct TelemetryRecorder {
    visits: Vec<(String, f64)>,
    revisions: u32,
}

impl TelemetryRecorder {
    pub fn start(initial_section: impl Into<String>, at: f64) -> Self {
        Self {
            visits: vec![(initial_section.into(), at)],
            revisions: 0,
        }
    }

    pub fn section_activated(&mut self, id: impl Into<String>, at: f64) {
        self.visits.push((id.into(), at));
    }

    /// Every keystroke-triggered edit counts; the field id is accepted for
    /// parity with the wire event but not tracked per-field.
    pub fn field_edited(&mut self, _field: &str, _at: f64) {
        self.revisions += 1;
    }

    /// Terminate the session. Each gap between consecutive activations is
    /// attributed to the earlier section; the synthetic submit marker closes
    /// the final gap but never accrues time itself.
    pub fn finish(self, submitted_at: f64) -> TelemetrySummary {
        let mut time_spent: HashMap<String, f64> = HashMap::new();
        let mut navigation_order = Vec::with_capacity(self.visits.len());

        for (i, (id, at)) in self.visits.iter().enumerate() {
            let next_at = match self.visits.get(i + 1) {
                Some((_, t)) => *t,
                None => submitted_at,
            };
            // Out-of-order timestamps clamp to zero rather than going negative.
            let elapsed = (next_at - at).max(0.0);
            *time_spent.entry(id.clone()).or_insert(0.0) += elapsed;
            navigation_order.push(id.clone());
        }

        TelemetrySummary {
            time_spent_per_section: time_spent,
            navigation_order,
            answer_revisions: self.revisions,
        }
    }
}
