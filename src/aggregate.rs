//! Cohort aggregation over persisted attempts.
//!
//! Pure functions: every invocation recomputes from its input snapshot, no
//! caching, no shared state. Groups form in first-seen order; a cohort with
//! zero attempts never appears in any output.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::attempt::Attempt;
use crate::scorecard::SubScore;

/// The profile attribute a cohort is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Background,
    Experience,
    ProdExperience,
}

impl Dimension {
    pub fn value_of<'a>(&self, attempt: &'a Attempt) -> &'a str {
        match self {
            Dimension::Background => attempt.profile.background.as_str(),
            Dimension::Experience => attempt.profile.experience.as_str(),
            Dimension::ProdExperience => attempt.profile.prod_experience.as_str(),
        }
    }
}

/// One bar in a per-cohort score chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortScore {
    pub name: String,
    /// Mean composite score, rounded to the nearest integer.
    pub avg_score: i64,
    pub count: usize,
}

/// Mean composite score per distinct cohort value. Empty input gives an
/// empty output, never an error.
pub fn aggregate_by_dimension(attempts: &[Attempt], dimension: Dimension) -> Vec<CohortScore> {
    let mut groups: Vec<(String, f64, usize)> = Vec::new();

    for attempt in attempts {
        let key = dimension.value_of(attempt);
        let score = f64::from(attempt.feedback.shipping_readiness_score);
        match groups.iter_mut().find(|(name, _, _)| name == key) {
            Some((_, total, count)) => {
                *total += score;
                *count += 1;
            }
            None => groups.push((key.to_string(), score, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(name, total, count)| CohortScore {
            name,
            avg_score: (total / count as f64).round() as i64,
            count,
        })
        .collect()
}

/// One radar-chart axis: a sub-score dimension with one column per cohort
/// holding that cohort's mean for the sub-score, rounded to one decimal.
/// Serializes flattened (`{"dimension": "Signal Detection", "Student": 6.3}`)
/// because that is the shape radar charts consume.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarRow {
    pub dimension: &'static str,
    pub series: Vec<(String, f64)>,
}

impl Serialize for RadarRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.series.len()))?;
        map.serialize_entry("dimension", self.dimension)?;
        for (cohort, mean) in &self.series {
            map.serialize_entry(cohort, mean)?;
        }
        map.end()
    }
}

/// Per-cohort mean of each of the five sub-scores, transposed to one row per
/// sub-score. Exactly five rows whenever `attempts` is non-empty; empty input
/// yields an empty vector rather than five column-less rows, matching the
/// no-synthesized-zero-rows rule.
pub fn aggregate_subscores_by_dimension(
    attempts: &[Attempt],
    dimension: Dimension,
) -> Vec<RadarRow> {
    if attempts.is_empty() {
        return Vec::new();
    }

    // First-seen cohort order; one accumulator slot per sub-score.
    let mut groups: Vec<(String, [f64; 5], usize)> = Vec::new();

    for attempt in attempts {
        let key = dimension.value_of(attempt);
        let slot = match groups.iter_mut().find(|(name, _, _)| name == key) {
            Some(entry) => entry,
            None => {
                groups.push((key.to_string(), [0.0; 5], 0));
                groups.last_mut().expect("just pushed")
            }
        };
        for (i, sub) in SubScore::ALL.iter().enumerate() {
            slot.1[i] += sub.of(&attempt.feedback.scorecard);
        }
        slot.2 += 1;
    }

    SubScore::ALL
        .iter()
        .enumerate()
        .map(|(i, sub)| RadarRow {
            dimension: sub.label(),
            series: groups
                .iter()
                .map(|(name, sums, count)| (name.clone(), round1(sums[i] / *count as f64)))
                .collect(),
        })
        .collect()
}

/// Top-level dashboard values, all from the same reduce-and-divide pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_attempts: usize,
    /// Mean composite score across all attempts; 0 with no data.
    pub avg_score: i64,
    /// Mean total session seconds; 0 with no data.
    pub avg_time_seconds: i64,
    /// Highest-averaging background cohort, ties broken by first encountered.
    pub top_cohort: Option<CohortScore>,
}

pub fn dashboard_summary(attempts: &[Attempt]) -> Summary {
    let total_attempts = attempts.len();
    let (avg_score, avg_time_seconds) = if total_attempts == 0 {
        (0, 0)
    } else {
        let score_sum: f64 = attempts
            .iter()
            .map(|a| f64::from(a.feedback.shipping_readiness_score))
            .sum();
        let time_sum: f64 = attempts.iter().map(|a| a.total_time_spent).sum();
        (
            (score_sum / total_attempts as f64).round() as i64,
            (time_sum / total_attempts as f64).round() as i64,
        )
    };

    let by_background = aggregate_by_dimension(attempts, Dimension::Background);
    let top_cohort = by_background
        .into_iter()
        .reduce(|best, curr| if curr.avg_score > best.avg_score { curr } else { best });

    Summary {
        total_attempts,
        avg_score,
        avg_time_seconds,
        top_cohort,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
