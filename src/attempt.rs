use serde::{Deserialize, Serialize};

use crate::profile::PreAttemptProfile;
use crate::scorecard::ScoringResult;
use crate::telemetry::TelemetrySummary;

/// One completed and scored session. Created exactly once at submission time,
/// appended to the store, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub problem_id: String,
    #[serde(flatten)]
    pub profile: PreAttemptProfile,
    /// Wall-clock seconds from first observation to submission.
    pub total_time_spent: f64,
    pub telemetry: TelemetrySummary,
    pub feedback: ScoringResult,
    /// RFC 3339 / ISO-8601.
    pub created_at: String,
}
