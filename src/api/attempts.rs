//! Submission endpoint: validate, score, persist, respond.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::attempt::Attempt;
use crate::errors::AppError;
use crate::oracle::{CoachFeedback, ScoringRequest};
use crate::problems::{self, Problem};
use crate::profile::PreAttemptProfile;
use crate::scorecard::ScoringResult;
use crate::submission::validate_answers;
use crate::telemetry::{TelemetryEvent, TelemetrySummary};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub profile: PreAttemptProfile,
    pub diagnosis: String,
    pub next_steps: String,
    /// Raw interaction events; an absent or empty log still scores, with a
    /// degenerate telemetry summary.
    #[serde(default)]
    pub events: Vec<TelemetryEvent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub feedback: ScoringResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_feedback: Option<CoachFeedback>,
}

/// No telemetry at all still produces a valid summary: the problem's first
/// log section as the only visited section, zero time.
fn fallback_summary(problem: &Problem) -> TelemetrySummary {
    let first = problem
        .logs
        .first()
        .map(|l| l.service.clone())
        .unwrap_or_else(|| "overview".to_string());
    TelemetrySummary {
        time_spent_per_section: HashMap::from([(first.clone(), 0.0)]),
        navigation_order: vec![first],
        answer_revisions: 0,
    }
}

pub async fn submit_attempt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let problem = problems::find(&id)
        .ok_or_else(|| AppError::not_found(format!("unknown problem: {id}")))?;

    let answers = validate_answers(&request.diagnosis, &request.next_steps)?;

    let telemetry = TelemetrySummary::from_events(&request.events)
        .unwrap_or_else(|| fallback_summary(problem));

    let scoring_request = ScoringRequest {
        problem_description: problem.description.clone(),
        evaluation_rubric: problem.evaluation_rubric.clone(),
        diagnosis: answers.diagnosis,
        next_steps: answers.next_steps,
        interaction_data: serde_json::to_string(&telemetry)?,
    };

    // Evaluator and coach generations run concurrently. The scorecard is
    // required; a coach failure degrades to no coach feedback.
    let (feedback, coach) = tokio::join!(
        state.oracle.score(&scoring_request),
        state.oracle.coach(&scoring_request),
    );
    let feedback = feedback?;
    let coach_feedback = match coach {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::warn!("coach generation failed, returning scorecard only: {e}");
            None
        }
    };

    let attempt = Attempt {
        problem_id: problem.id.clone(),
        profile: request.profile,
        total_time_spent: telemetry.total_time(),
        telemetry,
        feedback: feedback.clone(),
        created_at: Utc::now().to_rfc3339(),
    };

    // Persistence is fire-and-forget: the candidate already has their score,
    // a store failure must not turn it into an error.
    let store = Arc::clone(&state.attempts);
    tokio::spawn(async move {
        if let Err(e) = store.append(&attempt).await {
            tracing::error!("failed to persist attempt: {e}");
        }
    });

    Ok(Json(SubmitResponse {
        feedback,
        coach_feedback,
    }))
}
