//! Analytics dashboard endpoint. One read of the attempt store, all
//! aggregates computed fresh from that snapshot. A failed read is treated as
//! an empty dataset rather than an error: the dashboard always renders.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::aggregate::{
    aggregate_by_dimension, aggregate_subscores_by_dimension, dashboard_summary, CohortScore,
    Dimension, RadarRow, Summary,
};
use crate::app_state::AppState;
use crate::attempt::Attempt;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub summary: Summary,
    pub by_background: Vec<CohortScore>,
    pub by_experience: Vec<CohortScore>,
    pub by_prod_experience: Vec<CohortScore>,
    /// Sub-score radar, cohorted by background.
    pub skill_radar: Vec<RadarRow>,
    /// All attempts, newest first.
    pub attempts: Vec<Attempt>,
}

pub async fn get_analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsResponse> {
    let mut attempts = match state.attempts.list_all().await {
        Ok(attempts) => attempts,
        Err(e) => {
            tracing::warn!("attempt store read failed, rendering empty dashboard: {e}");
            Vec::new()
        }
    };
    attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Json(AnalyticsResponse {
        summary: dashboard_summary(&attempts),
        by_background: aggregate_by_dimension(&attempts, Dimension::Background),
        by_experience: aggregate_by_dimension(&attempts, Dimension::Experience),
        by_prod_experience: aggregate_by_dimension(&attempts, Dimension::ProdExperience),
        skill_radar: aggregate_subscores_by_dimension(&attempts, Dimension::Background),
        attempts,
    })
}
