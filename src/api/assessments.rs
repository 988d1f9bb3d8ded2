//! Company portal: assemble and list problem sets. Selection is either an
//! explicit id list or a random draw filtered by tags; either way the ids are
//! resolved and frozen before the assessment is saved.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::assessment_store::Assessment;
use crate::errors::AppError;
use crate::problems;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentRequest {
    pub title: String,
    #[serde(flatten)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Selection {
    #[serde(rename_all = "camelCase")]
    Manual { problem_ids: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Random {
        count: usize,
        #[serde(default)]
        tags: Vec<String>,
    },
}

impl Selection {
    fn mode(&self) -> &'static str {
        match self {
            Selection::Manual { .. } => "manual",
            Selection::Random { .. } => "random",
        }
    }
}

/// Turns a selection into a concrete, validated id list. Manual ids must all
/// exist; a random draw needs at least one matching problem and caps the
/// count at the pool size.
pub fn resolve_selection(selection: &Selection) -> Result<Vec<String>, AppError> {
    match selection {
        Selection::Manual { problem_ids } => {
            if problem_ids.is_empty() {
                return Err(AppError::bad_request("at least one problem is required"));
            }
            for id in problem_ids {
                if problems::find(id).is_none() {
                    return Err(AppError::bad_request(format!("unknown problem: {id}")));
                }
            }
            Ok(problem_ids.clone())
        }
        Selection::Random { count, tags } => {
            if *count == 0 {
                return Err(AppError::bad_request("count must be at least 1"));
            }
            let pool = problems::filter_by_tags(tags);
            if pool.is_empty() {
                return Err(AppError::bad_request("no problems match the given tags"));
            }
            let mut rng = rand::rng();
            let picked = pool
                .choose_multiple(&mut rng, (*count).min(pool.len()))
                .map(|p| p.id.clone())
                .collect();
            Ok(picked)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentView {
    pub id: String,
    #[serde(flatten)]
    pub assessment: Assessment,
}

pub async fn create_assessment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAssessmentRequest>,
) -> Result<Json<AssessmentView>, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("title is required"));
    }

    let problem_ids = resolve_selection(&request.selection)?;
    let assessment = Assessment {
        title: title.to_string(),
        problem_ids,
        mode: request.selection.mode().to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    let id = state.assessments.append(&assessment).await?;
    Ok(Json(AssessmentView { id, assessment }))
}

pub async fn list_assessments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssessmentView>>, AppError> {
    let mut all = state.assessments.list_all().await?;
    all.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));
    Ok(Json(
        all.into_iter()
            .map(|(id, assessment)| AssessmentView { id, assessment })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_selection_requires_known_ids() {
        let ok = resolve_selection(&Selection::Manual {
            problem_ids: vec!["auth-latency".to_string(), "k8s-crashloop".to_string()],
        })
        .unwrap();
        assert_eq!(ok.len(), 2);

        let err = resolve_selection(&Selection::Manual {
            problem_ids: vec!["nope".to_string()],
        });
        assert!(matches!(err, Err(AppError::BadRequest(_))));

        let err = resolve_selection(&Selection::Manual {
            problem_ids: vec![],
        });
        assert!(matches!(err, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn random_selection_draws_from_the_tag_pool() {
        let ids = resolve_selection(&Selection::Random {
            count: 2,
            tags: vec!["performance".to_string()],
        })
        .unwrap();
        assert_eq!(ids.len(), 2);
        for id in &ids {
            let problem = problems::find(id).unwrap();
            assert!(problem.tags.iter().any(|t| t == "performance"));
        }
    }

    #[test]
    fn random_count_caps_at_pool_size() {
        let ids = resolve_selection(&Selection::Random {
            count: 50,
            tags: vec![],
        })
        .unwrap();
        assert_eq!(ids.len(), problems::catalog().len());
    }

    #[test]
    fn random_selection_rejects_unmatched_tags() {
        let err = resolve_selection(&Selection::Random {
            count: 1,
            tags: vec!["quantum".to_string()],
        });
        assert!(matches!(err, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn selection_wire_format_is_tagged_by_mode() {
        let manual: CreateAssessmentRequest = serde_json::from_str(
            r#"{"title":"Screen","mode":"manual","problemIds":["auth-latency"]}"#,
        )
        .unwrap();
        assert!(matches!(manual.selection, Selection::Manual { .. }));

        let random: CreateAssessmentRequest = serde_json::from_str(
            r#"{"title":"Screen","mode":"random","count":2,"tags":["devops"]}"#,
        )
        .unwrap();
        assert!(matches!(random.selection, Selection::Random { count: 2, .. }));
    }
}
