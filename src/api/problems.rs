//! Problem catalog endpoints. The candidate-facing views never include the
//! rubric or the official explanation; those only leave the server through
//! the post-submission explanation endpoint.

use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::problems::{self, Explanation, LogSection, Problem};

/// Listing row: enough to pick a problem, no incident content.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [String],
}

/// What a candidate may see before submitting.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProblem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub system_overview: &'static str,
    pub logs: &'static [LogSection],
    pub tags: &'static [String],
}

impl CandidateProblem {
    fn of(problem: &'static Problem) -> Self {
        Self {
            id: &problem.id,
            title: &problem.title,
            description: &problem.description,
            system_overview: &problem.system_overview,
            logs: &problem.logs,
            tags: &problem.tags,
        }
    }
}

pub async fn list_problems() -> Json<Vec<ProblemSummary>> {
    Json(
        problems::catalog()
            .iter()
            .map(|p| ProblemSummary {
                id: &p.id,
                title: &p.title,
                description: &p.description,
                tags: &p.tags,
            })
            .collect(),
    )
}

pub async fn get_problem(Path(id): Path<String>) -> Result<Json<CandidateProblem>, AppError> {
    let problem = problems::find(&id)
        .ok_or_else(|| AppError::not_found(format!("unknown problem: {id}")))?;
    Ok(Json(CandidateProblem::of(problem)))
}

pub async fn get_explanation(Path(id): Path<String>) -> Result<Json<&'static Explanation>, AppError> {
    let problem = problems::find(&id)
        .ok_or_else(|| AppError::not_found(format!("unknown problem: {id}")))?;
    Ok(Json(&problem.explanation))
}
