//! Persistence for company-assembled problem sets. Same sled-tree shape as
//! the attempt store, separate tree.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// A saved problem set. `problem_ids` are resolved and frozen at creation
/// time, so a random selection stays stable after it is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub title: String,
    pub problem_ids: Vec<String>,
    /// "manual" or "random"; recorded for display only.
    pub mode: String,
    /// RFC 3339 / ISO-8601.
    pub created_at: String,
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn append(&self, assessment: &Assessment) -> Result<String, AppError>;
    async fn list_all(&self) -> Result<Vec<(String, Assessment)>, AppError>;
}

pub struct SledAssessmentStore {
    tree: sled::Tree,
}

impl SledAssessmentStore {
    pub fn new(db: &sled::Db) -> Result<Arc<Self>, AppError> {
        let tree = db.open_tree("assessments")?;
        Ok(Arc::new(Self { tree }))
    }
}

#[async_trait]
impl AssessmentStore for SledAssessmentStore {
    async fn append(&self, assessment: &Assessment) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let value = serde_json::to_vec(assessment)?;
        self.tree.insert(id.as_bytes(), value)?;
        self.tree.flush()?;
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<(String, Assessment)>, AppError> {
        let mut assessments = Vec::new();
        for entry in self.tree.iter() {
            let (key, value) = entry?;
            let id = String::from_utf8_lossy(&key).to_string();
            match serde_json::from_slice::<Assessment>(&value) {
                Ok(assessment) => assessments.push((id, assessment)),
                Err(e) => tracing::warn!("skipping corrupt assessment record {id}: {e}"),
            }
        }
        Ok(assessments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_then_list_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let store = SledAssessmentStore::new(&db).unwrap();

        let id = store
            .append(&Assessment {
                title: "Backend screen".to_string(),
                problem_ids: vec!["auth-latency".to_string(), "payment-cascade".to_string()],
                mode: "manual".to_string(),
                created_at: "2024-06-10T11:30:00Z".to_string(),
            })
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, id);
        assert_eq!(all[0].1.problem_ids.len(), 2);
    }
}
