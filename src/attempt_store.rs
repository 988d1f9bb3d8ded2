//! Append-only persistence for scored attempts, backed by a sled tree. The
//! trait keeps handlers testable against an in-memory double.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::attempt::Attempt;
use crate::errors::AppError;

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Appends a new attempt and returns its generated id.
    async fn append(&self, attempt: &Attempt) -> Result<String, AppError>;
    /// Every stored attempt, in no particular order. Corrupt records are
    /// skipped with a warning rather than failing the whole read.
    async fn list_all(&self) -> Result<Vec<Attempt>, AppError>;
}

pub struct SledAttemptStore {
    tree: sled::Tree,
}

impl SledAttemptStore {
    pub fn new(db: &sled::Db) -> Result<Arc<Self>, AppError> {
        let tree = db.open_tree("attempts")?;
        Ok(Arc::new(Self { tree }))
    }
}

#[async_trait]
impl AttemptStore for SledAttemptStore {
    async fn append(&self, attempt: &Attempt) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let value = serde_json::to_vec(attempt)?;
        self.tree.insert(id.as_bytes(), value)?;
        self.tree.flush()?;
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Attempt>, AppError> {
        let mut attempts = Vec::new();
        for entry in self.tree.iter() {
            let (key, value) = entry?;
            match serde_json::from_slice::<Attempt>(&value) {
                Ok(attempt) => attempts.push(attempt),
                Err(e) => {
                    let key = String::from_utf8_lossy(&key);
                    tracing::warn!("skipping corrupt attempt record {key}: {e}");
                }
            }
        }
        Ok(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Background, Experience, PreAttemptProfile, ProdExperience};
    use crate::scorecard::{Scorecard, ScoringResult, Verdict};
    use crate::telemetry::TelemetrySummary;
    use std::collections::HashMap;

    fn sample_attempt() -> Attempt {
        Attempt {
            problem_id: "auth-latency".to_string(),
            profile: PreAttemptProfile {
                background: Background::BackendSystems,
                experience: Experience::Mid,
                prod_experience: ProdExperience::Yes,
            },
            total_time_spent: 120.0,
            telemetry: TelemetrySummary {
                time_spent_per_section: HashMap::from([("api-gateway".to_string(), 120.0)]),
                navigation_order: vec!["api-gateway".to_string()],
                answer_revisions: 2,
            },
            feedback: ScoringResult {
                scorecard: Scorecard {
                    investigative_engagement: 8.0,
                    signal_detection: 7.0,
                    hypothesis_formation: 7.0,
                    debugging_discipline: 6.0,
                    decision_readiness: 7.0,
                },
                shipping_readiness_score: 71,
                verdict: Verdict::RequiresSupport,
                justification: "Found the slow query.".to_string(),
            },
            created_at: "2024-06-10T11:30:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn append_then_list_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let store = SledAttemptStore::new(&db).unwrap();

        let id = store.append(&sample_attempt()).await.unwrap();
        assert!(!id.is_empty());

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].problem_id, "auth-latency");
        assert_eq!(all[0].feedback.shipping_readiness_score, 71);
    }

    #[tokio::test]
    async fn corrupt_record_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let store = SledAttemptStore::new(&db).unwrap();

        store.append(&sample_attempt()).await.unwrap();
        db.open_tree("attempts")
            .unwrap()
            .insert(b"broken", b"not json".to_vec())
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
