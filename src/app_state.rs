use std::sync::Arc;

use crate::assessment_store::AssessmentStore;
use crate::attempt_store::AttemptStore;
use crate::config_loader::ShipreadyConfig;
use crate::oracle::ScoringOracle;

/// Shared handler state. Stores and the oracle sit behind trait objects so
/// integration tests can assemble a router with doubles.
pub struct AppState {
    pub config: ShipreadyConfig,
    pub attempts: Arc<dyn AttemptStore>,
    pub assessments: Arc<dyn AssessmentStore>,
    pub oracle: Arc<dyn ScoringOracle>,
}

impl AppState {
    pub fn new(
        config: ShipreadyConfig,
        attempts: Arc<dyn AttemptStore>,
        assessments: Arc<dyn AssessmentStore>,
        oracle: Arc<dyn ScoringOracle>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            attempts,
            assessments,
            oracle,
        })
    }
}
