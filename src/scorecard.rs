//! Typed view of the scoring oracle's verdict. The oracle returns free-form
//! JSON; everything here exists to parse-and-validate that payload at the
//! boundary so the rest of the system only ever sees well-formed scores.

use serde::{Deserialize, Serialize};

/// Five sub-scores, each bounded [0, 10].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub investigative_engagement: f64,
    pub signal_detection: f64,
    pub hypothesis_formation: f64,
    pub debugging_discipline: f64,
    pub decision_readiness: f64,
}

/// Enumerated sub-score dimensions with their chart labels, accessors, and
/// composite weights. This table replaces any label-string munging: the label
/// and the field it reads are declared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubScore {
    InvestigativeEngagement,
    SignalDetection,
    HypothesisFormation,
    DebuggingDiscipline,
    DecisionReadiness,
}

impl SubScore {
    /// All dimensions, in the defined sub-score order.
    pub const ALL: [SubScore; 5] = [
        SubScore::InvestigativeEngagement,
        SubScore::SignalDetection,
        SubScore::HypothesisFormation,
        SubScore::DebuggingDiscipline,
        SubScore::DecisionReadiness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SubScore::InvestigativeEngagement => "Investigative Engagement",
            SubScore::SignalDetection => "Signal Detection",
            SubScore::HypothesisFormation => "Hypothesis Formation",
            SubScore::DebuggingDiscipline => "Debugging Discipline",
            SubScore::DecisionReadiness => "Decision Readiness",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            SubScore::InvestigativeEngagement => 0.15,
            SubScore::SignalDetection => 0.30,
            SubScore::HypothesisFormation => 0.25,
            SubScore::DebuggingDiscipline => 0.15,
            SubScore::DecisionReadiness => 0.15,
        }
    }

    pub fn of(&self, scorecard: &Scorecard) -> f64 {
        match self {
            SubScore::InvestigativeEngagement => scorecard.investigative_engagement,
            SubScore::SignalDetection => scorecard.signal_detection,
            SubScore::HypothesisFormation => scorecard.hypothesis_formation,
            SubScore::DebuggingDiscipline => scorecard.debugging_discipline,
            SubScore::DecisionReadiness => scorecard.decision_readiness,
        }
    }
}

impl Scorecard {
    /// The composite the oracle is contracted to produce: the weighted sum of
    /// the sub-scores scaled by 10 and rounded to the nearest integer. The
    /// server does not recompute or enforce this on live results (the oracle
    /// is generation-backed and owns the arithmetic); it is documented here
    /// and checked against fixtures in tests.
    pub fn weighted_composite(&self) -> u32 {
        let weighted: f64 = SubScore::ALL.iter().map(|s| s.of(self) * s.weight()).sum();
        (weighted * 10.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Ready to Ship Independently")]
    ReadyToShip,
    #[serde(rename = "Requires Support")]
    RequiresSupport,
    #[serde(rename = "Not Ready for Production Work")]
    NotReady,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::ReadyToShip => "Ready to Ship Independently",
            Verdict::RequiresSupport => "Requires Support",
            Verdict::NotReady => "Not Ready for Production Work",
        }
    }
}

/// The oracle's complete answer for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub scorecard: Scorecard,
    /// Weighted composite, bounded [0, 100].
    pub shipping_readiness_score: u32,
    pub verdict: Verdict,
    pub justification: String,
}

impl ScoringResult {
    /// Bounds check on a freshly parsed oracle payload. The verdict and field
    /// shapes are already enforced by deserialization; this catches scores
    /// outside their documented ranges.
    pub fn validate(&self) -> Result<(), String> {
        for sub in SubScore::ALL {
            let v = sub.of(&self.scorecard);
            if !(0.0..=10.0).contains(&v) || !v.is_finite() {
                return Err(format!("{} out of range: {v}", sub.label()));
            }
        }
        if self.shipping_readiness_score > 100 {
            return Err(format!(
                "shippingReadinessScore out of range: {}",
                self.shipping_readiness_score
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: f64) -> Scorecard {
        Scorecard {
            investigative_engagement: score,
            signal_detection: score,
            hypothesis_formation: score,
            debugging_discipline: score,
            decision_readiness: score,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = SubScore::ALL.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_scorecard_implies_composite_100() {
        assert_eq!(uniform(10.0).weighted_composite(), 100);
    }

    #[test]
    fn composite_follows_the_documented_weights() {
        let scorecard = Scorecard {
            investigative_engagement: 8.0,
            signal_detection: 6.0,
            hypothesis_formation: 7.0,
            debugging_discipline: 9.0,
            decision_readiness: 5.0,
        };
        // (8*.15 + 6*.30 + 7*.25 + 9*.15 + 5*.15) * 10 = 68.5 -> 69
        assert_eq!(scorecard.weighted_composite(), 69);
    }

    #[test]
    fn verdict_wire_strings_round_trip() {
        let json = serde_json::to_string(&Verdict::NotReady).unwrap();
        assert_eq!(json, r#""Not Ready for Production Work""#);
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Verdict::NotReady);
    }

    #[test]
    fn validate_rejects_out_of_range_sub_score() {
        let result = ScoringResult {
            scorecard: uniform(11.0),
            shipping_readiness_score: 90,
            verdict: Verdict::ReadyToShip,
            justification: String::new(),
        };
        assert!(result.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_composite() {
        let result = ScoringResult {
            scorecard: uniform(5.0),
            shipping_readiness_score: 101,
            verdict: Verdict::RequiresSupport,
            justification: String::new(),
        };
        assert!(result.validate().is_err());
    }

    #[test]
    fn validate_accepts_in_range_payload() {
        let result = ScoringResult {
            scorecard: uniform(7.5),
            shipping_readiness_score: 75,
            verdict: Verdict::RequiresSupport,
            justification: "Solid navigation, missed the index warning.".to_string(),
        };
        assert!(result.validate().is_ok());
    }
}
