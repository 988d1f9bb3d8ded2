//! LLM-backed scoring. Two generations per submission: the evaluator prompt
//! produces the scorecard and verdict, the coach prompt produces growth
//! feedback. Both go through one OpenAI-compatible chat-completions client;
//! the trait exists so handlers and tests can swap in a canned oracle.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config_loader::OracleConfig;
use crate::errors::AppError;
use crate::scorecard::ScoringResult;

/// Everything the evaluator sees about one attempt.
#[derive(Debug, Clone)]
pub struct ScoringRequest {
    pub problem_description: String,
    pub evaluation_rubric: String,
    pub diagnosis: String,
    pub next_steps: String,
    /// JSON-encoded telemetry summary.
    pub interaction_data: String,
}

/// Growth-oriented feedback from the coach generation. Optional on the wire:
/// a coach failure never blocks the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachFeedback {
    pub strengths: String,
    pub areas_for_improvement: String,
    pub blind_spots: String,
    pub overall_feedback: String,
}

#[async_trait]
pub trait ScoringOracle: Send + Sync {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoringResult, AppError>;
    async fn coach(&self, request: &ScoringRequest) -> Result<CoachFeedback, AppError>;
}

pub struct HttpScoringOracle {
    http: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpScoringOracle {
    pub fn new(config: &OracleConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            url: config.url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AppError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.2,
        });

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::oracle(format!("upstream returned {status}")));
        }

        let payload: serde_json::Value = response.json().await?;
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::oracle("no completion content in response"))
    }
}

#[async_trait]
impl ScoringOracle for HttpScoringOracle {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoringResult, AppError> {
        let raw = self
            .complete(EVALUATOR_SYSTEM_PROMPT, &evaluator_user_prompt(request))
            .await?;
        let result: ScoringResult = serde_json::from_str(extract_json_block(&raw))
            .map_err(|e| AppError::oracle(format!("malformed scorecard payload: {e}")))?;
        result.validate().map_err(AppError::oracle)?;
        Ok(result)
    }

    async fn coach(&self, request: &ScoringRequest) -> Result<CoachFeedback, AppError> {
        let raw = self
            .complete(COACH_SYSTEM_PROMPT, &coach_user_prompt(request))
            .await?;
        serde_json::from_str(extract_json_block(&raw))
            .map_err(|e| AppError::oracle(format!("malformed coach payload: {e}")))
    }
}

/// Models often wrap JSON in a fenced code block; tolerate both fenced and
/// bare output.
fn extract_json_block(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

const EVALUATOR_SYSTEM_PROMPT: &str = r#"You are a senior engineering manager evaluating a candidate's production debugging skills from a simulated incident exercise. You are assessing whether this person can be trusted to ship to production, not whether they wrote eloquent prose.

Score five dimensions, each 0-10:
- investigativeEngagement (weight 0.15): did they actually read the logs? Use the interaction data: time per section, navigation order, and answer revisions. Near-zero time in the section containing the root cause is a strong negative signal.
- signalDetection (weight 0.30): did they find the true root-cause signal in the logs, or fixate on red herrings?
- hypothesisFormation (weight 0.25): is the diagnosis a coherent causal story consistent with the evidence, not a list of guesses?
- debuggingDiscipline (weight 0.15): are the proposed next steps systematic (verify, then fix, then prevent) rather than shotgun restarts?
- decisionReadiness (weight 0.15): would their next steps be safe to execute against a production system?

Compute shippingReadinessScore as the weighted sum scaled to 0-100 and rounded to the nearest integer. Verdict thresholds: above 75 "Ready to Ship Independently", 40-75 "Requires Support", below 40 "Not Ready for Production Work".

Respond with ONLY a JSON object:
{
  "scorecard": {
    "investigativeEngagement": number,
    "signalDetection": number,
    "hypothesisFormation": number,
    "debuggingDiscipline": number,
    "decisionReadiness": number
  },
  "shippingReadinessScore": number,
  "verdict": "Ready to Ship Independently" | "Requires Support" | "Not Ready for Production Work",
  "justification": string
}"#;

fn evaluator_user_prompt(request: &ScoringRequest) -> String {
    format!(
        "Problem description:\n{}\n\nEvaluation rubric (not shown to the candidate):\n{}\n\n\
         Candidate's diagnosis:\n{}\n\nCandidate's proposed next steps:\n{}\n\n\
         Interaction data (JSON):\n{}",
        request.problem_description,
        request.evaluation_rubric,
        request.diagnosis,
        request.next_steps,
        request.interaction_data,
    )
}

const COACH_SYSTEM_PROMPT: &str = r#"You are a supportive senior engineer mentoring a learner on production debugging. You have their diagnosis, next steps, and how they navigated the logs. Be specific and kind; cite what they did, not generic advice.

Respond with ONLY a JSON object:
{
  "strengths": string,
  "areasForImprovement": string,
  "blindSpots": string,
  "overallFeedback": string
}"#;

fn coach_user_prompt(request: &ScoringRequest) -> String {
    format!(
        "Problem description:\n{}\n\nReference rubric:\n{}\n\nLearner's diagnosis:\n{}\n\n\
         Learner's next steps:\n{}\n\nHow they navigated the logs (JSON):\n{}",
        request.problem_description,
        request.evaluation_rubric,
        request.diagnosis,
        request.next_steps,
        request.interaction_data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::Verdict;

    #[test]
    fn extract_json_block_handles_fenced_output() {
        assert_eq!(extract_json_block("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_block("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_block("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn extract_json_block_tolerates_missing_closing_fence() {
        assert_eq!(extract_json_block("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn scorecard_payload_parses_from_fenced_completion() {
        let raw = r#"```json
{
  "scorecard": {
    "investigativeEngagement": 8,
    "signalDetection": 6,
    "hypothesisFormation": 7,
    "debuggingDiscipline": 9,
    "decisionReadiness": 5
  },
  "shippingReadinessScore": 69,
  "verdict": "Requires Support",
  "justification": "Found the slow query but missed the index warning."
}
```"#;
        let result: ScoringResult = serde_json::from_str(extract_json_block(raw)).unwrap();
        assert!(result.validate().is_ok());
        assert_eq!(result.verdict, Verdict::RequiresSupport);
        assert_eq!(result.shipping_readiness_score, 69);
    }

    #[test]
    fn evaluator_prompt_states_the_verdict_thresholds() {
        assert!(EVALUATOR_SYSTEM_PROMPT.contains(r#"above 75 "Ready to Ship Independently""#));
        assert!(EVALUATOR_SYSTEM_PROMPT.contains(r#"40-75 "Requires Support""#));
        assert!(EVALUATOR_SYSTEM_PROMPT.contains(r#"below 40 "Not Ready for Production Work""#));
    }

    #[test]
    fn coach_payload_parses_camel_case_fields() {
        let raw = r#"{"strengths":"s","areasForImprovement":"a","blindSpots":"b","overallFeedback":"o"}"#;
        let feedback: CoachFeedback = serde_json::from_str(extract_json_block(raw)).unwrap();
        assert_eq!(feedback.areas_for_improvement, "a");
    }
}
