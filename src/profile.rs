//! Candidate-declared background profile, collected once before an attempt.
//! Closed enums so malformed payloads are rejected at the deserialization
//! boundary instead of leaking free-form strings into the analytics cohorts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    #[serde(rename = "LeetCode/CP-heavy")]
    LeetCodeHeavy,
    #[serde(rename = "Backend/Systems")]
    BackendSystems,
    #[serde(rename = "Fullstack")]
    Fullstack,
    #[serde(rename = "Student")]
    Student,
}

impl Background {
    pub fn as_str(&self) -> &'static str {
        match self {
            Background::LeetCodeHeavy => "LeetCode/CP-heavy",
            Background::BackendSystems => "Backend/Systems",
            Background::Fullstack => "Fullstack",
            Background::Student => "Student",
        }
    }
}

/// Bucketed years of professional experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[serde(rename = "0-1")]
    Junior,
    #[serde(rename = "1-3")]
    Mid,
    #[serde(rename = "3+")]
    Senior,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Junior => "0-1",
            Experience::Mid => "1-3",
            Experience::Senior => "3+",
        }
    }
}

/// Prior production debugging experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProdExperience {
    Yes,
    No,
}

impl ProdExperience {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProdExperience::Yes => "Yes",
            ProdExperience::No => "No",
        }
    }
}

/// Immutable once submitted; required before an attempt can be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreAttemptProfile {
    pub background: Background,
    pub experience: Experience,
    pub prod_experience: ProdExperience,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_match_the_declared_buckets() {
        let profile: PreAttemptProfile = serde_json::from_str(
            r#"{"background":"Backend/Systems","experience":"1-3","prodExperience":"Yes"}"#,
        )
        .unwrap();
        assert_eq!(profile.background, Background::BackendSystems);
        assert_eq!(profile.experience.as_str(), "1-3");
        assert_eq!(profile.prod_experience, ProdExperience::Yes);
    }

    #[test]
    fn unknown_background_is_rejected() {
        let result: Result<PreAttemptProfile, _> = serde_json::from_str(
            r#"{"background":"Wizard","experience":"1-3","prodExperience":"No"}"#,
        );
        assert!(result.is_err());
    }
}
