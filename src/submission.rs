//! Server-side validation of the two free-text answers. Mirrors the form
//! rules exactly so a bypassed client cannot submit answers the form would
//! have rejected.

use crate::errors::{AppError, FieldErrors};

const MIN_LEN: usize = 10;
const MAX_LEN: usize = 10_000;

pub const FORM_ERROR_MESSAGE: &str = "Please correct the errors in the form.";

/// Both answers, trimmed. Returned only when every rule passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAnswers {
    pub diagnosis: String,
    pub next_steps: String,
}

fn check_field(name: &str, label: &str, value: &str, errors: &mut FieldErrors) -> String {
    let trimmed = value.trim();
    let mut messages = Vec::new();
    if trimmed.chars().count() < MIN_LEN {
        messages.push(format!("{label} must be at least {MIN_LEN} characters."));
    }
    if trimmed.chars().count() > MAX_LEN {
        messages.push(format!("{label} must be at most {MAX_LEN} characters."));
    }
    if !messages.is_empty() {
        errors.insert(name.to_string(), messages);
    }
    trimmed.to_string()
}

/// Validates the diagnosis and next-steps answers. Length rules apply to the
/// trimmed text; whitespace-only input fails the minimum. All violations are
/// collected into one `AppError::Validation` keyed by wire field name.
pub fn validate_answers(diagnosis: &str, next_steps: &str) -> Result<ValidatedAnswers, AppError> {
    let mut errors = FieldErrors::new();
    let diagnosis = check_field("diagnosis", "Diagnosis", diagnosis, &mut errors);
    let next_steps = check_field("nextSteps", "Next steps", next_steps, &mut errors);

    if errors.is_empty() {
        Ok(ValidatedAnswers {
            diagnosis,
            next_steps,
        })
    } else {
        Err(AppError::validation(FORM_ERROR_MESSAGE, errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_valid_answers() {
        let answers =
            validate_answers("  the database query is unindexed  ", "add an index\n").unwrap();
        assert_eq!(answers.diagnosis, "the database query is unindexed");
        assert_eq!(answers.next_steps, "add an index");
    }

    #[test]
    fn rejects_short_diagnosis_with_field_error() {
        let err = validate_answers("too short", "restart the pods and watch").unwrap_err();
        match err {
            AppError::Validation {
                message,
                field_errors,
            } => {
                assert_eq!(message, FORM_ERROR_MESSAGE);
                assert!(field_errors.contains_key("diagnosis"));
                assert!(!field_errors.contains_key("nextSteps"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_fails_the_minimum() {
        let err = validate_answers("             ", "             ").unwrap_err();
        match err {
            AppError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("diagnosis"));
                assert!(field_errors.contains_key("nextSteps"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_oversized_answer() {
        let huge = "x".repeat(10_001);
        let err = validate_answers(&huge, "restart the pods and watch").unwrap_err();
        match err {
            AppError::Validation { field_errors, .. } => {
                assert!(field_errors["diagnosis"][0].contains("at most"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn boundary_length_of_ten_passes() {
        assert!(validate_answers("abcdefghij", "abcdefghij").is_ok());
    }
}
