//! Scoring result returned by the submit endpoint

use serde::{Deserialize, Serialize};

/// Outcome of a scored assessment, produced once and never recomputed
/// client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Score as an integer percentage, 0-100
    pub score: u8,
    /// Whether the score met the assessment's passing threshold
    pub passed: bool,
    /// Human-readable feedback text
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serde_roundtrip() {
        let result = AssessmentResult {
            score: 33,
            passed: false,
            feedback: "You need more practice.".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: AssessmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, parsed);
    }

    #[test]
    fn result_deserializes_server_payload() {
        let json = r#"{"score": 85, "passed": true, "feedback": "Great job!"}"#;
        let result: AssessmentResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, 85);
        assert!(result.passed);
    }
}
