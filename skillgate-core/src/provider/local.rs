//! Self-contained assessment provider
//!
//! LocalProvider generates and scores assessments in-process, so the engine
//! runs end-to-end without a backend: question banks are built per
//! proficiency level, submissions are scored with weighted points, and
//! feedback is tiered by score. Useful for development, demos, and
//! integration tests that want real scoring instead of scripted results.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use skillgate_models::wire::AnswerEntry;
use skillgate_models::{
    AnswerOption, Assessment, AssessmentResult, AssessmentStatus, AssessmentType, Difficulty,
    Question, QuestionKind,
};

use super::traits::AssessmentProvider;
use crate::error::ProviderError;

const QUESTIONS_PER_ASSESSMENT: usize = 10;
const OPTIONS_PER_QUESTION: usize = 4;

struct GeneratedAssessment {
    assessment: Assessment,
    /// question id -> correct option id; never leaves the provider
    answer_key: HashMap<String, String>,
}

#[derive(Default)]
struct LocalState {
    /// skill name -> assessment id of the live assessment for that skill
    by_skill: HashMap<String, String>,
    assessments: HashMap<String, GeneratedAssessment>,
}

/// In-process provider that generates and scores its own assessments
pub struct LocalProvider {
    level: Difficulty,
    state: Mutex<LocalState>,
}

impl LocalProvider {
    /// Create a provider generating intermediate-level assessments
    pub fn new() -> Self {
        Self::with_level(Difficulty::Intermediate)
    }

    /// Create a provider generating assessments at the given level
    pub fn with_level(level: Difficulty) -> Self {
        Self {
            level,
            state: Mutex::new(LocalState::default()),
        }
    }

    fn generate(&self, skill: &str) -> GeneratedAssessment {
        let (time_limit_mins, passing_score, title, description) = level_plan(self.level, skill);

        let mut questions = Vec::with_capacity(QUESTIONS_PER_ASSESSMENT);
        let mut answer_key = HashMap::new();
        let mut index = 0;

        for (difficulty, count) in difficulty_mix(self.level) {
            for i in 0..count {
                let id = format!("q-{}-{}", difficulty.as_str(), i);
                let options: Vec<AnswerOption> = (0..OPTIONS_PER_QUESTION)
                    .map(|j| AnswerOption {
                        id: format!("{id}-opt-{j}"),
                        text: format!(
                            "Option {} for {} {} question",
                            j + 1,
                            skill,
                            difficulty.as_str()
                        ),
                    })
                    .collect();
                answer_key.insert(id.clone(), options[index % OPTIONS_PER_QUESTION].id.clone());
                questions.push(Question {
                    id: id.clone(),
                    text: format!(
                        "Sample {} level question about {} ({})",
                        difficulty.as_str(),
                        skill,
                        index + 1
                    ),
                    options,
                    kind: QuestionKind::MultipleChoice,
                    difficulty,
                    points: difficulty.default_points(),
                });
                index += 1;
            }
        }

        GeneratedAssessment {
            assessment: Assessment {
                id: Uuid::new_v4().to_string(),
                skill_id: slug(skill),
                skill_name: skill.to_string(),
                title,
                description,
                time_limit_mins,
                passing_score,
                questions,
                status: AssessmentStatus::Pending,
                assessment_type: AssessmentType::Quiz,
            },
            answer_key,
        }
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssessmentProvider for LocalProvider {
    async fn fetch_assessment(&self, skill: &str) -> Result<Assessment, ProviderError> {
        let mut state = self.state.lock().await;

        // A pending or in-progress assessment for the skill is reused;
        // completed and expired ones are replaced.
        if let Some(id) = state.by_skill.get(skill) {
            if let Some(generated) = state.assessments.get(id) {
                match generated.assessment.status {
                    AssessmentStatus::Pending | AssessmentStatus::InProgress => {
                        return Ok(generated.assessment.clone());
                    }
                    AssessmentStatus::Completed | AssessmentStatus::Expired => {}
                }
            }
        }

        let generated = self.generate(skill);
        let assessment = generated.assessment.clone();
        state.by_skill.insert(skill.to_string(), assessment.id.clone());
        state.assessments.insert(assessment.id.clone(), generated);
        Ok(assessment)
    }

    async fn start_assessment(&self, assessment_id: &str) -> Result<(), ProviderError> {
        let mut state = self.state.lock().await;
        let generated = state
            .assessments
            .get_mut(assessment_id)
            .ok_or_else(|| ProviderError::UnknownAssessment(assessment_id.to_string()))?;

        match generated.assessment.status {
            AssessmentStatus::Completed | AssessmentStatus::Expired => Err(
                ProviderError::Rejected("assessment already completed or expired".to_string()),
            ),
            _ => {
                generated.assessment.status = AssessmentStatus::InProgress;
                Ok(())
            }
        }
    }

    async fn submit_assessment(
        &self,
        assessment_id: &str,
        answers: &[AnswerEntry],
        _time_spent_secs: u32,
    ) -> Result<AssessmentResult, ProviderError> {
        let mut state = self.state.lock().await;
        let generated = state
            .assessments
            .get_mut(assessment_id)
            .ok_or_else(|| ProviderError::UnknownAssessment(assessment_id.to_string()))?;

        match generated.assessment.status {
            AssessmentStatus::Completed => {
                return Err(ProviderError::Rejected(
                    "assessment has already been completed".to_string(),
                ));
            }
            AssessmentStatus::Expired => {
                return Err(ProviderError::Rejected("assessment has expired".to_string()));
            }
            AssessmentStatus::Pending | AssessmentStatus::InProgress => {}
        }

        let score = score_answers(generated, answers);
        let passed = score >= generated.assessment.passing_score;
        generated.assessment.status = AssessmentStatus::Completed;

        Ok(AssessmentResult {
            score,
            passed,
            feedback: feedback_for(&generated.assessment.skill_name, score, passed),
        })
    }
}

/// Difficulty mix per level: how many of the ten questions fall on each
/// difficulty, in ascending difficulty order. The expert bucket absorbs the
/// rounding remainder.
fn difficulty_mix(level: Difficulty) -> Vec<(Difficulty, usize)> {
    let shares: [f64; 4] = match level {
        Difficulty::Beginner => [0.7, 0.3, 0.0, 0.0],
        Difficulty::Intermediate => [0.3, 0.5, 0.2, 0.0],
        Difficulty::Advanced => [0.1, 0.3, 0.5, 0.1],
        Difficulty::Expert => [0.0, 0.1, 0.4, 0.5],
    };

    let total = QUESTIONS_PER_ASSESSMENT as f64;
    let beginner = (total * shares[0]).round() as usize;
    let intermediate = (total * shares[1]).round() as usize;
    let advanced = (total * shares[2]).round() as usize;
    let expert = QUESTIONS_PER_ASSESSMENT - beginner - intermediate - advanced;

    vec![
        (Difficulty::Beginner, beginner),
        (Difficulty::Intermediate, intermediate),
        (Difficulty::Advanced, advanced),
        (Difficulty::Expert, expert),
    ]
}

fn level_plan(level: Difficulty, skill: &str) -> (u32, u8, String, String) {
    match level {
        Difficulty::Beginner => (
            10,
            65,
            format!("{skill} Fundamentals Assessment"),
            format!(
                "This assessment tests your basic knowledge of {skill}. It focuses on \
                 fundamental concepts and beginner-level applications."
            ),
        ),
        Difficulty::Intermediate => (
            15,
            70,
            format!("{skill} Proficiency Assessment"),
            format!(
                "This assessment evaluates your intermediate knowledge of {skill}. It covers \
                 both fundamentals and more advanced concepts."
            ),
        ),
        Difficulty::Advanced => (
            20,
            75,
            format!("{skill} Advanced Assessment"),
            format!(
                "This assessment challenges your advanced knowledge of {skill}. It includes \
                 complex scenarios and specialized topics."
            ),
        ),
        Difficulty::Expert => (
            25,
            80,
            format!("{skill} Expert Assessment"),
            format!(
                "This expert-level assessment tests your mastery of {skill}. It covers \
                 advanced topics, best practices, and complex problem-solving."
            ),
        ),
    }
}

/// Weighted score: earned points over total points, as a rounded percentage
fn score_answers(generated: &GeneratedAssessment, answers: &[AnswerEntry]) -> u8 {
    let total_points = generated.assessment.total_points();
    if total_points == 0 {
        return 0;
    }

    let earned: u32 = answers
        .iter()
        .filter(|entry| {
            generated.answer_key.get(&entry.question_id) == Some(&entry.option_id)
        })
        .filter_map(|entry| generated.assessment.question(&entry.question_id))
        .map(|question| question.points)
        .sum();

    ((earned as f64 / total_points as f64) * 100.0).round() as u8
}

fn feedback_for(skill: &str, score: u8, passed: bool) -> String {
    let mut feedback = if score >= 90 {
        format!(
            "Excellent performance! You have demonstrated expert-level knowledge in {skill}. \
             Your understanding of advanced concepts is impressive."
        )
    } else if score >= 80 {
        format!(
            "Great job! You have strong advanced knowledge in {skill}. You've shown \
             proficiency in most aspects of this skill."
        )
    } else if score >= 70 {
        format!(
            "Good work! You have demonstrated solid intermediate knowledge of {skill}. \
             You've passed the verification threshold."
        )
    } else if score >= 60 {
        format!(
            "You have basic knowledge of {skill}, but didn't quite reach the verification \
             threshold. Consider reviewing some intermediate concepts and trying again."
        )
    } else if score >= 40 {
        format!(
            "You've shown some understanding of {skill}, but need more practice to reach \
             proficiency. Focus on building your foundation and try again."
        )
    } else {
        format!(
            "You need more practice with {skill}. Consider starting with beginner tutorials \
             and building a stronger foundation before attempting verification again."
        )
    };

    if passed {
        feedback.push_str(
            " Your skill has been verified and will be displayed on your profile, increasing \
             your visibility to potential employers.",
        );
    } else {
        feedback.push_str(
            " You can retake this assessment in 7 days. In the meantime, consider exploring \
             learning resources to improve your knowledge.",
        );
    }
    feedback
}

fn slug(skill: &str) -> String {
    skill
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Generation Tests ====================

    #[tokio::test]
    async fn generated_assessment_matches_level_plan() {
        let provider = LocalProvider::with_level(Difficulty::Beginner);
        let assessment = provider.fetch_assessment("Python").await.unwrap();

        assert_eq!(assessment.time_limit_mins, 10);
        assert_eq!(assessment.passing_score, 65);
        assert_eq!(assessment.title, "Python Fundamentals Assessment");
        assert_eq!(assessment.question_count(), 10);
        assert!(assessment.validate().is_ok());

        let counts = assessment.difficulty_counts();
        assert_eq!(counts[0], (Difficulty::Beginner, 7));
        assert_eq!(counts[1], (Difficulty::Intermediate, 3));
        assert_eq!(counts[2], (Difficulty::Advanced, 0));
    }

    #[tokio::test]
    async fn expert_level_skews_hard_and_raises_the_bar() {
        let provider = LocalProvider::with_level(Difficulty::Expert);
        let assessment = provider.fetch_assessment("Kubernetes").await.unwrap();

        assert_eq!(assessment.time_limit_mins, 25);
        assert_eq!(assessment.passing_score, 80);

        let counts = assessment.difficulty_counts();
        assert_eq!(counts[0], (Difficulty::Beginner, 0));
        assert_eq!(counts[3], (Difficulty::Expert, 5));
    }

    #[tokio::test]
    async fn refetch_returns_same_assessment_while_unfinished() {
        let provider = LocalProvider::new();
        let first = provider.fetch_assessment("Rust").await.unwrap();
        let second = provider.fetch_assessment("Rust").await.unwrap();
        assert_eq!(first.id, second.id);

        // Different skills get different assessments
        let other = provider.fetch_assessment("Go").await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn skill_id_is_slugified() {
        let provider = LocalProvider::new();
        let assessment = provider.fetch_assessment("Machine Learning").await.unwrap();
        assert_eq!(assessment.skill_id, "machine-learning");
    }

    // ==================== Lifecycle Tests ====================

    #[tokio::test]
    async fn start_marks_assessment_in_progress() {
        let provider = LocalProvider::new();
        let assessment = provider.fetch_assessment("Rust").await.unwrap();

        provider.start_assessment(&assessment.id).await.unwrap();

        let refetched = provider.fetch_assessment("Rust").await.unwrap();
        assert_eq!(refetched.status, AssessmentStatus::InProgress);
    }

    #[tokio::test]
    async fn start_of_unknown_assessment_fails() {
        let provider = LocalProvider::new();
        let result = provider.start_assessment("missing").await;
        assert!(matches!(result, Err(ProviderError::UnknownAssessment(_))));
    }

    #[tokio::test]
    async fn submit_of_completed_assessment_is_rejected() {
        let provider = LocalProvider::new();
        let assessment = provider.fetch_assessment("Rust").await.unwrap();

        provider.submit_assessment(&assessment.id, &[], 60).await.unwrap();
        let again = provider.submit_assessment(&assessment.id, &[], 60).await;
        assert!(matches!(again, Err(ProviderError::Rejected(_))));
    }

    // ==================== Scoring Tests ====================

    #[tokio::test]
    async fn all_correct_answers_score_one_hundred() {
        let provider = LocalProvider::new();
        let assessment = provider.fetch_assessment("Rust").await.unwrap();

        let answers: Vec<AnswerEntry> = {
            let state = provider.state.lock().await;
            let generated = &state.assessments[&assessment.id];
            assessment
                .questions
                .iter()
                .map(|q| AnswerEntry {
                    question_id: q.id.clone(),
                    option_id: generated.answer_key[&q.id].clone(),
                })
                .collect()
        };

        let result = provider
            .submit_assessment(&assessment.id, &answers, 120)
            .await
            .unwrap();
        assert_eq!(result.score, 100);
        assert!(result.passed);
        assert!(result.feedback.contains("Excellent performance"));
        assert!(result.feedback.contains("verified"));
    }

    #[tokio::test]
    async fn no_answers_score_zero_and_fail() {
        let provider = LocalProvider::new();
        let assessment = provider.fetch_assessment("Rust").await.unwrap();

        let result = provider
            .submit_assessment(&assessment.id, &[], 900)
            .await
            .unwrap();
        assert_eq!(result.score, 0);
        assert!(!result.passed);
        assert!(result.feedback.contains("retake this assessment in 7 days"));
    }

    #[tokio::test]
    async fn scoring_weights_points_by_difficulty() {
        let provider = LocalProvider::with_level(Difficulty::Intermediate);
        let assessment = provider.fetch_assessment("Rust").await.unwrap();

        // Answer only the advanced questions correctly: 2 questions worth
        // 3 points each, out of 3*1 + 5*2 + 2*3 = 19 total points.
        let answers: Vec<AnswerEntry> = {
            let state = provider.state.lock().await;
            let generated = &state.assessments[&assessment.id];
            assessment
                .questions
                .iter()
                .filter(|q| q.difficulty == Difficulty::Advanced)
                .map(|q| AnswerEntry {
                    question_id: q.id.clone(),
                    option_id: generated.answer_key[&q.id].clone(),
                })
                .collect()
        };
        assert_eq!(answers.len(), 2);

        let result = provider
            .submit_assessment(&assessment.id, &answers, 60)
            .await
            .unwrap();
        // 6/19 = 31.57..., rounds to 32
        assert_eq!(result.score, 32);
        assert!(!result.passed);
    }

    #[tokio::test]
    async fn wrong_answers_earn_no_points() {
        let provider = LocalProvider::new();
        let assessment = provider.fetch_assessment("Rust").await.unwrap();

        // Pick a wrong option for every question
        let answers: Vec<AnswerEntry> = {
            let state = provider.state.lock().await;
            let generated = &state.assessments[&assessment.id];
            assessment
                .questions
                .iter()
                .map(|q| {
                    let correct = &generated.answer_key[&q.id];
                    let wrong = q
                        .options
                        .iter()
                        .find(|o| &o.id != correct)
                        .expect("four options per question");
                    AnswerEntry {
                        question_id: q.id.clone(),
                        option_id: wrong.id.clone(),
                    }
                })
                .collect()
        };

        let result = provider
            .submit_assessment(&assessment.id, &answers, 60)
            .await
            .unwrap();
        assert_eq!(result.score, 0);
    }

    // ==================== Feedback Tests ====================

    #[test]
    fn feedback_tiers_follow_score_boundaries() {
        assert!(feedback_for("Rust", 95, true).contains("Excellent performance"));
        assert!(feedback_for("Rust", 85, true).contains("Great job"));
        assert!(feedback_for("Rust", 70, true).contains("Good work"));
        assert!(feedback_for("Rust", 65, false).contains("didn't quite reach"));
        assert!(feedback_for("Rust", 45, false).contains("need more practice to reach"));
        assert!(feedback_for("Rust", 10, false).contains("beginner tutorials"));
    }

    #[test]
    fn feedback_suffix_depends_on_outcome() {
        assert!(feedback_for("Rust", 90, true).ends_with("potential employers."));
        assert!(feedback_for("Rust", 30, false).contains("retake this assessment in 7 days"));
    }
}
