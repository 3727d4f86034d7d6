mod rules;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::answer::{normalize_all, NormalizeError};
use super::catalog::QuestionCatalog;
use super::domain::{Answer, CanonicalAnswer, Category, Grade};

/// Structural failures that make a scoring pass meaningless.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("cannot score an empty answer set")]
    EmptyAnswers,
    #[error("duplicate answer for question {0}")]
    DuplicateQuestion(String),
}

/// Per-category compliance metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub category_label: &'static str,
    pub answered: usize,
    pub yes_count: usize,
    /// Share of `yes` answers in the category, rounded to integer percent.
    pub compliance_rate: u8,
    /// Worst critical-violation ceiling in the category, `A` when none.
    pub grade: Grade,
    pub grade_points: u8,
}

/// Complete output of one scoring pass. Computed fresh every time; the
/// authoritative copy lives with the backend, never here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfAssessmentResult {
    pub final_grade: Grade,
    /// Normalized weighted score, 0-100.
    pub score: u8,
    pub actual_score: f64,
    pub total_possible_score: f64,
    pub critical_violation_count: usize,
    pub no_answer_count: usize,
    pub category_scores: Vec<CategoryScore>,
    pub answers: Vec<Answer>,
}

impl SelfAssessmentResult {
    pub fn rationale(&self) -> String {
        if self.critical_violation_count == 0 {
            format!(
                "grade {} with {} of {} weighted points",
                self.final_grade.label(),
                self.actual_score,
                self.total_possible_score
            )
        } else {
            format!(
                "grade {} capped by {} critical violation(s)",
                self.final_grade.label(),
                self.critical_violation_count
            )
        }
    }
}

/// Stateless scorer applying the questionnaire catalog to a validated answer
/// set.
pub struct AssessmentScorer {
    catalog: QuestionCatalog,
}

impl AssessmentScorer {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Validates a raw submission map against the catalog.
    pub fn normalize(
        &self,
        raw: &serde_json::Map<String, Value>,
    ) -> Result<Vec<Answer>, NormalizeError> {
        normalize_all(raw, &self.catalog)
    }

    /// Scores a validated answer set. Idempotent; two passes over the same
    /// answers return identical results.
    pub fn score(&self, answers: &[Answer]) -> Result<SelfAssessmentResult, ScoringError> {
        if answers.is_empty() {
            return Err(ScoringError::EmptyAnswers);
        }

        let mut seen = HashSet::with_capacity(answers.len());
        for answer in answers {
            if !seen.insert(answer.question_id.as_str()) {
                return Err(ScoringError::DuplicateQuestion(answer.question_id.clone()));
            }
        }

        let category_scores = rules::category_breakdown(answers);
        let (actual_score, total_possible_score) = rules::weighted_totals(answers);
        let score = rules::round_percent(actual_score, total_possible_score);

        let final_grade = rules::worst_critical_ceiling(answers).unwrap_or(Grade::A);
        let critical_violation_count = answers
            .iter()
            .filter(|answer| answer.is_critical_violation())
            .count();
        let no_answer_count = answers
            .iter()
            .filter(|answer| answer.answer == CanonicalAnswer::No)
            .count();

        Ok(SelfAssessmentResult {
            final_grade,
            score,
            actual_score,
            total_possible_score,
            critical_violation_count,
            no_answer_count,
            category_scores,
            answers: answers.to_vec(),
        })
    }
}
