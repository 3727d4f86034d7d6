use std::collections::HashMap;

use chrono::NaiveDate;

use super::super::domain::{Answer, Category, Grade};
use super::super::scoring::SelfAssessmentResult;
use super::views::{CategoryViolations, ViolationEntry, ViolationReportSummary};

/// Negative answers grouped by the category prefix of their question id.
/// Purely structural; all scoring happened upstream.
#[derive(Debug)]
pub struct ViolationReport {
    violations: HashMap<Category, Vec<Answer>>,
    snapshot: ResultSnapshot,
}

#[derive(Debug, Clone, Copy)]
struct ResultSnapshot {
    final_grade: Grade,
    score: u8,
    actual_score: f64,
    total_possible_score: f64,
    critical_violations: usize,
}

impl ViolationReport {
    pub fn from_result(result: &SelfAssessmentResult) -> Self {
        let mut violations: HashMap<Category, Vec<Answer>> = HashMap::new();
        for answer in result.answers.iter().filter(|answer| answer.is_violation()) {
            let category = Category::for_question_id(&answer.question_id);
            violations.entry(category).or_default().push(answer.clone());
        }

        Self {
            violations,
            snapshot: ResultSnapshot {
                final_grade: result.final_grade,
                score: result.score,
                actual_score: result.actual_score,
                total_possible_score: result.total_possible_score,
                critical_violations: result.critical_violation_count,
            },
        }
    }

    pub fn violations_for(&self, category: Category) -> &[Answer] {
        self.violations
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn total_violations(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    pub fn summary(&self, assessed_on: NaiveDate) -> ViolationReportSummary {
        let mut categories = Vec::new();
        let mut buckets: Vec<Category> = Category::ordered().to_vec();
        buckets.push(Category::Unknown);

        for category in buckets {
            let answers = match self.violations.get(&category) {
                Some(answers) => answers,
                None => continue,
            };

            let entries: Vec<ViolationEntry> = answers
                .iter()
                .map(|answer| ViolationEntry {
                    question_id: answer.question_id.clone(),
                    category,
                    category_label: category.label(),
                    critical: answer.critical.is_some(),
                    critical_grade_label: answer.critical.map(|grade| grade.label()),
                })
                .collect();

            categories.push(CategoryViolations {
                category,
                category_label: category.label(),
                total: entries.len(),
                critical: entries.iter().filter(|entry| entry.critical).count(),
                entries,
            });
        }

        ViolationReportSummary {
            assessed_on,
            final_grade: self.snapshot.final_grade,
            final_grade_label: self.snapshot.final_grade.label(),
            score: self.snapshot.score,
            actual_score: self.snapshot.actual_score,
            total_possible_score: self.snapshot.total_possible_score,
            total_violations: self.total_violations(),
            critical_violations: self.snapshot.critical_violations,
            categories,
        }
    }
}
