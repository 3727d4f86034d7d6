use super::super::domain::{Answer, CanonicalAnswer, Category, Grade};
use super::CategoryScore;

/// Per-category breakdown over the submitted answer set. Categories with no
/// answers are omitted; the `UNKNOWN` bucket trails the fixed five when the
/// legacy fallback produced one.
pub(crate) fn category_breakdown(answers: &[Answer]) -> Vec<CategoryScore> {
    let mut breakdown = Vec::new();

    for category in Category::ordered() {
        if let Some(score) = score_category(category, answers) {
            breakdown.push(score);
        }
    }
    if let Some(score) = score_category(Category::Unknown, answers) {
        breakdown.push(score);
    }

    breakdown
}

fn score_category(category: Category, answers: &[Answer]) -> Option<CategoryScore> {
    let in_category: Vec<&Answer> = answers
        .iter()
        .filter(|answer| answer.category == category)
        .collect();
    if in_category.is_empty() {
        return None;
    }

    let answered = in_category.len();
    let yes_count = in_category
        .iter()
        .filter(|answer| answer.answer == CanonicalAnswer::Yes)
        .count();
    let compliance_rate = round_percent(yes_count as f64, answered as f64);

    let grade = in_category
        .iter()
        .filter(|answer| answer.is_critical_violation())
        .filter_map(|answer| answer.critical)
        .map(|critical| critical.ceiling())
        .max()
        .unwrap_or(Grade::A);

    Some(CategoryScore {
        category,
        category_label: category.label(),
        answered,
        yes_count,
        compliance_rate,
        grade,
        grade_points: grade.points(),
    })
}

/// Weighted sums over the submitted set: satisfied weight and total weight.
pub(crate) fn weighted_totals(answers: &[Answer]) -> (f64, f64) {
    let actual = answers
        .iter()
        .filter(|answer| answer.answer == CanonicalAnswer::Yes)
        .map(|answer| answer.weight)
        .sum();
    let possible = answers.iter().map(|answer| answer.weight).sum();
    (actual, possible)
}

/// Worst grade ceiling imposed by any critical violation across the whole
/// submission, or `None` when no critical item was violated.
pub(crate) fn worst_critical_ceiling(answers: &[Answer]) -> Option<Grade> {
    answers
        .iter()
        .filter(|answer| answer.is_critical_violation())
        .filter_map(|answer| answer.critical)
        .map(|critical| critical.ceiling())
        .max()
}

/// Integer percentage with half-away-from-zero rounding; 0 when the
/// denominator is 0.
pub(crate) fn round_percent(numerator: f64, denominator: f64) -> u8 {
    if denominator <= 0.0 {
        return 0;
    }
    (numerator / denominator * 100.0).round() as u8
}
