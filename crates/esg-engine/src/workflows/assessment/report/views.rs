use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{Category, Grade};

/// One violated answer, flattened for tables and report pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationEntry {
    pub question_id: String,
    pub category: Category,
    pub category_label: &'static str,
    pub critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_grade_label: Option<&'static str>,
}

/// Violations of one category, in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryViolations {
    pub category: Category,
    pub category_label: &'static str,
    pub total: usize,
    pub critical: usize,
    pub entries: Vec<ViolationEntry>,
}

/// Serializable rollup consumed by presentation layers and exports.
#[derive(Debug, Clone, Serialize)]
pub struct ViolationReportSummary {
    pub assessed_on: NaiveDate,
    pub final_grade: Grade,
    pub final_grade_label: &'static str,
    pub score: u8,
    pub actual_score: f64,
    pub total_possible_score: f64,
    pub total_violations: usize,
    pub critical_violations: usize,
    pub categories: Vec<CategoryViolations>,
}

impl ViolationReportSummary {
    /// Critical violations across all categories, chunked into report pages.
    pub fn critical_pages(
        &self,
        page_size: usize,
    ) -> Result<Vec<Vec<ViolationEntry>>, super::ReportError> {
        let critical: Vec<ViolationEntry> = self
            .categories
            .iter()
            .flat_map(|category| category.entries.iter())
            .filter(|entry| entry.critical)
            .cloned()
            .collect();
        super::chunk(&critical, page_size)
    }

    /// Every violation, chunked for the paginated table view.
    pub fn violation_pages(
        &self,
        page_size: usize,
    ) -> Result<Vec<Vec<ViolationEntry>>, super::ReportError> {
        let all: Vec<ViolationEntry> = self
            .categories
            .iter()
            .flat_map(|category| category.entries.iter())
            .cloned()
            .collect();
        super::chunk(&all, page_size)
    }
}
