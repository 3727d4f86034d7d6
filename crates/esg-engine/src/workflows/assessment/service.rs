use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;

use super::answer::NormalizeError;
use super::catalog::QuestionCatalog;
use super::domain::{AssessmentId, AssessmentStatus, Grade};
use super::repository::{
    AlertError, AlertPublisher, AssessmentRecord, AssessmentRepository, GradeAlert,
    RepositoryError,
};
use super::scoring::{AssessmentScorer, ScoringError, SelfAssessmentResult};

/// Inbound self-assessment submission: the reporting company plus the raw
/// answer map keyed by question id.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentSubmission {
    pub company: String,
    pub answers: serde_json::Map<String, serde_json::Value>,
}

/// Service composing the normalization boundary, scorer, repository, and
/// alert hooks.
pub struct AssessmentService<R, A> {
    repository: Arc<R>,
    alerts: Arc<A>,
    scorer: Arc<AssessmentScorer>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("esg-{id:06}"))
}

impl<R, A> AssessmentService<R, A>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>, catalog: QuestionCatalog) -> Self {
        Self {
            repository,
            alerts,
            scorer: Arc::new(AssessmentScorer::new(catalog)),
        }
    }

    pub fn scorer(&self) -> &AssessmentScorer {
        &self.scorer
    }

    /// Validate a raw submission and store it for scoring.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let answers = self.scorer.normalize(&submission.answers)?;

        let record = AssessmentRecord {
            assessment_id: next_assessment_id(),
            company: submission.company,
            answers,
            status: AssessmentStatus::Submitted,
            result: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Score a stored submission and persist the outcome. Critical violations
    /// raise an alert so procurement can follow up.
    pub fn score(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<SelfAssessmentResult, AssessmentServiceError> {
        let mut record = self
            .repository
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;

        let result = self.scorer.score(&record.answers)?;

        record.status = match result.final_grade {
            Grade::A | Grade::B => AssessmentStatus::Scored,
            Grade::C | Grade::D => AssessmentStatus::ActionRequired,
        };
        record.result = Some(result.clone());

        self.repository.update(record)?;

        if result.critical_violation_count > 0 {
            let mut details = BTreeMap::new();
            details.insert(
                "final_grade".to_string(),
                result.final_grade.label().to_string(),
            );
            details.insert(
                "critical_violations".to_string(),
                result.critical_violation_count.to_string(),
            );
            self.alerts.publish(GradeAlert {
                template: "critical_violation_found".to_string(),
                assessment_id: assessment_id.clone(),
                details,
            })?;
        }

        Ok(result)
    }

    /// Fetch an assessment and current status for API responses.
    pub fn get(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Normalization(#[from] NormalizeError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
