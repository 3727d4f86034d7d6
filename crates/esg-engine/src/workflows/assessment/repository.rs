use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Answer, AssessmentId, AssessmentStatus};
use super::scoring::SelfAssessmentResult;

/// Repository record holding the submitted answers, status, and scoring
/// outcome for one assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord {
    pub assessment_id: AssessmentId,
    pub company: String,
    pub answers: Vec<Answer>,
    pub status: AssessmentStatus,
    pub result: Option<SelfAssessmentResult>,
}

impl AssessmentRecord {
    pub fn rationale(&self) -> String {
        match &self.result {
            Some(result) => result.rationale(),
            None => "pending scoring".to_string(),
        }
    }

    pub fn status_view(&self) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.assessment_id.clone(),
            company: self.company.clone(),
            status: self.status.label(),
            rationale: self.rationale(),
            final_grade: self
                .result
                .as_ref()
                .map(|result| result.final_grade.label()),
            score: self.result.as_ref().map(|result| result.score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (e.g., procurement or audit
/// mail adapters).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: GradeAlert) -> Result<(), AlertError>;
}

/// Alert payload raised when scoring surfaces critical violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeAlert {
    pub template: String,
    pub assessment_id: AssessmentId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of an assessment's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub company: String,
    pub status: &'static str,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_grade: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}
