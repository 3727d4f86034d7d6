//! CSDDD self-assessment intake, scoring, and reporting.
//!
//! Raw answers cross a single normalization boundary, pick up their catalog
//! metadata there, and everything downstream (scoring, grading, report
//! aggregation) works on the canonical representation only.

pub mod answer;
pub mod catalog;
pub mod domain;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

pub use answer::{normalize, normalize_all, normalize_legacy, AnswerError, NormalizeError};
pub use catalog::{CriticalViolation, Question, QuestionCatalog};
pub use domain::{
    Answer, AssessmentId, AssessmentStatus, CanonicalAnswer, Category, CriticalGrade, Grade,
};
pub use report::{chunk, ReportError, ViolationReport};
pub use repository::{
    AlertError, AlertPublisher, AssessmentRecord, AssessmentRepository, AssessmentStatusView,
    GradeAlert, RepositoryError,
};
pub use router::assessment_router;
pub use scoring::{AssessmentScorer, CategoryScore, ScoringError, SelfAssessmentResult};
pub use service::{AssessmentService, AssessmentServiceError, AssessmentSubmission};
