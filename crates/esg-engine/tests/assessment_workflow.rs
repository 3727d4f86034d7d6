//! Integration specifications for the self-assessment intake and scoring
//! workflow.
//!
//! Scenarios exercise the public service facade and HTTP router end to end so
//! normalization, scoring, grading, and alerting are validated without
//! reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use esg_engine::workflows::assessment::{
        AlertError, AlertPublisher, AssessmentId, AssessmentRecord, AssessmentRepository,
        AssessmentService, AssessmentSubmission, GradeAlert, QuestionCatalog, RepositoryError,
    };

    pub(super) fn submission(answers: &[(&str, Value)]) -> AssessmentSubmission {
        AssessmentSubmission {
            company: "Hanbit Metals Co.".to_string(),
            answers: answers
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        }
    }

    pub(super) fn clean_submission() -> AssessmentSubmission {
        submission(&[
            ("1.1", json!("yes")),
            ("1.2", json!("yes")),
            ("1.3", json!("yes")),
            ("2.1", json!("yes")),
            ("3.1", json!("partial")),
        ])
    }

    pub(super) fn critical_submission() -> AssessmentSubmission {
        submission(&[
            ("1.1", json!("yes")),
            ("1.3", json!("no")),
            ("2.1", json!("yes")),
            ("3.2", json!("yes")),
        ])
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
    }

    impl AssessmentRepository for MemoryRepository {
        fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.assessment_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.assessment_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.assessment_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn pending(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryAlerts {
        events: Arc<Mutex<Vec<GradeAlert>>>,
    }

    impl MemoryAlerts {
        pub(super) fn events(&self) -> Vec<GradeAlert> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl AlertPublisher for MemoryAlerts {
        fn publish(&self, alert: GradeAlert) -> Result<(), AlertError> {
            self.events.lock().expect("lock").push(alert);
            Ok(())
        }
    }

    pub(super) fn build_service() -> (
        AssessmentService<MemoryRepository, MemoryAlerts>,
        Arc<MemoryRepository>,
        Arc<MemoryAlerts>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let alerts = Arc::new(MemoryAlerts::default());
        let service = AssessmentService::new(
            repository.clone(),
            alerts.clone(),
            QuestionCatalog::standard(),
        );
        (service, repository, alerts)
    }
}

mod intake {
    use super::common::*;
    use serde_json::json;

    use esg_engine::workflows::assessment::{
        AssessmentRepository, AssessmentServiceError, AssessmentStatus, Category, NormalizeError,
    };

    #[test]
    fn valid_submission_is_stored_with_catalog_metadata() {
        let (service, repository, _) = build_service();
        let record = service
            .submit(clean_submission())
            .expect("submission succeeds");

        assert_eq!(record.status, AssessmentStatus::Submitted);
        assert!(record.result.is_none());

        let stored = repository
            .fetch(&record.assessment_id)
            .expect("repo fetch")
            .expect("record present");
        let child_labor = stored
            .answers
            .iter()
            .find(|answer| answer.question_id == "1.3")
            .expect("answer stamped");
        assert_eq!(child_labor.category, Category::HumanRightsLabor);
        assert_eq!(child_labor.weight, 10.0);
    }

    #[test]
    fn invalid_answers_are_reported_together() {
        let (service, _, _) = build_service();
        let bad = submission(&[
            ("1.1", json!("yes")),
            ("1.2", json!("definitely")),
            ("2.1", json!(7)),
        ]);

        match service.submit(bad) {
            Err(AssessmentServiceError::Normalization(NormalizeError::Invalid(items))) => {
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected aggregate normalization failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_submission_is_rejected() {
        let (service, _, _) = build_service();
        let empty = submission(&[]);

        match service.submit(empty) {
            Err(AssessmentServiceError::Normalization(NormalizeError::EmptyResult)) => {}
            other => panic!("expected empty-result failure, got {other:?}"),
        }
    }
}

mod scoring {
    use super::common::*;

    use esg_engine::workflows::assessment::{AssessmentRepository, AssessmentStatus, Grade};

    #[test]
    fn clean_submission_scores_grade_a() {
        let (service, repository, alerts) = build_service();
        let record = service.submit(clean_submission()).expect("submission");
        let result = service.score(&record.assessment_id).expect("scoring");

        assert_eq!(result.final_grade, Grade::A);
        assert_eq!(result.critical_violation_count, 0);

        let stored = repository
            .fetch(&record.assessment_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.status, AssessmentStatus::Scored);
        assert!(stored.result.is_some());
        assert!(alerts.events().is_empty());
    }

    #[test]
    fn critical_violation_caps_grade_and_raises_alert() {
        let (service, repository, alerts) = build_service();
        let record = service.submit(critical_submission()).expect("submission");
        let result = service.score(&record.assessment_id).expect("scoring");

        // question 1.3 is a grade-D critical item
        assert_eq!(result.final_grade, Grade::D);
        assert_eq!(result.critical_violation_count, 1);
        assert_eq!(result.no_answer_count, 1);

        let stored = repository
            .fetch(&record.assessment_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.status, AssessmentStatus::ActionRequired);

        let events = alerts.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].template, "critical_violation_found");
        assert_eq!(
            events[0].details.get("final_grade").map(String::as_str),
            Some("D")
        );
    }

    #[test]
    fn scoring_twice_returns_identical_results() {
        let (service, _, _) = build_service();
        let record = service.submit(critical_submission()).expect("submission");
        let first = service.score(&record.assessment_id).expect("first pass");
        let second = service.score(&record.assessment_id).expect("second pass");
        assert_eq!(first, second);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use esg_engine::workflows::assessment::{assessment_router, AssessmentRepository};

    fn build_router() -> axum::Router {
        let (service, _, _) = build_service();
        assessment_router(Arc::new(service))
    }

    #[tokio::test]
    async fn post_assessments_returns_tracking_id() {
        let router = build_router();
        let payload = json!({
            "company": "Hanbit Metals Co.",
            "answers": { "1.1": "yes", "2.1": "no" },
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/esg/assessments")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&payload).expect("serialize submission"),
            ))
            .expect("request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(payload.get("assessment_id").is_some());
        assert_eq!(
            payload.get("status").and_then(|status| status.as_str()),
            Some("submitted"),
        );
    }

    #[tokio::test]
    async fn post_assessments_surfaces_every_invalid_answer() {
        let router = build_router();
        let payload = json!({
            "company": "Hanbit Metals Co.",
            "answers": { "1.1": "maybe", "1.2": true },
        });

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/esg/assessments")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&payload).expect("serialize submission"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        let details = payload
            .get("details")
            .and_then(Value::as_array)
            .expect("details array");
        assert_eq!(details.len(), 2);
    }

    #[tokio::test]
    async fn score_endpoint_returns_result_and_persists_status() {
        let (service, repository, _) = build_service();
        let service = Arc::new(service);
        let record = service
            .submit(critical_submission())
            .expect("submission succeeds");

        let router = assessment_router(service.clone());
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!(
                        "/api/v1/esg/assessments/{}/score",
                        record.assessment_id.0
                    ))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("final_grade"), Some(&json!("D")));
        assert_eq!(
            payload.get("critical_violation_count").and_then(Value::as_u64),
            Some(1)
        );

        let stored = repository
            .fetch(&record.assessment_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.status.label(), "action_required");
    }

    #[tokio::test]
    async fn scoring_an_unknown_assessment_is_not_found() {
        let router = build_router();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/esg/assessments/esg-999999/score")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_assessment_returns_pending_view_when_missing() {
        let router = build_router();
        let assessment_id = "esg-424242";
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/esg/assessments/{assessment_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("assessment_id"), Some(&json!(assessment_id)));
        assert!(payload
            .get("rationale")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("pending"));
    }
}
