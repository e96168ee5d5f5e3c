use application::report::ReportService;
use async_trait::async_trait;
use domain::event::{EventPublisher, ReportEvent};
use domain::report::{Report, ReportRepository, ReportSubmission};
use domain::DomainError;
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    pub Repo {}

    #[async_trait]
    impl ReportRepository for Repo {
        async fn find_all(&self) -> Result<Vec<Report>, DomainError>;
        async fn find_by_key(&self, loop_id: &str, section: &str) -> Result<Option<Report>, DomainError>;
        async fn find_by_id(&self, id: &str) -> Result<Option<Report>, DomainError>;
        async fn upsert(&self, candidate: Report) -> Result<Report, DomainError>;
        async fn resolve(&self, id: &str, timestamp: &str) -> Result<Option<Report>, DomainError>;
    }
}

// --- Recording publisher with optional fault injection ---

#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<ReportEvent>>,
    fail: bool,
}

impl RecordingPublisher {
    fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(
        &self,
        event: ReportEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail {
            return Err("channel fault".into());
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

fn stored_report(id: &str) -> Report {
    Report {
        id: id.to_string(),
        loop_id: "A".to_string(),
        section: "1".to_string(),
        status: "red".to_string(),
        assigned: Some("tech1".to_string()),
        remark: "leak".to_string(),
        timestamp: "10/14/2026, 3:04:05 PM".to_string(),
    }
}

fn submission() -> ReportSubmission {
    ReportSubmission {
        loop_id: "A".to_string(),
        section: "1".to_string(),
        status: Some("red".to_string()),
        assigned: Some("tech1".to_string()),
        remark: Some("leak".to_string()),
    }
}

fn service(repo: MockRepo, publisher: Arc<RecordingPublisher>) -> ReportService {
    ReportService::new(Arc::new(repo), publisher)
}

#[tokio::test]
async fn test_submit_builds_candidate_and_broadcasts_persisted_record() {
    let mut repo = MockRepo::new();
    repo.expect_upsert().times(1).returning(|candidate| {
        assert_eq!(candidate.loop_id, "A");
        assert_eq!(candidate.section, "1");
        assert_eq!(candidate.status, "red");
        assert_eq!(candidate.assigned.as_deref(), Some("tech1"));
        assert_eq!(candidate.remark, "leak");
        assert!(!candidate.id.is_empty());
        assert!(!candidate.timestamp.is_empty());
        // The store may keep an older id for an existing key
        Ok(Report {
            id: "existing".to_string(),
            ..candidate
        })
    });

    let publisher = Arc::new(RecordingPublisher::default());
    let service = service(repo, publisher.clone());

    let report = service.submit_report(submission()).await.unwrap();

    assert_eq!(report.id, "existing");
    assert_eq!(publisher.events(), vec![ReportEvent::NewReport(report)]);
}

#[tokio::test]
async fn test_submit_defaults_missing_fields() {
    let mut repo = MockRepo::new();
    repo.expect_upsert().times(1).returning(|candidate| {
        assert_eq!(candidate.status, "green");
        assert_eq!(candidate.assigned, None);
        assert_eq!(candidate.remark, "");
        Ok(candidate)
    });

    let publisher = Arc::new(RecordingPublisher::default());
    let service = service(repo, publisher.clone());

    let sub = ReportSubmission {
        status: None,
        assigned: None,
        remark: None,
        ..submission()
    };
    let report = service.submit_report(sub).await.unwrap();

    assert!(report.is_nominal());
    assert_eq!(publisher.events().len(), 1);
}

#[tokio::test]
async fn test_submit_store_failure_is_not_broadcast() {
    let mut repo = MockRepo::new();
    repo.expect_upsert()
        .times(1)
        .returning(|_| Err(DomainError::Store("connection refused".to_string())));

    let publisher = Arc::new(RecordingPublisher::default());
    let service = service(repo, publisher.clone());

    let err = service.submit_report(submission()).await.unwrap_err();

    assert_eq!(err, DomainError::Store("connection refused".to_string()));
    assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn test_submit_blank_key_never_reaches_store() {
    let mut repo = MockRepo::new();
    repo.expect_upsert().never();

    let publisher = Arc::new(RecordingPublisher::default());
    let service = service(repo, publisher.clone());

    let sub = ReportSubmission {
        section: String::new(),
        ..submission()
    };
    let err = service.submit_report(sub).await.unwrap_err();

    assert!(matches!(err, DomainError::InvalidReport(_)));
    assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn test_submit_succeeds_when_broadcast_fails() {
    let mut repo = MockRepo::new();
    repo.expect_upsert().times(1).returning(Ok);

    let publisher = Arc::new(RecordingPublisher::failing());
    let service = service(repo, publisher);

    let report = service.submit_report(submission()).await.unwrap();
    assert_eq!(report.remark, "leak");
}

#[tokio::test]
async fn test_resolve_broadcasts_id() {
    let mut repo = MockRepo::new();
    repo.expect_resolve().times(1).returning(|id, timestamp| {
        assert_eq!(id, "abc");
        Ok(Some(Report {
            status: "green".to_string(),
            remark: String::new(),
            timestamp: timestamp.to_string(),
            ..stored_report(id)
        }))
    });

    let publisher = Arc::new(RecordingPublisher::default());
    let service = service(repo, publisher.clone());

    let report = service.resolve_report("abc").await.unwrap();

    assert_eq!(report.status, "green");
    assert_eq!(report.remark, "");
    assert_eq!(report.assigned.as_deref(), Some("tech1"));
    assert_eq!(publisher.events(), vec![ReportEvent::resolved("abc")]);
}

#[tokio::test]
async fn test_resolve_unknown_id_is_not_found_and_silent() {
    let mut repo = MockRepo::new();
    repo.expect_resolve().times(1).returning(|_, _| Ok(None));

    let publisher = Arc::new(RecordingPublisher::default());
    let service = service(repo, publisher.clone());

    let err = service.resolve_report("missing").await.unwrap_err();

    assert_eq!(err, DomainError::NotFound("missing".to_string()));
    assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn test_get_report_maps_absent_to_not_found() {
    let mut repo = MockRepo::new();
    repo.expect_find_by_id().returning(|id| {
        if id == "abc" {
            Ok(Some(stored_report("abc")))
        } else {
            Ok(None)
        }
    });

    let service = service(repo, Arc::new(RecordingPublisher::default()));

    assert_eq!(service.get_report("abc").await.unwrap().id, "abc");
    assert!(matches!(
        service.get_report("nope").await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_listing_and_key_lookup_pass_through() {
    let mut repo = MockRepo::new();
    repo.expect_find_all()
        .times(1)
        .returning(|| Ok(vec![stored_report("abc")]));
    repo.expect_find_by_key()
        .times(1)
        .returning(|loop_id, section| {
            assert_eq!((loop_id, section), ("A", "1"));
            Ok(Some(stored_report("abc")))
        });

    let service = service(repo, Arc::new(RecordingPublisher::default()));

    assert_eq!(service.list_reports().await.unwrap().len(), 1);
    assert_eq!(
        service.find_report("A", "1").await.unwrap().map(|r| r.id),
        Some("abc".to_string())
    );
}
