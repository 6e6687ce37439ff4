//! Service-level tests for loan application records.
//!
//! The repository and uploader are in-memory doubles so every failure mode can
//! be forced deterministically.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use lendy_shared::ApplicationId;

use super::*;
use crate::storage::{DocumentUploader, LocalDocument, StorageConfig, UploadError};

/// Mock repository with a deterministic clock: the n-th write happens at
/// `BASE + n seconds`.
struct MockApplicationRepository {
    records: Mutex<HashMap<ApplicationId, LoanApplication>>,
    ticks: AtomicUsize,
    fail_writes: bool,
}

impl MockApplicationRepository {
    fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            ticks: AtomicUsize::new(0),
            fail_writes: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
            + Duration::seconds(i64::try_from(tick).unwrap())
    }

    fn snapshot(&self) -> HashMap<ApplicationId, LoanApplication> {
        self.records.lock().unwrap().clone()
    }
}

impl ApplicationRepository for MockApplicationRepository {
    async fn create(&self, input: NewLoanApplication) -> Result<LoanApplication, ApplicationError> {
        if self.fail_writes {
            return Err(ApplicationError::persistence("quota exceeded"));
        }
        let now = self.now();
        let (document_url, document_name) = input
            .document
            .map_or_else(|| (String::new(), String::new()), |d| (d.url, d.name));
        let record = LoanApplication {
            id: ApplicationId::new(),
            name: input.name,
            email: input.email,
            telephone: input.telephone,
            occupation: input.occupation,
            salary: input.salary,
            document_url,
            document_name,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<LoanApplication>, ApplicationError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<LoanApplication>, ApplicationError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn update(
        &self,
        id: ApplicationId,
        changes: ApplicationChanges,
    ) -> Result<Option<LoanApplication>, ApplicationError> {
        if self.fail_writes {
            return Err(ApplicationError::persistence("quota exceeded"));
        }
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        let (document_url, document_name) = changes
            .document
            .map_or_else(|| (String::new(), String::new()), |d| (d.url, d.name));
        record.name = changes.name;
        record.email = changes.email;
        record.telephone = changes.telephone;
        record.occupation = changes.occupation;
        record.salary = changes.salary;
        record.document_url = document_url;
        record.document_name = document_name;
        record.updated_at = changes.updated_at;
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationError> {
        Ok(self.records.lock().unwrap().remove(&id).is_some())
    }
}

/// Mock uploader that either succeeds with a predictable URL or rejects.
struct MockUploader {
    fail: bool,
    calls: AtomicUsize,
}

impl MockUploader {
    fn ok() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentUploader for MockUploader {
    async fn upload(&self, document: &LocalDocument) -> Result<String, UploadError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(UploadError::rejected(500, "upstream exploded"));
        }
        Ok(format!(
            "https://res.cloudinary.com/demo/image/upload/v{n}/{}",
            document.display_name
        ))
    }
}

type Service = ApplicationService<MockApplicationRepository, MockUploader>;

fn service_with(
    repo: MockApplicationRepository,
    uploader: MockUploader,
) -> (Service, Arc<MockApplicationRepository>, Arc<MockUploader>) {
    let repo = Arc::new(repo);
    let uploader = Arc::new(uploader);
    let config = StorageConfig::new("https://api.cloudinary.com/v1_1/demo/upload", "lendy-loan");
    (
        ApplicationService::new(repo.clone(), uploader.clone(), config),
        repo,
        uploader,
    )
}

fn ada() -> LoanFormData {
    LoanFormData {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        telephone: "555-0100".to_string(),
        occupation: "Engineer".to_string(),
        salary: "9000".to_string(),
        document: None,
    }
}

fn form(name: &str) -> LoanFormData {
    LoanFormData {
        name: name.to_string(),
        ..ada()
    }
}

fn with_document(mut form: LoanFormData, file_name: &str) -> LoanFormData {
    form.document = Some(LocalDocument::pdf(format!("/tmp/{file_name}"), file_name));
    form
}

#[tokio::test]
async fn test_submit_then_get_one_round_trip() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());

    let id = service.submit(ada()).await.unwrap();
    let record = service.get_one(id).await.unwrap().expect("record exists");

    assert_eq!(record.id, id);
    assert_eq!(record.name, "Ada");
    assert_eq!(record.email, "ada@example.com");
    assert_eq!(record.telephone, "555-0100");
    assert_eq!(record.occupation, "Engineer");
    assert_eq!(record.salary, "9000");
    assert_eq!(record.document_url, "");
    assert_eq!(record.document_name, "");
    assert_eq!(record.created_at, record.updated_at);
}

#[tokio::test]
async fn test_submit_with_document_uploads_before_persisting() {
    let (service, _, uploader) =
        service_with(MockApplicationRepository::new(), MockUploader::ok());

    let id = service
        .submit(with_document(ada(), "paysheet.pdf"))
        .await
        .unwrap();
    let record = service.get_one(id).await.unwrap().unwrap();

    assert_eq!(uploader.calls(), 1);
    assert_eq!(
        record.document_url,
        "https://res.cloudinary.com/demo/image/upload/v1/paysheet.pdf"
    );
    assert_eq!(record.document_name, "paysheet.pdf");
}

#[tokio::test]
async fn test_submit_upload_failure_creates_nothing() {
    let (service, repo, _) =
        service_with(MockApplicationRepository::new(), MockUploader::failing());

    let err = service
        .submit(with_document(ada(), "paysheet.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Upload(_)));
    assert!(err.to_string().contains("upstream exploded"));
    assert!(repo.snapshot().is_empty());
}

#[tokio::test]
async fn test_submit_invalid_form_skips_upload() {
    let (service, repo, uploader) =
        service_with(MockApplicationRepository::new(), MockUploader::ok());

    let mut bad = with_document(ada(), "paysheet.pdf");
    bad.email = "not-an-email".to_string();

    let err = service.submit(bad).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Validation(_)));
    assert_eq!(uploader.calls(), 0);
    assert!(repo.snapshot().is_empty());
}

#[tokio::test]
async fn test_submit_persistence_failure_propagates() {
    let (service, _, _) = service_with(MockApplicationRepository::failing(), MockUploader::ok());

    let err = service.submit(ada()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Persistence(_)));
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());

    let a = service.submit(form("A")).await.unwrap();
    let b = service.submit(form("B")).await.unwrap();
    let c = service.submit(form("C")).await.unwrap();

    let ids: Vec<ApplicationId> = service.list().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[tokio::test]
async fn test_list_empty() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_one_missing_is_none() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());
    let result = service.get_one(ApplicationId::new()).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (service, _, uploader) =
        service_with(MockApplicationRepository::new(), MockUploader::ok());
    let id = ApplicationId::new();

    let err = service
        .update(id, with_document(ada(), "paysheet.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(missing) if missing == id));
    assert_eq!(uploader.calls(), 0);
}

#[tokio::test]
async fn test_update_missing_with_invalid_form_is_not_found() {
    let (service, _, uploader) =
        service_with(MockApplicationRepository::new(), MockUploader::ok());
    let id = ApplicationId::new();
    let mut form = with_document(ada(), "paysheet.pdf");
    form.email = "not-an-email".to_string();

    let err = service.update(id, form).await.unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(missing) if missing == id));
    assert_eq!(uploader.calls(), 0);
}

#[tokio::test]
async fn test_update_without_document_preserves_attachment() {
    let (service, _, uploader) =
        service_with(MockApplicationRepository::new(), MockUploader::ok());
    let id = service
        .submit(with_document(ada(), "paysheet.pdf"))
        .await
        .unwrap();
    let before = service.get_one(id).await.unwrap().unwrap();

    let edited = LoanFormData {
        name: "Ada Lovelace".to_string(),
        email: "ada@analytical.engine".to_string(),
        telephone: "555-0199".to_string(),
        occupation: "Mathematician".to_string(),
        salary: "12000".to_string(),
        document: None,
    };
    service.update(id, edited).await.unwrap();
    let after = service.get_one(id).await.unwrap().unwrap();

    assert_eq!(uploader.calls(), 1);
    assert_eq!(after.document_url, before.document_url);
    assert_eq!(after.document_name, before.document_name);
    assert_eq!(after.name, "Ada Lovelace");
    assert_eq!(after.email, "ada@analytical.engine");
    assert_eq!(after.telephone, "555-0199");
    assert_eq!(after.occupation, "Mathematician");
    assert_eq!(after.salary, "12000");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= after.created_at);
}

#[tokio::test]
async fn test_update_with_document_replaces_attachment() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());
    let id = service
        .submit(with_document(ada(), "january.pdf"))
        .await
        .unwrap();

    service
        .update(id, with_document(ada(), "february.pdf"))
        .await
        .unwrap();
    let after = service.get_one(id).await.unwrap().unwrap();

    assert_eq!(after.document_name, "february.pdf");
    assert_eq!(
        after.document_url,
        "https://res.cloudinary.com/demo/image/upload/v2/february.pdf"
    );
}

#[tokio::test]
async fn test_update_upload_failure_leaves_record_unchanged() {
    let repo = MockApplicationRepository::new();
    let (seed_service, repo, _) = service_with(repo, MockUploader::ok());
    let id = seed_service
        .submit(with_document(ada(), "january.pdf"))
        .await
        .unwrap();
    let before = repo.snapshot();

    let config = StorageConfig::new("https://api.cloudinary.com/v1_1/demo/upload", "lendy-loan");
    let failing = ApplicationService::new(repo.clone(), Arc::new(MockUploader::failing()), config);

    let mut edited = with_document(form("Changed"), "february.pdf");
    edited.salary = "1".to_string();
    let err = failing.update(id, edited).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Upload(_)));
    assert_eq!(repo.snapshot(), before);
}

#[tokio::test]
async fn test_delete_removes_record_and_is_idempotent() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());
    let id = service.submit(ada()).await.unwrap();

    service.delete(id).await.unwrap();
    assert!(service.get_one(id).await.unwrap().is_none());

    service.delete(id).await.unwrap();
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());
    let first = service.submit(ada()).await.unwrap();
    service.delete(first).await.unwrap();
    let second = service.submit(ada()).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_concrete_scenario_single_submission() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());

    service.submit(ada()).await.unwrap();
    let records = service.list().await.unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(
        (
            record.name.as_str(),
            record.email.as_str(),
            record.telephone.as_str(),
            record.occupation.as_str(),
            record.salary.as_str(),
        ),
        ("Ada", "ada@example.com", "555-0100", "Engineer", "9000")
    );
    assert!(record.document().is_none());
}

#[test]
fn test_plausible_document_url_uses_config() {
    let (service, _, _) = service_with(MockApplicationRepository::new(), MockUploader::ok());
    assert!(service.is_plausible_document_url(
        "https://res.cloudinary.com/demo/image/upload/v1/abc"
    ));
    assert!(!service.is_plausible_document_url("ftp:/nope"));
}
