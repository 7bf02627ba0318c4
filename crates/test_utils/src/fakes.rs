//! In-memory fakes for the domain ports
//!
//! Each fake records enough of its own history that tests can assert not just
//! outcomes but side effects: which files were stored, which were deleted,
//! whether a claim record ever existed. Failure injection switches let tests
//! drive every failure exit of the ingestion state machine.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use core_kernel::ClaimId;
use domain_claims::{
    Claim, ClaimError, ClaimStore, DocumentExtractor, DocumentUpload, ExtractionResult,
    FileStore, StoredFile,
};

use crate::fixtures::sample_extraction;

/// In-memory claim store
///
/// Keeps claims in insertion order internally; `list_newest_first` sorts by
/// `created_at` descending with the time-ordered id as tiebreak, matching the
/// database adapter's ordering.
#[derive(Default)]
pub struct InMemoryClaimStore {
    claims: Mutex<Vec<Claim>>,
    fail_inserts: AtomicBool,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent insert fail with a persistence error
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of stored claims
    pub fn len(&self) -> usize {
        self.claims.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert(&self, claim: &Claim) -> Result<(), ClaimError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(ClaimError::persistence("injected insert failure"));
        }
        self.claims.lock().unwrap().push(claim.clone());
        Ok(())
    }

    async fn get(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_newest_first(&self) -> Result<Vec<Claim>, ClaimError> {
        let mut claims = self.claims.lock().unwrap().clone();
        claims.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(claims)
    }

    async fn delete(&self, id: ClaimId) -> Result<bool, ClaimError> {
        let mut claims = self.claims.lock().unwrap();
        let before = claims.len();
        claims.retain(|c| c.id != id);
        Ok(claims.len() < before)
    }
}

/// In-memory file store with delete recording
///
/// Generates public paths with the same shape as the disk adapter
/// (`/uploads/<field>-<epoch-ms>-<seq>.<ext>`), backed by a monotonic counter
/// so concurrent stores never collide.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
    seq: AtomicU64,
    fail_stores: AtomicBool,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent store fail with a storage error
    pub fn fail_stores(&self, fail: bool) {
        self.fail_stores.store(fail, Ordering::SeqCst);
    }

    /// True if a file exists under the given public path
    pub fn contains(&self, public_path: &str) -> bool {
        self.files.lock().unwrap().contains_key(public_path)
    }

    /// Public paths of all currently stored files
    pub fn stored_paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    /// Number of currently stored files
    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    /// Every public path a delete was issued for, in order
    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn store(&self, upload: &DocumentUpload) -> Result<StoredFile, ClaimError> {
        if self.fail_stores.load(Ordering::SeqCst) {
            return Err(ClaimError::storage("injected store failure"));
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let millis = chrono::Utc::now().timestamp_millis();
        let ext = std::path::Path::new(&upload.original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let name = format!("{}-{}-{}{}", upload.field, millis, seq, ext);
        let public_path = format!("/uploads/{name}");

        self.files
            .lock()
            .unwrap()
            .insert(public_path.clone(), upload.bytes.clone());

        Ok(StoredFile {
            disk_path: PathBuf::from(&name),
            public_path,
            original_name: upload.original_name.clone(),
            content_type: upload.content_type.clone(),
            size: upload.bytes.len() as u64,
        })
    }

    async fn delete(&self, public_path: &str) -> Result<bool, ClaimError> {
        self.deleted.lock().unwrap().push(public_path.to_string());
        Ok(self.files.lock().unwrap().remove(public_path).is_some())
    }
}

/// Scripted behavior for the stub extractor
pub enum StubBehavior {
    Succeed(ExtractionResult),
    FailApplication(String),
    FailNetwork(String),
}

/// Stub extraction client
///
/// Returns a fixed outcome configured by the test; defaults to the sample
/// extraction fixture.
pub struct StubExtractor {
    behavior: Mutex<StubBehavior>,
}

impl Default for StubExtractor {
    fn default() -> Self {
        Self::succeeding()
    }
}

impl StubExtractor {
    /// Always returns the sample extraction fixture
    pub fn succeeding() -> Self {
        Self {
            behavior: Mutex::new(StubBehavior::Succeed(sample_extraction())),
        }
    }

    /// Always returns the given result
    pub fn with_result(result: ExtractionResult) -> Self {
        Self {
            behavior: Mutex::new(StubBehavior::Succeed(result)),
        }
    }

    /// Always fails as if the service responded `success: false`
    pub fn failing_application(reason: impl Into<String>) -> Self {
        Self {
            behavior: Mutex::new(StubBehavior::FailApplication(reason.into())),
        }
    }

    /// Always fails as if the service were unreachable
    pub fn failing_network(reason: impl Into<String>) -> Self {
        Self {
            behavior: Mutex::new(StubBehavior::FailNetwork(reason.into())),
        }
    }

    /// Replaces the scripted behavior
    pub fn set_behavior(&self, behavior: StubBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl DocumentExtractor for StubExtractor {
    async fn extract(
        &self,
        _insurance_card: &DocumentUpload,
        _clinical_doc: &DocumentUpload,
    ) -> Result<ExtractionResult, ClaimError> {
        match &*self.behavior.lock().unwrap() {
            StubBehavior::Succeed(result) => Ok(result.clone()),
            StubBehavior::FailApplication(reason) => {
                Err(ClaimError::extraction_application(reason.clone()))
            }
            StubBehavior::FailNetwork(reason) => {
                Err(ClaimError::extraction_network(reason.clone()))
            }
        }
    }
}
