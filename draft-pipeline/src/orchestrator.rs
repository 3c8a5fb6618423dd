use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use state_machines::state_machine;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use common::{
    error::AppError,
    storage::types::draft::{Draft, DraftStatus},
    utils::config::AppConfig,
};

use crate::generation::GenerationClient;
use crate::stores::{ContentStore, MetadataStore};
use crate::validator::RawGenerationRequest;

/// Bounded prefix of the content returned alongside the full body.
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    Received,
    Validated,
    Generated,
    ContentStored,
    MetadataStored,
    Completed,
}

impl DraftPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftPhase::Received => "Received",
            DraftPhase::Validated => "Validated",
            DraftPhase::Generated => "Generated",
            DraftPhase::ContentStored => "ContentStored",
            DraftPhase::MetadataStored => "MetadataStored",
            DraftPhase::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PhaseEvent {
    Validate,
    Generate,
    StoreContent,
    StoreMetadata,
    Complete,
}

impl PhaseEvent {
    fn as_str(&self) -> &'static str {
        match self {
            PhaseEvent::Validate => "validate",
            PhaseEvent::Generate => "generate",
            PhaseEvent::StoreContent => "store_content",
            PhaseEvent::StoreMetadata => "store_metadata",
            PhaseEvent::Complete => "complete",
        }
    }
}

mod lifecycle {
    use super::state_machine;

    state_machine! {
        name: DraftPhaseMachine,
        initial: Received,
        states: [Received, Validated, Generated, ContentStored, MetadataStored, Completed],
        events {
            validate {
                transition: { from: Received, to: Validated }
            }
            generate {
                transition: { from: Validated, to: Generated }
            }
            store_content {
                transition: { from: Generated, to: ContentStored }
            }
            store_metadata {
                transition: { from: ContentStored, to: MetadataStored }
            }
            complete {
                transition: { from: MetadataStored, to: Completed }
            }
        }
    }

    pub(super) fn received() -> DraftPhaseMachine<(), Received> {
        DraftPhaseMachine::new(())
    }

    pub(super) fn validated() -> DraftPhaseMachine<(), Validated> {
        received()
            .validate()
            .expect("validate transition from Received should exist")
    }

    pub(super) fn generated() -> DraftPhaseMachine<(), Generated> {
        validated()
            .generate()
            .expect("generate transition from Validated should exist")
    }

    pub(super) fn content_stored() -> DraftPhaseMachine<(), ContentStored> {
        generated()
            .store_content()
            .expect("store_content transition from Generated should exist")
    }

    pub(super) fn metadata_stored() -> DraftPhaseMachine<(), MetadataStored> {
        content_stored()
            .store_metadata()
            .expect("store_metadata transition from ContentStored should exist")
    }
}

fn invalid_phase(phase: DraftPhase, event: PhaseEvent) -> AppError {
    AppError::InternalError(format!(
        "Invalid draft phase transition: {} -> {}",
        phase.as_str(),
        event.as_str()
    ))
}

fn advance(phase: DraftPhase, event: PhaseEvent) -> Result<DraftPhase, AppError> {
    use lifecycle::*;
    match (phase, event) {
        (DraftPhase::Received, PhaseEvent::Validate) => received()
            .validate()
            .map(|_| DraftPhase::Validated)
            .map_err(|_| invalid_phase(phase, event)),
        (DraftPhase::Validated, PhaseEvent::Generate) => validated()
            .generate()
            .map(|_| DraftPhase::Generated)
            .map_err(|_| invalid_phase(phase, event)),
        (DraftPhase::Generated, PhaseEvent::StoreContent) => generated()
            .store_content()
            .map(|_| DraftPhase::ContentStored)
            .map_err(|_| invalid_phase(phase, event)),
        (DraftPhase::ContentStored, PhaseEvent::StoreMetadata) => content_stored()
            .store_metadata()
            .map(|_| DraftPhase::MetadataStored)
            .map_err(|_| invalid_phase(phase, event)),
        (DraftPhase::MetadataStored, PhaseEvent::Complete) => metadata_stored()
            .complete()
            .map(|_| DraftPhase::Completed)
            .map_err(|_| invalid_phase(phase, event)),
        _ => Err(invalid_phase(phase, event)),
    }
}

/// What happened to the generated content on its way into the two storage
/// tiers. Partial failures keep the content; callers see which tier is
/// missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceOutcome {
    Saved,
    ContentUnsaved { reason: String },
    MetadataUnsaved { reason: String },
}

impl PersistenceOutcome {
    pub fn status_label(&self) -> &'static str {
        match self {
            PersistenceOutcome::Saved => "success",
            PersistenceOutcome::ContentUnsaved { .. } => "content_unsaved",
            PersistenceOutcome::MetadataUnsaved { .. } => "metadata_unsaved",
        }
    }

    pub fn warning(&self) -> Option<String> {
        match self {
            PersistenceOutcome::Saved => None,
            PersistenceOutcome::ContentUnsaved { reason } => Some(format!(
                "generated content could not be persisted and is returned unsaved: {reason}"
            )),
            PersistenceOutcome::MetadataUnsaved { reason } => Some(format!(
                "content is stored but its metadata record was not written: {reason}"
            )),
        }
    }
}

/// The orchestrator's answer for one request: the draft record, the full
/// content, and how persistence went.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftReport {
    pub draft: Draft,
    pub content: String,
    pub persistence: PersistenceOutcome,
}

impl DraftReport {
    pub fn preview(&self) -> &str {
        preview(&self.content, PREVIEW_CHARS)
    }
}

/// First `max_chars` characters of the content, respecting char boundaries.
pub fn preview(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((index, _)) => content.get(..index).unwrap_or(content),
        None => content,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    /// Wall-clock budget for one request, covering generation (including its
    /// retry schedule) and both storage writes.
    pub request_deadline: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            request_deadline: Duration::from_secs(60),
        }
    }
}

impl OrchestratorSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_deadline: Duration::from_secs(config.request_deadline_secs.max(1)),
        }
    }
}

/// Sequences one request: validate, generate, write content, write metadata,
/// build the report. Each step suspends at most once and the whole run is
/// bounded by the configured deadline.
pub struct DraftOrchestrator {
    generation: GenerationClient,
    content_store: Arc<dyn ContentStore>,
    metadata_store: Arc<dyn MetadataStore>,
    settings: OrchestratorSettings,
}

impl DraftOrchestrator {
    pub fn new(
        generation: GenerationClient,
        content_store: Arc<dyn ContentStore>,
        metadata_store: Arc<dyn MetadataStore>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            generation,
            content_store,
            metadata_store,
            settings,
        }
    }

    async fn guarded<T>(
        &self,
        deadline: Instant,
        operation: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match timeout_at(deadline, operation).await {
            Ok(result) => result,
            Err(_) => Err(AppError::DeadlineExceeded(
                self.settings.request_deadline.as_secs(),
            )),
        }
    }

    pub async fn run(&self, raw: RawGenerationRequest) -> Result<DraftReport, AppError> {
        let deadline = Instant::now() + self.settings.request_deadline;
        let mut phase = DraftPhase::Received;

        // No external call happens before validation passes
        let request = raw.validate().map_err(AppError::InvalidRequest)?;
        phase = advance(phase, PhaseEvent::Validate)?;

        let outcome = self
            .guarded(deadline, self.generation.generate(&request))
            .await?;
        phase = advance(phase, PhaseEvent::Generate)?;

        // Identifier and timestamps are minted here, once, and never change
        let mut draft = Draft::new(
            &outcome.content,
            outcome.model.clone(),
            outcome.input_tokens,
            outcome.output_tokens,
        );
        info!(
            draft_id = %draft.id,
            attempts = outcome.attempts,
            word_count = draft.word_count,
            model = %draft.model,
            "Draft generated"
        );

        let write = self
            .content_store
            .put(&draft.storage_location, Bytes::from(outcome.content.clone()));
        if let Err(err) = self.guarded(deadline, write).await {
            if matches!(err, AppError::DeadlineExceeded(_)) {
                return Err(err);
            }
            warn!(
                draft_id = %draft.id,
                error = %err,
                "Content write failed; returning the generated draft unsaved"
            );
            draft.status = DraftStatus::Failed;
            return Ok(DraftReport {
                draft,
                content: outcome.content,
                persistence: PersistenceOutcome::ContentUnsaved {
                    reason: err.to_string(),
                },
            });
        }
        phase = advance(phase, PhaseEvent::StoreContent)?;

        draft.status = DraftStatus::Draft;
        if let Err(err) = self
            .guarded(deadline, self.metadata_store.put_draft(&draft))
            .await
        {
            if matches!(err, AppError::DeadlineExceeded(_)) {
                return Err(err);
            }
            // Accepted inconsistency window: the blob stays in place for
            // reconciliation, no compensating delete.
            warn!(
                draft_id = %draft.id,
                location = %draft.storage_location,
                error = %err,
                "Metadata write failed; stored content is now an orphaned blob"
            );
            return Ok(DraftReport {
                draft,
                content: outcome.content,
                persistence: PersistenceOutcome::MetadataUnsaved {
                    reason: err.to_string(),
                },
            });
        }
        phase = advance(phase, PhaseEvent::StoreMetadata)?;

        let completed = advance(phase, PhaseEvent::Complete)?;
        debug_assert_eq!(completed, DraftPhase::Completed);

        info!(
            draft_id = %draft.id,
            location = %draft.storage_location,
            "Draft completed"
        );
        Ok(DraftReport {
            draft,
            content: outcome.content,
            persistence: PersistenceOutcome::Saved,
        })
    }

    /// Read path: metadata record first, then the blob at the recorded
    /// location. A record without its blob is inconsistent, not missing.
    pub async fn retrieve(&self, id: &str) -> Result<DraftReport, AppError> {
        let draft = self
            .metadata_store
            .get_draft(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("draft {id}")))?;

        let bytes = match self.content_store.get(&draft.storage_location).await {
            Ok(bytes) => bytes,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::InconsistentState(format!(
                    "draft {id} has a metadata record but no content at {}",
                    draft.storage_location
                )));
            }
            Err(err) => return Err(err),
        };

        let content = String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::InternalError(format!("stored content for draft {id} is not valid UTF-8"))
        })?;

        Ok(DraftReport {
            draft,
            content,
            persistence: PersistenceOutcome::Saved,
        })
    }

    /// Content blobs with no matching metadata record: the reconciliation
    /// list for the deliberately uncompensated write pair.
    pub async fn find_orphaned_blobs(&self) -> Result<Vec<String>, AppError> {
        let locations = self.content_store.list("drafts/").await?;
        let mut orphaned = Vec::new();

        for location in locations {
            match Draft::id_from_location(&location) {
                Some(id) => {
                    if self.metadata_store.get_draft(id).await?.is_none() {
                        orphaned.push(location);
                    }
                }
                // Unparseable locations under the prefix are orphans too
                None => orphaned.push(location),
            }
        }

        Ok(orphaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Completion, GenerationApi, RetryPolicy};
    use crate::prompt::RenderedPrompt;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use tokio::sync::Mutex;

    struct ScriptedApi {
        script: Mutex<VecDeque<Result<Completion, AppError>>>,
        calls: AtomicU32,
    }

    impl ScriptedApi {
        fn new(script: Vec<Result<Completion, AppError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationApi for ScriptedApi {
        async fn complete(&self, _prompt: &RenderedPrompt) -> Result<Completion, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Err(AppError::InternalError("script exhausted".into())))
        }
    }

    struct SlowApi {
        delay: Duration,
    }

    #[async_trait]
    impl GenerationApi for SlowApi {
        async fn complete(&self, _prompt: &RenderedPrompt) -> Result<Completion, AppError> {
            tokio::time::sleep(self.delay).await;
            Ok(completion("too late"))
        }
    }

    struct MemContentStore {
        objects: Mutex<HashMap<String, Bytes>>,
        fail_puts: AtomicBool,
        put_calls: AtomicU32,
    }

    impl MemContentStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                objects: Mutex::new(HashMap::new()),
                fail_puts: AtomicBool::new(false),
                put_calls: AtomicU32::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            let store = Self::new();
            store.fail_puts.store(true, Ordering::SeqCst);
            store
        }

        fn put_calls(&self) -> u32 {
            self.put_calls.load(Ordering::SeqCst)
        }

        async fn remove(&self, location: &str) {
            self.objects.lock().await.remove(location);
        }
    }

    #[async_trait]
    impl ContentStore for MemContentStore {
        async fn put(&self, location: &str, content: Bytes) -> Result<(), AppError> {
            self.put_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_puts.load(Ordering::SeqCst) {
                return Err(AppError::StorageUnavailable("blob tier down".into()));
            }
            self.objects
                .lock()
                .await
                .insert(location.to_string(), content);
            Ok(())
        }

        async fn get(&self, location: &str) -> Result<Bytes, AppError> {
            self.objects
                .lock()
                .await
                .get(location)
                .cloned()
                .ok_or_else(|| AppError::NotFound(location.to_string()))
        }

        async fn exists(&self, location: &str) -> Result<bool, AppError> {
            Ok(self.objects.lock().await.contains_key(location))
        }

        async fn list(&self, prefix: &str) -> Result<Vec<String>, AppError> {
            Ok(self
                .objects
                .lock()
                .await
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        }
    }

    struct MemMetadataStore {
        records: Mutex<HashMap<String, Draft>>,
        fail_puts: AtomicBool,
        put_calls: AtomicU32,
    }

    impl MemMetadataStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(HashMap::new()),
                fail_puts: AtomicBool::new(false),
                put_calls: AtomicU32::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            let store = Self::new();
            store.fail_puts.store(true, Ordering::SeqCst);
            store
        }

        fn put_calls(&self) -> u32 {
            self.put_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataStore for MemMetadataStore {
        async fn put_draft(&self, draft: &Draft) -> Result<(), AppError> {
            self.put_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_puts.load(Ordering::SeqCst) {
                return Err(AppError::StorageUnavailable("record tier down".into()));
            }
            self.records
                .lock()
                .await
                .insert(draft.id.clone(), draft.clone());
            Ok(())
        }

        async fn get_draft(&self, id: &str) -> Result<Option<Draft>, AppError> {
            Ok(self.records.lock().await.get(id).cloned())
        }
    }

    fn completion(content: &str) -> Completion {
        Completion {
            content: content.to_string(),
            model: "test-model".to_string(),
            input_tokens: 100,
            output_tokens: 900,
        }
    }

    fn orchestrator(
        api: Arc<dyn GenerationApi>,
        content: Arc<MemContentStore>,
        metadata: Arc<MemMetadataStore>,
    ) -> DraftOrchestrator {
        DraftOrchestrator::new(
            GenerationClient::new(api, RetryPolicy::default()),
            content,
            metadata,
            OrchestratorSettings::default(),
        )
    }

    fn raw_request() -> RawGenerationRequest {
        RawGenerationRequest {
            prompt: "future of serverless".into(),
            tone: Some("professional".into()),
            length: Some("medium".into()),
            content_type: Some("article".into()),
            additional_context: None,
            target_audience: None,
        }
    }

    #[tokio::test]
    async fn invalid_request_makes_no_external_calls() {
        let api = ScriptedApi::new(vec![]);
        let content = MemContentStore::new();
        let metadata = MemMetadataStore::new();
        let orch = orchestrator(api.clone(), content.clone(), metadata.clone());

        let mut raw = raw_request();
        raw.prompt = String::new();
        raw.tone = Some("shouty".into());

        let err = orch.run(raw).await.expect_err("invalid request");
        match err {
            AppError::InvalidRequest(violations) => assert_eq!(violations.len(), 2),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
        assert_eq!(api.calls(), 0);
        assert_eq!(content.put_calls(), 0);
        assert_eq!(metadata.put_calls(), 0);
    }

    #[tokio::test]
    async fn successful_run_persists_both_tiers() {
        let body = "word ".repeat(1200).trim_end().to_string();
        let api = ScriptedApi::new(vec![Ok(completion(&body))]);
        let content = MemContentStore::new();
        let metadata = MemMetadataStore::new();
        let orch = orchestrator(api, content.clone(), metadata.clone());

        let report = orch.run(raw_request()).await.expect("run succeeds");

        assert_eq!(report.persistence, PersistenceOutcome::Saved);
        assert_eq!(report.persistence.status_label(), "success");
        assert_eq!(report.draft.status, DraftStatus::Draft);
        assert_eq!(report.draft.word_count, 1200);
        assert!(report.preview().chars().count() <= PREVIEW_CHARS);

        // Location pattern: drafts/<date>/<id>.md
        let location = &report.draft.storage_location;
        assert!(location.starts_with("drafts/"));
        assert!(location.ends_with(&format!("{}.md", report.draft.id)));
        assert!(location.contains(&report.draft.created_at.format("%Y-%m-%d").to_string()));

        // Both tiers hold the draft
        let stored = content.get(location).await.expect("blob stored");
        assert_eq!(stored, Bytes::from(report.content.clone()));
        assert!(metadata
            .get_draft(&report.draft.id)
            .await
            .expect("record read")
            .is_some());
    }

    #[tokio::test]
    async fn content_write_failure_surfaces_the_generated_text() {
        let api = ScriptedApi::new(vec![Ok(completion("the generated body"))]);
        let content = MemContentStore::failing();
        let metadata = MemMetadataStore::new();
        let orch = orchestrator(api, content.clone(), metadata.clone());

        let report = orch.run(raw_request()).await.expect("partial outcome");

        assert!(matches!(
            report.persistence,
            PersistenceOutcome::ContentUnsaved { .. }
        ));
        assert_eq!(report.persistence.status_label(), "content_unsaved");
        assert!(report.persistence.warning().is_some());
        assert_eq!(report.content, "the generated body");
        assert_eq!(report.draft.status, DraftStatus::Failed);
        // No metadata is written for content that was never stored
        assert_eq!(metadata.put_calls(), 0);
    }

    #[tokio::test]
    async fn metadata_write_failure_keeps_content_and_reports_orphan() {
        let api = ScriptedApi::new(vec![Ok(completion("the generated body"))]);
        let content = MemContentStore::new();
        let metadata = MemMetadataStore::failing();
        let orch = orchestrator(api, content.clone(), metadata);

        let report = orch.run(raw_request()).await.expect("partial outcome");

        assert!(matches!(
            report.persistence,
            PersistenceOutcome::MetadataUnsaved { .. }
        ));
        assert_eq!(report.persistence.status_label(), "metadata_unsaved");
        assert_eq!(report.content, "the generated body");

        // The blob exists without a record: exactly the orphan case
        assert!(content
            .exists(&report.draft.storage_location)
            .await
            .expect("exists"));
    }

    #[tokio::test]
    async fn retrieval_round_trips_the_stored_draft() {
        let api = ScriptedApi::new(vec![Ok(completion("stored draft body"))]);
        let content = MemContentStore::new();
        let metadata = MemMetadataStore::new();
        let orch = orchestrator(api, content, metadata);

        let written = orch.run(raw_request()).await.expect("run succeeds");
        let read = orch
            .retrieve(&written.draft.id)
            .await
            .expect("retrieval succeeds");

        assert_eq!(read.draft, written.draft);
        assert_eq!(read.content, written.content);
    }

    #[tokio::test]
    async fn retrieval_of_unknown_id_is_not_found() {
        let orch = orchestrator(
            ScriptedApi::new(vec![]),
            MemContentStore::new(),
            MemMetadataStore::new(),
        );

        let err = orch.retrieve("never-written").await.expect_err("missing");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn record_without_blob_is_inconsistent_not_missing() {
        let api = ScriptedApi::new(vec![Ok(completion("soon to vanish"))]);
        let content = MemContentStore::new();
        let metadata = MemMetadataStore::new();
        let orch = orchestrator(api, content.clone(), metadata);

        let written = orch.run(raw_request()).await.expect("run succeeds");

        // Blob deleted out-of-band, record remains
        content.remove(&written.draft.storage_location).await;

        let err = orch
            .retrieve(&written.draft.id)
            .await
            .expect_err("inconsistent");
        assert!(matches!(err, AppError::InconsistentState(_)));
    }

    #[tokio::test]
    async fn orphaned_blobs_are_listed_for_reconciliation() {
        let api = ScriptedApi::new(vec![
            Ok(completion("draft with record")),
            Ok(completion("draft without record")),
        ]);
        let content = MemContentStore::new();
        let saved_metadata = MemMetadataStore::new();
        let orch = orchestrator(api.clone(), content.clone(), saved_metadata.clone());

        let saved = orch.run(raw_request()).await.expect("saved draft");

        let failing = orchestrator(api, content.clone(), MemMetadataStore::failing());
        let orphan = failing.run(raw_request()).await.expect("orphaned draft");

        let orphans = orch.find_orphaned_blobs().await.expect("listing");
        assert_eq!(orphans, vec![orphan.draft.storage_location.clone()]);
        assert!(!orphans.contains(&saved.draft.storage_location));
    }

    #[tokio::test(start_paused = true)]
    async fn generation_past_the_deadline_is_aborted() {
        let orch = DraftOrchestrator::new(
            GenerationClient::new(
                Arc::new(SlowApi {
                    delay: Duration::from_secs(30),
                }),
                RetryPolicy::default(),
            ),
            MemContentStore::new(),
            MemMetadataStore::new(),
            OrchestratorSettings {
                request_deadline: Duration::from_secs(5),
            },
        );

        let err = orch.run(raw_request()).await.expect_err("deadline");
        assert!(matches!(err, AppError::DeadlineExceeded(5)));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let ascii = "a".repeat(600);
        assert_eq!(preview(&ascii, 500).len(), 500);

        let short = "short body";
        assert_eq!(preview(short, 500), short);

        let multibyte = "å".repeat(600);
        let cut = preview(&multibyte, 500);
        assert_eq!(cut.chars().count(), 500);
    }

    #[test]
    fn phase_machine_rejects_out_of_order_events() {
        assert!(advance(DraftPhase::Received, PhaseEvent::Validate).is_ok());
        assert!(advance(DraftPhase::Received, PhaseEvent::Generate).is_err());
        assert!(advance(DraftPhase::Generated, PhaseEvent::StoreMetadata).is_err());
        assert_eq!(
            advance(DraftPhase::MetadataStored, PhaseEvent::Complete).expect("final transition"),
            DraftPhase::Completed
        );
    }
}
