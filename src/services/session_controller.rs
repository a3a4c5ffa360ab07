// src/services/session_controller.rs
//
// Navigation Session Controller
//
// Watches the host page's addressable state for subject changes and
// drives one resolution per subject.
//
// CRITICAL RULES:
// - Invoked whenever the context-id collaborator's value changes,
//   independent of the underlying observation mechanism
// - Every change tears down the previously displayed badge first
// - A fixed settle delay lets the page finish rendering its own
//   metadata before the collaborator is queried
// - Cancellation is advisory: in-flight transport calls are not
//   aborted; a completed resolution re-checks that its subject is still
//   the active one before touching the UI

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{validate_context_id, validate_query, SubjectQuery};
use crate::events::{BadgeMounted, EventBus, StaleResolutionDiscarded, SubjectChanged};
use crate::page::{BadgeMount, ContextIdSource, SubjectMetadataSource};
use crate::services::resolution_service::ResolutionService;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay between observing a new subject and reading its metadata
    pub settle_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 250,
        }
    }
}

/// Lifecycle of the currently active subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No subject open
    Idle,

    /// Subject observed, waiting out the settle delay
    AwaitingMetadata,

    /// Pipeline running for the active subject
    Resolving,

    /// Badge mounted for the active subject
    Displayed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingMetadata => write!(f, "awaiting_metadata"),
            SessionState::Resolving => write!(f, "resolving"),
            SessionState::Displayed => write!(f, "displayed"),
        }
    }
}

/// The subject the session currently cares about. The generation bumps
/// on every navigation; an async tail holding an older generation has
/// lost interest and must not touch the UI.
struct ActiveSubject {
    context_id: Option<String>,
    generation: u64,
    state: SessionState,
}

pub struct SessionController {
    context_source: Arc<dyn ContextIdSource>,
    metadata_source: Arc<dyn SubjectMetadataSource>,
    badge_mount: Arc<dyn BadgeMount>,
    resolution: Arc<ResolutionService>,
    event_bus: Arc<EventBus>,
    config: SessionConfig,
    active: Mutex<ActiveSubject>,
}

impl SessionController {
    pub fn new(
        context_source: Arc<dyn ContextIdSource>,
        metadata_source: Arc<dyn SubjectMetadataSource>,
        badge_mount: Arc<dyn BadgeMount>,
        resolution: Arc<ResolutionService>,
        event_bus: Arc<EventBus>,
        config: SessionConfig,
    ) -> Self {
        Self {
            context_source,
            metadata_source,
            badge_mount,
            resolution,
            event_bus,
            config,
            active: Mutex::new(ActiveSubject {
                context_id: None,
                generation: 0,
                state: SessionState::Idle,
            }),
        }
    }

    /// Handle one observed change of the page's addressable state.
    ///
    /// Tears down the prior badge, then — when a subject is open —
    /// waits out the settle delay, reads metadata and runs the
    /// pipeline. The badge is mounted only if this navigation is still
    /// the latest one by the time the resolution completes.
    pub async fn on_location_changed(&self) {
        self.badge_mount.clear_badges();

        let context_id = self
            .context_source
            .context_id()
            .filter(|id| validate_context_id(id).is_ok());

        let generation = {
            let mut active = self.active.lock().unwrap();
            active.generation += 1;
            active.context_id = context_id.clone();
            active.state = if context_id.is_some() {
                SessionState::AwaitingMetadata
            } else {
                SessionState::Idle
            };
            active.generation
        };

        self.event_bus.emit(SubjectChanged::new(context_id.clone()));

        let Some(context_id) = context_id else {
            return;
        };

        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        if !self.is_current(generation) {
            return;
        }

        let Some(metadata) = self.metadata_source.subject_metadata() else {
            log::debug!("no subject metadata for context {}", context_id);
            self.set_state(generation, SessionState::Idle);
            return;
        };

        let query = SubjectQuery::new(metadata, context_id.clone());
        if validate_query(&query).is_err() {
            self.set_state(generation, SessionState::Idle);
            return;
        }

        self.set_state(generation, SessionState::Resolving);
        let Some(summary) = self.resolution.resolve(&query).await else {
            self.set_state(generation, SessionState::Idle);
            return;
        };

        if !self.is_current(generation) {
            self.event_bus
                .emit(StaleResolutionDiscarded::new(context_id));
            return;
        }

        let Some(text) = summary.badge_text() else {
            // Nothing to display; deliberately no UI update
            self.set_state(generation, SessionState::Idle);
            return;
        };

        self.badge_mount.show_badge(&text);
        self.set_state(generation, SessionState::Displayed);
        self.event_bus.emit(BadgeMounted::new(context_id, text));
    }

    /// The subject currently in focus, if any
    pub fn active_context(&self) -> Option<String> {
        self.active.lock().unwrap().context_id.clone()
    }

    pub fn state(&self) -> SessionState {
        self.active.lock().unwrap().state
    }

    fn is_current(&self, generation: u64) -> bool {
        self.active.lock().unwrap().generation == generation
    }

    fn set_state(&self, generation: u64, state: SessionState) {
        let mut active = self.active.lock().unwrap();
        if active.generation == generation {
            active.state = state;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::domain::{
        Candidate, CatalogRecord, RatingEntry, SubjectMetadata, TitleKind,
    };
    use crate::error::AppResult;
    use crate::integrations::{CatalogTransport, MockCatalogTransport};
    use crate::page::{MockBadgeMount, MockContextIdSource, MockSubjectMetadataSource};
    use crate::services::resolution_ledger::ResolutionLedger;

    fn inception_metadata() -> SubjectMetadata {
        SubjectMetadata {
            title: "Inception".to_string(),
            year: Some("2010".to_string()),
            kind: Some(TitleKind::Movie),
        }
    }

    fn inception_record() -> CatalogRecord {
        CatalogRecord {
            title: "Inception".to_string(),
            year: Some("2010".to_string()),
            kind: Some("movie".to_string()),
            external_id: "tt1375666".to_string(),
            primary_rating: Some("8.8".to_string()),
            ratings: vec![RatingEntry {
                source: "Rotten Tomatoes".to_string(),
                value: "87%".to_string(),
            }],
        }
    }

    fn context_source(state: Arc<Mutex<Option<String>>>) -> MockContextIdSource {
        let mut source = MockContextIdSource::new();
        source
            .expect_context_id()
            .returning(move || state.lock().unwrap().clone());
        source
    }

    fn metadata_source(metadata: Option<SubjectMetadata>) -> MockSubjectMetadataSource {
        let mut source = MockSubjectMetadataSource::new();
        source
            .expect_subject_metadata()
            .returning(move || metadata.clone());
        source
    }

    fn controller(
        context: Arc<Mutex<Option<String>>>,
        metadata: Option<SubjectMetadata>,
        badge_mount: MockBadgeMount,
        transport: Arc<dyn CatalogTransport>,
    ) -> (Arc<SessionController>, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let resolution = Arc::new(ResolutionService::new(
            transport,
            Arc::new(ResolutionLedger::new()),
            Arc::clone(&bus),
        ));
        let controller = Arc::new(SessionController::new(
            Arc::new(context_source(context)),
            Arc::new(metadata_source(metadata)),
            Arc::new(badge_mount),
            resolution,
            Arc::clone(&bus),
            SessionConfig { settle_delay_ms: 0 },
        ));
        (controller, bus)
    }

    #[tokio::test]
    async fn test_no_subject_goes_idle_and_clears_badges() {
        let mut badge_mount = MockBadgeMount::new();
        badge_mount.expect_clear_badges().times(1).return_const(());

        let (controller, _bus) = controller(
            Arc::new(Mutex::new(None)),
            None,
            badge_mount,
            Arc::new(MockCatalogTransport::new()),
        );

        controller.on_location_changed().await;

        assert_eq!(controller.state(), SessionState::Idle);
        assert!(controller.active_context().is_none());
    }

    #[tokio::test]
    async fn test_happy_path_mounts_badge() {
        let mut transport = MockCatalogTransport::new();
        transport
            .expect_fetch_by_title()
            .times(1)
            .returning(|_, _, _| Ok(Some(inception_record())));

        let mut badge_mount = MockBadgeMount::new();
        badge_mount.expect_clear_badges().times(1).return_const(());
        badge_mount
            .expect_show_badge()
            .withf(|text| text == "⭐ 8.8/10  |  🍅 87%")
            .times(1)
            .return_const(());

        let (controller, bus) = controller(
            Arc::new(Mutex::new(Some("80100".to_string()))),
            Some(inception_metadata()),
            badge_mount,
            Arc::new(transport),
        );

        controller.on_location_changed().await;

        assert_eq!(controller.state(), SessionState::Displayed);
        assert_eq!(controller.active_context().as_deref(), Some("80100"));
        assert!(bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "BadgeMounted"));
    }

    #[tokio::test]
    async fn test_missing_metadata_aborts_without_badge() {
        let mut badge_mount = MockBadgeMount::new();
        badge_mount.expect_clear_badges().times(1).return_const(());
        // No show_badge expectation: a mount would fail the test

        let (controller, _bus) = controller(
            Arc::new(Mutex::new(Some("80100".to_string()))),
            None,
            badge_mount,
            Arc::new(MockCatalogTransport::new()),
        );

        controller.on_location_changed().await;

        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_non_numeric_context_is_treated_as_absent() {
        let mut badge_mount = MockBadgeMount::new();
        badge_mount.expect_clear_badges().times(1).return_const(());

        let (controller, _bus) = controller(
            Arc::new(Mutex::new(Some("not-a-number".to_string()))),
            Some(inception_metadata()),
            badge_mount,
            Arc::new(MockCatalogTransport::new()),
        );

        controller.on_location_changed().await;

        assert_eq!(controller.state(), SessionState::Idle);
        assert!(controller.active_context().is_none());
    }

    #[tokio::test]
    async fn test_exhausted_resolution_leaves_no_badge() {
        let mut transport = MockCatalogTransport::new();
        transport
            .expect_fetch_by_title()
            .times(2)
            .returning(|_, _, _| Ok(None));
        transport
            .expect_search_by_title()
            .times(1)
            .returning(|_, _| Ok(Vec::<Candidate>::new()));

        let mut badge_mount = MockBadgeMount::new();
        badge_mount.expect_clear_badges().times(1).return_const(());

        let (controller, bus) = controller(
            Arc::new(Mutex::new(Some("80100".to_string()))),
            Some(inception_metadata()),
            badge_mount,
            Arc::new(transport),
        );

        controller.on_location_changed().await;

        assert_eq!(controller.state(), SessionState::Idle);
        assert!(bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "ResolutionExhausted"));
    }

    /// Transport whose first lookup blocks until the test releases it.
    /// Stands in for a slow network while navigation keeps moving.
    struct GatedTransport {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl CatalogTransport for GatedTransport {
        async fn fetch_by_title(
            &self,
            _title: &str,
            _year: Option<String>,
            _kind: Option<TitleKind>,
        ) -> AppResult<Option<CatalogRecord>> {
            self.release.notified().await;
            Ok(Some(inception_record()))
        }

        async fn search_by_title(
            &self,
            _title: &str,
            _kind: Option<TitleKind>,
        ) -> AppResult<Vec<Candidate>> {
            Ok(Vec::new())
        }

        async fn fetch_by_id(&self, _external_id: &str) -> AppResult<Option<CatalogRecord>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_stale_resolution_never_mounts_badge() {
        let release = Arc::new(Notify::new());
        let transport = GatedTransport {
            release: Arc::clone(&release),
        };

        let context = Arc::new(Mutex::new(Some("80100".to_string())));

        let mut badge_mount = MockBadgeMount::new();
        badge_mount.expect_clear_badges().times(3).return_const(());
        // No show_badge expectation: the stale mount would fail the test

        let (controller, bus) = controller(
            Arc::clone(&context),
            Some(inception_metadata()),
            badge_mount,
            Arc::new(transport),
        );

        // Navigation 1: resolution starts and parks on the slow lookup
        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.on_location_changed().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Navigation 2: subject closed
        *context.lock().unwrap() = None;
        controller.on_location_changed().await;

        // Navigation 3: back to the same subject; dedup short-circuits
        *context.lock().unwrap() = Some("80100".to_string());
        controller.on_location_changed().await;

        // The slow lookup finally answers
        release.notify_one();
        first.await.unwrap();

        let log = bus.get_event_log();
        assert!(log.iter().any(|e| e.event_type == "StaleResolutionDiscarded"));
        assert!(!log.iter().any(|e| e.event_type == "BadgeMounted"));
        assert_ne!(controller.state(), SessionState::Displayed);
    }
}
