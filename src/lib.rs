// src/lib.rs
// RateHub - In-page ratings overlay engine
//
// Architecture:
// - Domain-centric: value objects and invariants live in `domain`
// - Event-driven: services coordinate through the event bus
// - Explicit: no implicit behavior, no magic
// - Port-based: the host page and the rating catalog sit behind narrow
//   trait interfaces; all decisions live in services

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;

// ============================================================================
// PORTS & INTEGRATIONS
// ============================================================================

pub mod integrations;
pub mod page;

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub mod services;

// ============================================================================
// PUBLIC API - Domain (value objects and invariants)
// ============================================================================

pub use domain::{
    validate_context_id,
    validate_query,
    // Catalog
    Candidate,
    CatalogRecord,
    RatingEntry,
    // Rating
    RatingSummary,
    // Subject
    SubjectMetadata,
    SubjectQuery,
    TitleKind,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BadgeMounted,
    DomainEvent,
    EventBus,
    EventLogEntry,
    RatingsResolved,
    ResolutionExhausted,
    ResolutionSkipped,
    ResolutionStarted,
    StaleResolutionDiscarded,
    SubjectChanged,
};

// ============================================================================
// PUBLIC API - Host Page Ports
// ============================================================================

pub use page::{extract_year, strip_site_suffix, BadgeMount, ContextIdSource, SubjectMetadataSource};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CatalogConfig, CatalogTransport, OmdbClient, DEFAULT_API_KEY};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Rating Renderer
    RatingRenderer,
    SECONDARY_SOURCE,

    // Resolution Ledger
    ResolutionLedger,
    ResolutionMarker,

    // Resolution Service
    MatchRules,
    ResolutionService,
    ResolutionStage,

    // Navigation Session Controller
    SessionConfig,
    SessionController,
    SessionState,
};
