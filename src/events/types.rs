// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// NAVIGATION EVENTS
// ============================================================================

/// Emitted whenever the session controller observes a new page subject
/// (or the absence of one)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: Option<String>,
}

impl SubjectChanged {
    pub fn new(context_id: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
        }
    }
}

impl DomainEvent for SubjectChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SubjectChanged" }
}

// ============================================================================
// RESOLUTION EVENTS
// ============================================================================

/// Emitted when the pipeline begins resolving a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: String,
    pub title: String,
}

impl ResolutionStarted {
    pub fn new(context_id: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
            title,
        }
    }
}

impl DomainEvent for ResolutionStarted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResolutionStarted" }
}

/// Emitted when a resolution request short-circuits because the context
/// is already in progress or resolved (no network calls made)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionSkipped {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: String,
    pub marker: String, // "in_progress" or "resolved"
}

impl ResolutionSkipped {
    pub fn new(context_id: String, marker: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
            marker,
        }
    }
}

impl DomainEvent for ResolutionSkipped {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResolutionSkipped" }
}

/// Emitted when a pipeline run terminates with a catalog match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: String,
    pub stage: String, // "direct_constrained", "search_then_fetch", "direct_unconstrained"
    pub primary_score: Option<String>,
    pub secondary_score: Option<String>,
}

impl RatingsResolved {
    pub fn new(
        context_id: String,
        stage: String,
        primary_score: Option<String>,
        secondary_score: Option<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
            stage,
            primary_score,
            secondary_score,
        }
    }
}

impl DomainEvent for RatingsResolved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RatingsResolved" }
}

/// Emitted when all three stages complete without a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionExhausted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: String,
    pub title: String,
}

impl ResolutionExhausted {
    pub fn new(context_id: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
            title,
        }
    }
}

impl DomainEvent for ResolutionExhausted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResolutionExhausted" }
}

// ============================================================================
// DISPLAY EVENTS
// ============================================================================

/// Emitted when a badge is mounted for the active subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeMounted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: String,
    pub text: String,
}

impl BadgeMounted {
    pub fn new(context_id: String, text: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
            text,
        }
    }
}

impl DomainEvent for BadgeMounted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BadgeMounted" }
}

/// Emitted when a resolution completes after its subject stopped being
/// the active one; the result is discarded instead of mounted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleResolutionDiscarded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub context_id: String,
}

impl StaleResolutionDiscarded {
    pub fn new(context_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            context_id,
        }
    }
}

impl DomainEvent for StaleResolutionDiscarded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "StaleResolutionDiscarded" }
}
