// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod rating;
pub mod subject;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Subject Domain
pub use subject::{validate_context_id, validate_query, SubjectMetadata, SubjectQuery, TitleKind};

// Catalog Value Objects
pub use catalog::{Candidate, CatalogRecord, RatingEntry};

// Rating Summary
pub use rating::RatingSummary;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
