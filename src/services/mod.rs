// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod rating_renderer;
pub mod resolution_ledger;
pub mod resolution_service;
pub mod session_controller;


// Re-export all services and their types
pub use rating_renderer::{RatingRenderer, SECONDARY_SOURCE};

pub use resolution_ledger::{
    ResolutionLedger,
    ResolutionMarker,
};

pub use resolution_service::{
    MatchRules,
    ResolutionService,
    ResolutionStage,
};

pub use session_controller::{
    SessionConfig,
    SessionController,
    SessionState,
};
