// src/services/resolution_ledger.rs
//
// Resolution Ledger - session-scoped dedup state
//
// CRITICAL RULES:
// - The ONLY mutable shared state in the core
// - Injected at construction (never a module-level singleton), so tests
//   can instantiate isolated sessions
// - Claiming a context is one atomic check-and-mark
// - Entries live for the session; nothing is persisted

use std::collections::HashMap;
use std::sync::Mutex;

/// Marker for a context that has entered the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMarker {
    /// A pipeline run is underway for this context
    InProgress,

    /// A pipeline run terminated with a catalog match
    Resolved,
}

impl std::fmt::Display for ResolutionMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionMarker::InProgress => write!(f, "in_progress"),
            ResolutionMarker::Resolved => write!(f, "resolved"),
        }
    }
}

/// Per-session map from context id to resolution marker.
/// At most one active resolution per context: a claim on an occupied
/// context fails and reports the existing marker.
pub struct ResolutionLedger {
    entries: Mutex<HashMap<String, ResolutionMarker>>,
}

impl ResolutionLedger {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically claim a context as in-progress.
    /// Err carries the existing marker when the context is already
    /// claimed; the caller must then make no network calls.
    pub fn try_begin(&self, context_id: &str) -> Result<(), ResolutionMarker> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(existing) = entries.get(context_id) {
            return Err(*existing);
        }
        entries.insert(context_id.to_string(), ResolutionMarker::InProgress);
        Ok(())
    }

    /// Record a terminal success for a claimed context
    pub fn mark_resolved(&self, context_id: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(context_id.to_string(), ResolutionMarker::Resolved);
    }

    /// Forget a context entirely. Used when a run exhausts all stages:
    /// a later navigation back to the same subject starts a fresh run.
    pub fn clear(&self, context_id: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(context_id);
    }

    /// Current marker for a context, if any
    pub fn marker(&self, context_id: &str) -> Option<ResolutionMarker> {
        let entries = self.entries.lock().unwrap();
        entries.get(context_id).copied()
    }
}

impl Default for ResolutionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_exclusive() {
        let ledger = ResolutionLedger::new();

        assert!(ledger.try_begin("80100").is_ok());
        assert_eq!(ledger.try_begin("80100"), Err(ResolutionMarker::InProgress));

        // A different context is unaffected
        assert!(ledger.try_begin("80200").is_ok());
    }

    #[test]
    fn test_resolved_context_stays_claimed() {
        let ledger = ResolutionLedger::new();

        ledger.try_begin("80100").unwrap();
        ledger.mark_resolved("80100");

        assert_eq!(ledger.marker("80100"), Some(ResolutionMarker::Resolved));
        assert_eq!(ledger.try_begin("80100"), Err(ResolutionMarker::Resolved));
    }

    #[test]
    fn test_cleared_context_can_be_claimed_again() {
        let ledger = ResolutionLedger::new();

        ledger.try_begin("80100").unwrap();
        ledger.clear("80100");

        assert_eq!(ledger.marker("80100"), None);
        assert!(ledger.try_begin("80100").is_ok());
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(ResolutionMarker::InProgress.to_string(), "in_progress");
        assert_eq!(ResolutionMarker::Resolved.to_string(), "resolved");
    }
}
