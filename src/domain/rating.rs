// src/domain/rating.rs
//
// Rating Summary - the resolved, displayable outcome of a pipeline run.
//
// CRITICAL INVARIANTS:
// - Immutable once produced (no &mut self methods)
// - Both scores absent means "nothing to display": the caller must not
//   emit a UI update

use serde::{Deserialize, Serialize};

/// The two displayed rating values extracted from a resolved catalog
/// record. Either or both may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Primary numeric rating on a 10-point scale, e.g. "8.8"
    pub primary_score: Option<String>,

    /// Secondary categorical rating, e.g. "87%"
    pub secondary_score: Option<String>,
}

impl RatingSummary {
    pub fn new(primary_score: Option<String>, secondary_score: Option<String>) -> Self {
        Self {
            primary_score,
            secondary_score,
        }
    }

    /// True when there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.primary_score.is_none() && self.secondary_score.is_none()
    }

    /// Badge display text: "⭐ {primary}/10  |  🍅 {secondary}", omitting
    /// either half and its separator when that rating is absent.
    /// Returns None when both are absent.
    pub fn badge_text(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::with_capacity(2);
        if let Some(primary) = &self.primary_score {
            parts.push(format!("⭐ {}/10", primary));
        }
        if let Some(secondary) = &self.secondary_score {
            parts.push(format!("🍅 {}", secondary));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("  |  "))
        }
    }
}
