// src/services/resolution_service.rs
//
// Resolution Service
//
// Resolves one page subject to one catalog record through a three-stage
// fallback, then hands the record to the rating renderer.
//
// CRITICAL RULES:
// - Stages run strictly in order; each starts only after the previous
//   one's terminal outcome is known
// - Transport errors, malformed payloads and catalog misses are the
//   same thing: fall through to the next, looser stage
// - No stage is ever retried; the pipeline only escalates
// - At most one run per context id, enforced through the ledger before
//   any network call

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;

use crate::domain::{
    validate_query, Candidate, CatalogRecord, RatingSummary, SubjectQuery, TitleKind,
};
use crate::events::{
    EventBus, RatingsResolved, ResolutionExhausted, ResolutionSkipped, ResolutionStarted,
};
use crate::integrations::CatalogTransport;
use crate::services::rating_renderer::RatingRenderer;
use crate::services::resolution_ledger::ResolutionLedger;

/// The three ordered lookup strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    /// Fetch by title + year + kind
    DirectConstrained,

    /// Free-text search, rescore, fetch the best candidate by id
    SearchThenFetch,

    /// Fetch by title alone (loosest, last resort)
    DirectUnconstrained,
}

impl std::fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionStage::DirectConstrained => write!(f, "direct_constrained"),
            ResolutionStage::SearchThenFetch => write!(f, "search_then_fetch"),
            ResolutionStage::DirectUnconstrained => write!(f, "direct_unconstrained"),
        }
    }
}

// ============================================================================
// RESOLUTION SERVICE
// ============================================================================

pub struct ResolutionService {
    transport: Arc<dyn CatalogTransport>,
    ledger: Arc<ResolutionLedger>,
    event_bus: Arc<EventBus>,
    rules: MatchRules,
}

impl ResolutionService {
    pub fn new(
        transport: Arc<dyn CatalogTransport>,
        ledger: Arc<ResolutionLedger>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            transport,
            ledger,
            event_bus,
            rules: MatchRules::default(),
        }
    }

    /// Resolve one subject query to its displayable rating summary.
    ///
    /// Idempotent per context id: a context already in progress or
    /// resolved short-circuits without any network call. Returns None
    /// when all three stages come up empty.
    pub async fn resolve(&self, query: &SubjectQuery) -> Option<RatingSummary> {
        if let Err(e) = validate_query(query) {
            log::debug!("rejecting resolution request: {}", e);
            return None;
        }

        if let Err(marker) = self.ledger.try_begin(&query.context_id) {
            self.event_bus.emit(ResolutionSkipped::new(
                query.context_id.clone(),
                marker.to_string(),
            ));
            return None;
        }

        self.event_bus.emit(ResolutionStarted::new(
            query.context_id.clone(),
            query.title.clone(),
        ));

        match self.run_stages(query).await {
            Some((stage, record)) => {
                let summary = RatingRenderer::render(&record);
                self.ledger.mark_resolved(&query.context_id);
                self.event_bus.emit(RatingsResolved::new(
                    query.context_id.clone(),
                    stage.to_string(),
                    summary.primary_score.clone(),
                    summary.secondary_score.clone(),
                ));
                Some(summary)
            }
            None => {
                // Exhausted contexts are forgotten; a later navigation
                // back to the same subject starts a fresh run.
                self.ledger.clear(&query.context_id);
                self.event_bus.emit(ResolutionExhausted::new(
                    query.context_id.clone(),
                    query.title.clone(),
                ));
                None
            }
        }
    }

    // ========================================================================
    // INTERNAL STAGE LOGIC
    // ========================================================================

    async fn run_stages(&self, query: &SubjectQuery) -> Option<(ResolutionStage, CatalogRecord)> {
        if let Some(record) = self
            .direct_lookup(&query.title, query.year.clone(), query.kind)
            .await
        {
            return Some((ResolutionStage::DirectConstrained, record));
        }

        if let Some(record) = self.search_then_fetch(query).await {
            return Some((ResolutionStage::SearchThenFetch, record));
        }

        self.direct_lookup(&query.title, None, None)
            .await
            .map(|record| (ResolutionStage::DirectUnconstrained, record))
    }

    async fn direct_lookup(
        &self,
        title: &str,
        year: Option<String>,
        kind: Option<TitleKind>,
    ) -> Option<CatalogRecord> {
        match self.transport.fetch_by_title(title, year, kind).await {
            Ok(record) => record,
            Err(e) => {
                log::debug!("direct lookup failed for '{}': {}", title, e);
                None
            }
        }
    }

    async fn search_then_fetch(&self, query: &SubjectQuery) -> Option<CatalogRecord> {
        let candidates = match self.transport.search_by_title(&query.title, query.kind).await {
            Ok(candidates) => candidates,
            Err(e) => {
                log::debug!("search failed for '{}': {}", query.title, e);
                return None;
            }
        };

        let best = self.rules.pick_best(query, &candidates)?;
        if best.external_id.is_empty() {
            return None;
        }

        match self.transport.fetch_by_id(&best.external_id).await {
            Ok(record) => record,
            Err(e) => {
                log::debug!("fetch by id '{}' failed: {}", best.external_id, e);
                None
            }
        }
    }
}

// ============================================================================
// MATCH RULES (DETERMINISTIC)
// ============================================================================

/// Deterministic rules for comparing noisy page titles against catalog
/// entries. All rules are explicit and ordered.
pub struct MatchRules {
    /// Curly apostrophe variants unified to the straight form
    apostrophes: Regex,

    /// Runs of characters that are neither alphanumeric nor apostrophe
    non_word: Regex,

    /// English definite/indefinite articles as whole words
    articles: Regex,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            apostrophes: Regex::new(r"[’‘]").unwrap(),
            non_word: Regex::new(r"[^a-z0-9']+").unwrap(),
            articles: Regex::new(r"\b(the|a|an)\b").unwrap(),
        }
    }
}

impl MatchRules {
    /// Canonicalize a title for comparison. Never used for display.
    ///
    /// Lower-case, unify apostrophes, squash non-word runs to single
    /// spaces, drop articles, collapse whitespace, trim. Idempotent.
    pub fn normalize_title(&self, title: &str) -> String {
        let lowered = title.to_lowercase();
        let unified = self.apostrophes.replace_all(&lowered, "'");
        let spaced = self.non_word.replace_all(&unified, " ");
        let stripped = self.articles.replace_all(&spaced, " ");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Score one search candidate against the query.
    ///
    /// Exact normalized match beats substring containment beats bare
    /// word overlap; year-prefix and kind agreement add fixed bonuses.
    pub fn score_candidate(&self, query: &SubjectQuery, candidate: &Candidate) -> i32 {
        let q = self.normalize_title(&query.title);
        let t = self.normalize_title(&candidate.title);

        let mut score = if t == q {
            100
        } else if t.contains(q.as_str()) || q.contains(t.as_str()) {
            60
        } else {
            let query_words: HashSet<&str> = q.split_whitespace().collect();
            t.split_whitespace()
                .filter(|word| query_words.contains(word))
                .count() as i32
        };

        // Prefix comparison so multi-year ranges like "2001–2004" still
        // match a four-digit query year
        if let (Some(query_year), Some(candidate_year)) = (&query.year, &candidate.year) {
            if candidate_year.starts_with(query_year.as_str()) {
                score += 20;
            }
        }

        if let (Some(query_kind), Some(candidate_kind)) = (query.kind, &candidate.kind) {
            if candidate_kind.eq_ignore_ascii_case(query_kind.as_str()) {
                score += 15;
            }
        }

        score
    }

    /// Best candidate by strictly greatest score in iteration order;
    /// first-seen wins on ties. None for an empty list.
    pub fn pick_best<'a>(
        &self,
        query: &SubjectQuery,
        candidates: &'a [Candidate],
    ) -> Option<&'a Candidate> {
        let mut best: Option<&Candidate> = None;
        let mut best_score = -1;

        for candidate in candidates {
            let score = self.score_candidate(query, candidate);
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        best
    }
}

// ============================================================================
// TESTS
// ============================================================================
