// src/services/rating_renderer.rs
//
// Rating Renderer
//
// Extracts the two displayed rating values from a resolved catalog
// record. Pure and deterministic; formatting of the badge text itself
// lives on RatingSummary.

use crate::domain::{CatalogRecord, RatingSummary};

/// Labeled source of the secondary rating entry
pub const SECONDARY_SOURCE: &str = "Rotten Tomatoes";

/// The catalog's in-band marker for an absent rating
const UNAVAILABLE: &str = "N/A";

pub struct RatingRenderer;

impl RatingRenderer {
    /// Produce the displayable summary for a record. Either or both
    /// scores may come out None; a fully empty summary means the caller
    /// must not emit a UI update.
    pub fn render(record: &CatalogRecord) -> RatingSummary {
        let primary = record
            .primary_rating
            .as_deref()
            .filter(|rating| !rating.is_empty() && *rating != UNAVAILABLE)
            .map(str::to_string);

        let secondary = record
            .ratings
            .iter()
            .find(|entry| entry.source == SECONDARY_SOURCE)
            .map(|entry| entry.value.clone());

        RatingSummary::new(primary, secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RatingEntry;

    fn record(primary: Option<&str>, ratings: Vec<(&str, &str)>) -> CatalogRecord {
        CatalogRecord {
            title: "Inception".to_string(),
            year: Some("2010".to_string()),
            kind: Some("movie".to_string()),
            external_id: "tt1375666".to_string(),
            primary_rating: primary.map(str::to_string),
            ratings: ratings
                .into_iter()
                .map(|(source, value)| RatingEntry {
                    source: source.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_extracts_both_scores() {
        let summary = RatingRenderer::render(&record(
            Some("8.8"),
            vec![
                ("Internet Movie Database", "8.8/10"),
                ("Rotten Tomatoes", "87%"),
                ("Metacritic", "74/100"),
            ],
        ));

        assert_eq!(summary.primary_score.as_deref(), Some("8.8"));
        assert_eq!(summary.secondary_score.as_deref(), Some("87%"));
    }

    #[test]
    fn test_unavailable_primary_is_skipped() {
        let summary = RatingRenderer::render(&record(Some("N/A"), vec![("Rotten Tomatoes", "91%")]));

        assert!(summary.primary_score.is_none());
        assert_eq!(summary.secondary_score.as_deref(), Some("91%"));
    }

    #[test]
    fn test_missing_secondary_source_is_none() {
        let summary = RatingRenderer::render(&record(
            Some("7.2"),
            vec![("Internet Movie Database", "7.2/10")],
        ));

        assert_eq!(summary.primary_score.as_deref(), Some("7.2"));
        assert!(summary.secondary_score.is_none());
    }

    #[test]
    fn test_bare_record_renders_empty() {
        let summary = RatingRenderer::render(&record(None, vec![]));

        assert!(summary.is_empty());
        assert!(summary.badge_text().is_none());
    }
}
