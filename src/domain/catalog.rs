// src/domain/catalog.rs
//
// Catalog Value Objects
//
// Pure, immutable data carried between the catalog transport and the
// resolution pipeline. These are knowledge about the external catalog,
// never mutated once constructed.

use serde::{Deserialize, Serialize};

/// One entry from a catalog search response.
/// Ephemeral: lives only long enough to be scored against a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,

    /// Release year as the catalog prints it; multi-year ranges like
    /// "2001–2004" appear verbatim
    pub year: Option<String>,

    /// Catalog classification ("movie", "series", ...)
    pub kind: Option<String>,

    /// The catalog's identifier for this entry
    pub external_id: String,
}

/// A labeled rating as returned by the catalog, e.g.
/// `{ source: "Rotten Tomatoes", value: "87%" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub source: String,
    pub value: String,
}

/// A full catalog record for one title, mapped from the transport's wire
/// format. Carries the raw rating strings; extraction and formatting are
/// the rating renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub year: Option<String>,
    pub kind: Option<String>,
    pub external_id: String,

    /// The catalog's primary numeric rating, verbatim; "N/A" when the
    /// catalog marks it unavailable
    pub primary_rating: Option<String>,

    /// Secondary labeled ratings, one entry per source
    pub ratings: Vec<RatingEntry>,
}
