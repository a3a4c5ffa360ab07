use serde::{Deserialize, Serialize};

/// The kind of title a page subject can be, as the catalog classifies it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Series,
}

impl TitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series => "series",
        }
    }

    /// Derive a kind from a structured page type string.
    /// Page types look like "Movie", "TVSeries" or "TVSeason"; anything
    /// that names neither maps to None.
    pub fn from_page_type(page_type: &str) -> Option<Self> {
        let t = page_type.to_lowercase();
        if t.contains("tv") {
            Some(TitleKind::Series)
        } else if t.contains("movie") {
            Some(TitleKind::Movie)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Best-effort title metadata scraped from the host page.
/// This is raw input: the title may be ambiguous and year/kind are
/// frequently absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectMetadata {
    /// Display title as the page presents it
    pub title: String,

    /// Four-digit release year, when the page exposes one
    pub year: Option<String>,

    /// Movie/series classification, when the page exposes one
    pub kind: Option<TitleKind>,
}

/// One resolution request: the page subject's signal plus the context id
/// that identifies the subject for dedup and staleness checks.
/// Immutable once constructed; discarded after the pipeline terminates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectQuery {
    pub title: String,
    pub year: Option<String>,
    pub kind: Option<TitleKind>,

    /// Numeric identifier of the page subject (digits only)
    pub context_id: String,
}

impl SubjectQuery {
    pub fn new(metadata: SubjectMetadata, context_id: String) -> Self {
        Self {
            title: metadata.title,
            year: metadata.year,
            kind: metadata.kind,
            context_id,
        }
    }
}
