// src/page/metadata_source.rs
//
// Subject metadata port - how the engine reads the host page's
// best-effort title signal.
//
// CRITICAL RULES:
// - Implementors are DUMB readers of page state
// - NO matching logic, NO network calls
// - Structured page data first, page-title fallback second

use regex::Regex;

use crate::domain::SubjectMetadata;

/// Reads the current subject's title/year/kind from the host page.
/// Returns None when the page exposes no usable title.
#[cfg_attr(test, mockall::automock)]
pub trait SubjectMetadataSource: Send + Sync {
    fn subject_metadata(&self) -> Option<SubjectMetadata>;
}

/// Strip a trailing " - {site name}" suffix from a page title,
/// case-insensitively. Page-level titles routinely carry the site's own
/// name; catalog queries must not.
pub fn strip_site_suffix(raw: &str, site_name: &str) -> String {
    let pattern = format!(r"(?i)\s*-\s*{}\s*$", regex::escape(site_name));
    match Regex::new(&pattern) {
        Ok(re) => re.replace(raw, "").trim().to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// Pull the first plausible release year (1900–2099) out of a date-ish
/// string such as "2010-07-16T00:00:00Z".
pub fn extract_year(text: &str) -> Option<String> {
    let re = Regex::new(r"\b(19|20)\d{2}\b").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}
