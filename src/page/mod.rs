// src/page/mod.rs
//
// Host page ports
//
// CRITICAL RULES:
// - These traits are the ONLY surface between the engine and the page
// - Implementors do I/O only; all decisions live in services
// - A missing mount point or missing metadata is an expected condition,
//   not an error

pub mod badge_mount;
pub mod context_source;
pub mod metadata_source;

pub use badge_mount::BadgeMount;
pub use context_source::ContextIdSource;
pub use metadata_source::{extract_year, strip_site_suffix, SubjectMetadataSource};

#[cfg(test)]
pub use badge_mount::MockBadgeMount;
#[cfg(test)]
pub use context_source::MockContextIdSource;
#[cfg(test)]
pub use metadata_source::MockSubjectMetadataSource;
