pub mod entity;
pub mod invariants;

pub use entity::{SubjectMetadata, SubjectQuery, TitleKind};
pub use invariants::{validate_context_id, validate_query};
