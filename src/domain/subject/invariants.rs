use super::entity::SubjectQuery;
use crate::domain::{DomainError, DomainResult};

/// Validates all SubjectQuery invariants
pub fn validate_query(query: &SubjectQuery) -> DomainResult<()> {
    validate_title(&query.title)?;
    validate_context_id(&query.context_id)?;
    validate_year(query.year.as_deref())?;
    Ok(())
}

/// Query title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Subject title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Context ids are numeric page identifiers: non-empty, digits only
pub fn validate_context_id(context_id: &str) -> DomainResult<()> {
    if context_id.is_empty() || !context_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvariantViolation(format!(
            "Context id '{}' is not a digits-only identifier",
            context_id
        )));
    }
    Ok(())
}

/// A year, when present, is exactly four digits
fn validate_year(year: Option<&str>) -> DomainResult<()> {
    if let Some(y) = year {
        if y.len() != 4 || !y.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvariantViolation(format!(
                "Year '{}' is not a four-digit year",
                y
            )));
        }
    }
    Ok(())
}
