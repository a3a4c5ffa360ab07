// src/page/context_source.rs
//
// Context id port - how the engine identifies the subject currently in
// focus on the host page.

/// Reads the numeric subject identifier from the page's current address.
/// Returns None when no subject is open. Implementors should already
/// validate the id as digits-only; the session controller re-checks the
/// invariant and treats anything else as absent.
#[cfg_attr(test, mockall::automock)]
pub trait ContextIdSource: Send + Sync {
    fn context_id(&self) -> Option<String>;
}
