// src/page/badge_mount.rs
//
// Badge mount port - how the engine pushes rendered badge text into the
// host page's layout.

/// Mounts and removes the single rating badge element.
/// When no known layout container exists on the page, `show_badge` is a
/// silent no-op, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait BadgeMount: Send + Sync {
    fn show_badge(&self, text: &str);
    fn clear_badges(&self);
}
