// src/highlight.rs
//
// Single authority for which annotation, if any, is currently emphasized.
// Both the overlay and the result list read this value and route their
// hover events through it; neither surface holds its own hover flag.

/// Holds the id of the highlighted item, or nothing. At most one item is
/// highlighted at any instant.
#[derive(Debug, Default)]
pub struct HighlightCoordinator {
    current: Option<String>,
}

impl HighlightCoordinator {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.current.as_deref() == Some(id)
    }

    /// Highlight `id`. Returns whether the stored value changed, so the
    /// owner re-renders subscribed views exactly when needed.
    pub fn set(&mut self, id: &str) -> bool {
        if self.is_highlighted(id) {
            false
        } else {
            self.current = Some(id.to_string());
            true
        }
    }

    /// Clear the highlight, but only if `id` is still the highlighted item.
    /// A stale leave event from a previously hovered element must not clear
    /// a highlight set by a later enter: enter wins the tie-break.
    pub fn clear(&mut self, id: &str) -> bool {
        if self.is_highlighted(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Drop any highlight, used when the displayed list is swapped out.
    pub fn reset(&mut self) -> bool {
        self.current.take().is_some()
    }
}
