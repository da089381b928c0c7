//! Interaction state: the currently highlighted and selected countries.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::store::CountryCode;

/// The widget's interaction state, visible to the renderer.
///
/// Highlight (transient, pointer-hover-driven) and selection (persistent,
/// tap-driven) are independent axes: each holds at most one country code,
/// and either may be absent. All transitions go through
/// [`crate::engine::MapCore`], which owns the rules for notification and
/// redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// The country currently under the pointer, if any.
    pub highlighted: Option<CountryCode>,
    /// The country last tapped, if any.
    pub selected: Option<CountryCode>,
}

impl InteractionState {
    /// Whether `code` is the currently highlighted country.
    #[must_use]
    pub fn is_highlighted(&self, code: &str) -> bool {
        self.highlighted.as_deref() == Some(code)
    }

    /// Whether `code` is the currently selected country.
    #[must_use]
    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.as_deref() == Some(code)
    }
}
