//! Widget core: interaction handling, delegate notification, and redraw
//! signalling.
//!
//! [`MapCore`] owns the geometry store, style configuration, and interaction
//! state, and contains every rule that doesn't depend on a real drawing
//! surface — so the whole widget is testable without a browser. The
//! browser-owning wrapper lives in [`crate::web`].
//!
//! Every mutating handler returns `true` when the change requires a redraw;
//! the wrapper (or any other host) decides when to actually call
//! [`MapCore::render`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::rc::Weak;

use tracing::debug;

use crate::hit;
use crate::render;
use crate::state::InteractionState;
use crate::store::GeometryStore;
use crate::style::{Color, StyleConfig};
use crate::surface::Surface;
use crate::transform::{MapTransform, Point};

/// Callback interface for hosts interested in interaction changes and
/// per-country color overrides.
///
/// Every method has a default implementation, so delegates implement only
/// what they need. The widget holds its delegate as a [`Weak`] reference and
/// silently skips callbacks once the delegate is dropped — a missing
/// delegate, like a `None` color override, is never an error.
pub trait WorldMapDelegate {
    /// A pointer movement highlighted `_code`. Not called when the pointer
    /// leaves all countries (the highlight is cleared without a callback),
    /// and never called for programmatic highlight changes.
    fn highlight_changed(&self, _code: &str) {}

    /// A tap selected `_code`. Not called when a tap re-hits the current
    /// selection, and never called for programmatic selection changes.
    fn selection_changed(&self, _code: &str) {}

    /// Fill color override for `_code` in its base state.
    fn color_for_country(&self, _code: &str) -> Option<Color> {
        None
    }

    /// Fill color override for `_code` while selected.
    fn selected_color_for_country(&self, _code: &str) -> Option<Color> {
        None
    }

    /// Fill color override for `_code` while highlighted.
    fn highlighted_color_for_country(&self, _code: &str) -> Option<Color> {
        None
    }
}

/// Core widget state and interaction rules.
///
/// The geometry store is immutable after construction; `config` is a plain
/// field the host may mutate at any time (the display transform is derived
/// from it on demand, so mutations take effect on the next hit test or
/// render). Interaction state is private — all transitions go through the
/// handlers below, which enforce the validation and notification rules.
pub struct MapCore {
    /// Style and layout configuration, host-mutable at any time.
    pub config: StyleConfig,
    store: GeometryStore,
    state: InteractionState,
    viewport_w: f64,
    viewport_h: f64,
    delegate: Option<Weak<dyn WorldMapDelegate>>,
}

impl MapCore {
    /// Create a core around a loaded geometry store with default styling and
    /// a zero-sized viewport.
    #[must_use]
    pub fn new(store: GeometryStore) -> Self {
        Self {
            config: StyleConfig::default(),
            store,
            state: InteractionState::default(),
            viewport_w: 0.0,
            viewport_h: 0.0,
            delegate: None,
        }
    }

    // --- Collaborators ---

    /// Register the delegate. The reference is non-owning; dropping the
    /// delegate elsewhere simply stops the callbacks.
    pub fn set_delegate(&mut self, delegate: Weak<dyn WorldMapDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Unregister any delegate.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    // --- Viewport ---

    /// Update the drawing-surface size. Returns `true` when it changed.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> bool {
        if (self.viewport_w, self.viewport_h) == (width, height) {
            return false;
        }
        self.viewport_w = width;
        self.viewport_h = height;
        true
    }

    /// The current display transform — a pure function of the viewport,
    /// the ratio/padding configuration, and the reference space.
    #[must_use]
    pub fn transform(&self) -> MapTransform {
        MapTransform::compute(
            self.viewport_w,
            self.viewport_h,
            &self.config,
            self.store.reference_width(),
            self.store.reference_height(),
        )
    }

    // --- Pointer events ---

    /// Pointer moved to `pt` (surface coordinates).
    ///
    /// Resolves the point to a country and updates the highlight when it
    /// changed. Entering a country notifies the delegate; leaving all
    /// countries clears the highlight silently.
    pub fn on_pointer_move(&mut self, pt: Point) -> bool {
        let transform = self.transform();
        let resolved = hit::hit_test(pt, &self.store, &transform).map(str::to_owned);
        if resolved == self.state.highlighted {
            return false;
        }

        self.state.highlighted = resolved;
        if let Some(code) = self.state.highlighted.clone() {
            debug!(%code, "country highlighted");
            self.notify(|d| d.highlight_changed(&code));
        }
        true
    }

    /// Pointer released (tap) at `pt` (surface coordinates).
    ///
    /// A tap on a country replaces the selection and notifies the delegate.
    /// A tap on the already-selected country is a complete no-op, and a tap
    /// on empty space leaves the selection untouched.
    pub fn on_pointer_up(&mut self, pt: Point) -> bool {
        let transform = self.transform();
        let Some(resolved) = hit::hit_test(pt, &self.store, &transform) else {
            return false;
        };
        if self.state.is_selected(resolved) {
            return false;
        }

        let code = resolved.to_owned();
        self.state.selected = Some(code.clone());
        debug!(%code, "country selected");
        self.notify(|d| d.selection_changed(&code));
        true
    }

    // --- Programmatic state ---

    /// Set the highlighted country directly, bypassing hit testing.
    ///
    /// A code absent from the geometry store is a silent no-op. Programmatic
    /// changes never notify the delegate.
    pub fn set_highlighted_country(&mut self, code: Option<&str>) -> bool {
        if let Some(code) = code {
            if !self.store.contains(code) {
                return false;
            }
        }
        let next = code.map(str::to_owned);
        if next == self.state.highlighted {
            return false;
        }
        self.state.highlighted = next;
        true
    }

    /// Set the selected country directly, bypassing hit testing.
    ///
    /// Same policy as [`Self::set_highlighted_country`]: unknown codes are
    /// ignored and the delegate is not notified.
    pub fn set_selected_country(&mut self, code: Option<&str>) -> bool {
        if let Some(code) = code {
            if !self.store.contains(code) {
                return false;
            }
        }
        let next = code.map(str::to_owned);
        if next == self.state.selected {
            return false;
        }
        self.state.selected = next;
        true
    }

    // --- Queries ---

    /// The currently highlighted country code, if any.
    #[must_use]
    pub fn highlighted_country(&self) -> Option<&str> {
        self.state.highlighted.as_deref()
    }

    /// The currently selected country code, if any.
    #[must_use]
    pub fn selected_country(&self) -> Option<&str> {
        self.state.selected.as_deref()
    }

    /// The loaded geometry store.
    #[must_use]
    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    /// The current interaction state.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    // --- Render ---

    /// Draw the current scene onto `surface`.
    ///
    /// # Errors
    ///
    /// Propagates the surface's error (see [`render::draw`]).
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let delegate = self.delegate.as_ref().and_then(Weak::upgrade);
        render::draw(
            surface,
            self.viewport_w,
            self.viewport_h,
            &self.store,
            &self.transform(),
            &self.state,
            &self.config,
            delegate.as_deref(),
        )
    }

    fn notify(&self, callback: impl FnOnce(&dyn WorldMapDelegate)) {
        if let Some(weak) = &self.delegate {
            if let Some(delegate) = weak.upgrade() {
                callback(&*delegate);
            }
        }
    }
}
