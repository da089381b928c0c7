//! Browser binding: the canvas-owning widget wrapper and the
//! [`Surface`] implementation for `CanvasRenderingContext2d`.
//!
//! This module is the only place that touches `web_sys`. Everything above it
//! ([`MapCore`] and below) is pure logic, testable without a browser.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule, HtmlCanvasElement};

use crate::engine::{MapCore, WorldMapDelegate};
use crate::store::GeometryStore;
use crate::style::{Color, Insets, Offset};
use crate::surface::{GradientStop, Surface};
use crate::transform::{Point, Rect};

/// The full widget: wraps [`MapCore`] and owns the browser canvas element.
///
/// Pointer events forwarded by the host trigger a redraw only when the core
/// reports a state change; every configuration setter redraws immediately,
/// mirroring the property semantics of a design-time-configurable view.
pub struct WorldMapView {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    pub core: MapCore,
}

impl WorldMapView {
    /// Create a widget bound to the given canvas element, with the viewport
    /// taken from the canvas's current size.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the element cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement, store: GeometryStore) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        let mut core = MapCore::new(store);
        core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, context, core })
    }

    /// Register the delegate (held non-owning) and redraw.
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn set_delegate(&mut self, delegate: std::rc::Weak<dyn WorldMapDelegate>) -> Result<(), JsValue> {
        self.core.set_delegate(delegate);
        self.render()
    }

    /// Unregister any delegate and redraw with configured defaults.
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn clear_delegate(&mut self) -> Result<(), JsValue> {
        self.core.clear_delegate();
        self.render()
    }

    // --- Layout ---

    /// Re-read the canvas size into the viewport; redraws when it changed.
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let changed = self
            .core
            .set_viewport(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        if changed { self.render() } else { Ok(()) }
    }

    // --- Pointer events ---

    /// Forward a pointer-move (hover) event in canvas coordinates.
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        if self.core.on_pointer_move(Point::new(x, y)) { self.render() } else { Ok(()) }
    }

    /// Forward a pointer-up (tap) event in canvas coordinates.
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        if self.core.on_pointer_up(Point::new(x, y)) { self.render() } else { Ok(()) }
    }

    // --- Interaction state ---

    /// Set the highlighted country programmatically (unknown codes are
    /// ignored; the delegate is not notified).
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn set_highlighted_country(&mut self, code: Option<&str>) -> Result<(), JsValue> {
        if self.core.set_highlighted_country(code) { self.render() } else { Ok(()) }
    }

    /// Set the selected country programmatically (unknown codes are ignored;
    /// the delegate is not notified).
    ///
    /// # Errors
    ///
    /// Propagates canvas drawing errors.
    pub fn set_selected_country(&mut self, code: Option<&str>) -> Result<(), JsValue> {
        if self.core.set_selected_country(code) { self.render() } else { Ok(()) }
    }

    #[must_use]
    pub fn highlighted_country(&self) -> Option<&str> {
        self.core.highlighted_country()
    }

    #[must_use]
    pub fn selected_country(&self) -> Option<&str> {
        self.core.selected_country()
    }

    // --- Configuration ---
    // One setter per knob; each redraws immediately.

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_horizontal_ratio_divisor(&mut self, divisor: i32) -> Result<(), JsValue> {
        self.core.config.horizontal_ratio_divisor = divisor;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_vertical_ratio_divisor(&mut self, divisor: i32) -> Result<(), JsValue> {
        self.core.config.vertical_ratio_divisor = divisor;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_map_horizontal_padding(&mut self, padding: f64) -> Result<(), JsValue> {
        self.core.config.map_horizontal_padding = padding;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_background_gradient_color(&mut self, color: Option<Color>) -> Result<(), JsValue> {
        self.core.config.background_gradient_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_background_gradient_inset(&mut self, inset: Insets) -> Result<(), JsValue> {
        self.core.config.background_gradient_inset = inset;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_country_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.country_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_country_border_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.country_border_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_highlighted_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.highlighted_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_highlighted_border_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.highlighted_border_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_selected_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.selected_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_selected_border_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.selected_border_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_selected_shadow_color(&mut self, color: Color) -> Result<(), JsValue> {
        self.core.config.selected_shadow_color = color;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_selected_shadow_offset(&mut self, offset: Offset) -> Result<(), JsValue> {
        self.core.config.selected_shadow_offset = offset;
        self.render()
    }

    /// # Errors
    /// Propagates canvas drawing errors.
    pub fn set_selected_shadow_blur(&mut self, blur: f64) -> Result<(), JsValue> {
        self.core.config.selected_shadow_blur = blur;
        self.render()
    }

    // --- Render ---

    /// Draw the current scene to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any canvas call fails (e.g. invalid context state).
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.core.render(&mut self.context)
    }
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, pt: Point) {
        CanvasRenderingContext2d::move_to(self, pt.x, pt.y);
    }

    fn line_to(&mut self, pt: Point) {
        CanvasRenderingContext2d::line_to(self, pt.x, pt.y);
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.set_fill_style_str(&color.css());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.set_stroke_style_str(&color.css());
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn fill_path(&mut self) {
        // Even-odd so the filled area always matches what the hit tester
        // considers inside.
        self.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
    }

    fn stroke_path(&mut self) {
        self.stroke();
    }

    fn set_shadow(&mut self, offset_x: f64, offset_y: f64, blur: f64, color: Color) {
        self.set_shadow_offset_x(offset_x);
        self.set_shadow_offset_y(offset_y);
        self.set_shadow_blur(blur);
        self.set_shadow_color(&color.css());
    }

    fn clear_shadow(&mut self) {
        self.set_shadow_offset_x(0.0);
        self.set_shadow_offset_y(0.0);
        self.set_shadow_blur(0.0);
        self.set_shadow_color("rgba(0, 0, 0, 0)");
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fill_linear_gradient(
        &mut self,
        from: Point,
        to: Point,
        stops: &[GradientStop],
        rect: Rect,
    ) -> Result<(), JsValue> {
        let gradient = self.create_linear_gradient(from.x, from.y, to.x, to.y);
        for (position, color) in stops {
            gradient.add_color_stop(*position as f32, &color.css())?;
        }
        self.set_fill_style_canvas_gradient(&gradient);
        self.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }
}
