//! The abstract 2D drawing surface the renderer targets.
//!
//! The host framework's real canvas (browser `CanvasRenderingContext2d`,
//! in [`crate::web`]) implements this trait; tests implement it with a
//! recording surface. The vocabulary is exactly what the scene needs: path
//! building, fill/stroke state, shadow parameters, and one gradient fill.

use crate::style::Color;
use crate::transform::{Point, Rect};

/// A color stop for [`Surface::fill_linear_gradient`]: position in
/// `0.0..=1.0` along the gradient axis, plus the color at that position.
pub type GradientStop = (f64, Color);

/// An abstract 2D canvas capable of filling and stroking paths, applying
/// shadows, and compositing linear gradients.
///
/// Path building is stateful in the usual immediate-mode style: `begin_path`
/// starts a fresh path, `move_to`/`line_to`/`cubic_to`/`close_path` extend
/// it, and `fill_path`/`stroke_path` consume the current fill/stroke state.
pub trait Surface {
    /// Backend error for the fallible operations.
    type Error;

    /// Clear the given viewport rectangle to transparent.
    fn clear(&mut self, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, pt: Point);
    fn line_to(&mut self, pt: Point);
    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point);
    fn close_path(&mut self);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);

    /// Fill the current path with the current fill color and shadow state.
    fn fill_path(&mut self);
    /// Stroke the current path with the current stroke color and line width.
    fn stroke_path(&mut self);

    /// Apply a drop shadow to subsequent fills and strokes.
    fn set_shadow(&mut self, offset_x: f64, offset_y: f64, blur: f64, color: Color);
    /// Remove any active shadow.
    fn clear_shadow(&mut self);

    /// Fill `rect` with a linear gradient running from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the gradient cannot be constructed.
    fn fill_linear_gradient(
        &mut self,
        from: Point,
        to: Point,
        stops: &[GradientStop],
        rect: Rect,
    ) -> Result<(), Self::Error>;
}
