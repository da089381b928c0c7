//! Shared numeric constants for the worldmap crate.

// ── Geometry ────────────────────────────────────────────────────

/// Number of line segments a cubic curve is sampled into for the cached
/// hit-test ring. Country outlines are coarse enough that 16 keeps the
/// ring within a fraction of a reference-space unit of the true curve.
pub const CURVE_FLATTEN_STEPS: usize = 16;

// ── Rendering ───────────────────────────────────────────────────

/// Line width for country borders, in surface units.
pub const BORDER_WIDTH: f64 = 0.75;

/// Darkening factor applied to the background gradient's bottom stop.
pub const GRADIENT_DARKEN: f64 = 0.35;
