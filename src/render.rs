//! Rendering: composes the full map scene onto an abstract surface.
//!
//! This module receives read-only views of the geometry store, transform,
//! interaction state, and style configuration and produces draw calls — it
//! never mutates widget state. Rendering is a pure function of its inputs:
//! two consecutive calls with unchanged inputs emit the same operation
//! stream.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{BORDER_WIDTH, GRADIENT_DARKEN};
use crate::engine::WorldMapDelegate;
use crate::state::InteractionState;
use crate::store::{CountryGeometry, GeometryStore, PathSeg};
use crate::style::{self, CountryStyle, StyleConfig};
use crate::surface::Surface;
use crate::transform::{MapTransform, Point, Rect};

/// Draw the full scene, back to front.
///
/// Layer order: background gradient (inset per config), every country that
/// is neither highlighted nor selected, the highlighted country, then the
/// selected country last — with its drop shadow — so it visually sits on
/// top of its neighbours' borders.
///
/// # Errors
///
/// Propagates the surface's error if the background gradient cannot be
/// composited.
pub fn draw<S: Surface>(
    surface: &mut S,
    viewport_w: f64,
    viewport_h: f64,
    store: &GeometryStore,
    transform: &MapTransform,
    state: &InteractionState,
    config: &StyleConfig,
    delegate: Option<&dyn WorldMapDelegate>,
) -> Result<(), S::Error> {
    // Layer 1: background.
    surface.clear(viewport_w, viewport_h);
    if let Some(color) = config.background_gradient_color {
        let inset = config.background_gradient_inset;
        let rect = Rect::new(
            inset.left,
            inset.top,
            (viewport_w - inset.left - inset.right).max(0.0),
            (viewport_h - inset.top - inset.bottom).max(0.0),
        );
        surface.fill_linear_gradient(
            Point::new(rect.x, rect.y),
            Point::new(rect.x, rect.y + rect.height),
            &[(0.0, color), (1.0, color.darken(GRADIENT_DARKEN))],
            rect,
        )?;
    }

    // Layer 2: base countries.
    for (code, geometry) in store.iter() {
        if state.is_highlighted(code) || state.is_selected(code) {
            continue;
        }
        draw_country(surface, geometry, transform, style::resolve(code, state, config, delegate));
    }

    // Layer 3: the highlighted country, unless it is also selected.
    if let Some(code) = state.highlighted.as_deref() {
        if !state.is_selected(code) {
            if let Some(geometry) = store.lookup(code) {
                draw_country(surface, geometry, transform, style::resolve(code, state, config, delegate));
            }
        }
    }

    // Layer 4: the selected country, drawn last with its shadow.
    if let Some(code) = state.selected.as_deref() {
        if let Some(geometry) = store.lookup(code) {
            draw_country(surface, geometry, transform, style::resolve(code, state, config, delegate));
        }
    }

    Ok(())
}

/// Fill and stroke one country's subpaths.
///
/// The shadow (selection only) applies to the fill; it is cleared before the
/// border stroke so the stroke stays crisp.
fn draw_country<S: Surface>(
    surface: &mut S,
    geometry: &CountryGeometry,
    transform: &MapTransform,
    style: CountryStyle,
) {
    surface.begin_path();
    for subpath in geometry.subpaths() {
        trace_subpath(surface, subpath.start, subpath.segs.as_slice(), transform);
    }

    if let Some(shadow) = style.shadow {
        surface.set_shadow(shadow.offset.dx, shadow.offset.dy, shadow.blur, shadow.color);
    }
    surface.set_fill_color(style.fill);
    surface.fill_path();
    surface.clear_shadow();

    surface.set_stroke_color(style.border);
    surface.set_line_width(BORDER_WIDTH);
    surface.stroke_path();
}

/// Emit one closed subpath in surface coordinates.
///
/// Authored cubics stay cubics here — the flattened rings exist only for
/// hit-testing.
fn trace_subpath<S: Surface>(surface: &mut S, start: Point, segs: &[PathSeg], transform: &MapTransform) {
    surface.move_to(transform.to_surface(start));
    for seg in segs {
        match *seg {
            PathSeg::Line { to } => surface.line_to(transform.to_surface(to)),
            PathSeg::Cubic { c1, c2, to } => surface.cubic_to(
                transform.to_surface(c1),
                transform.to_surface(c2),
                transform.to_surface(to),
            ),
        }
    }
    surface.close_path();
}
