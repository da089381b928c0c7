//! Style model: colors, the configuration knob set, and per-country style
//! resolution.
//!
//! `StyleConfig` is a plain struct of named fields with documented defaults;
//! the host mutates it through [`crate::web::WorldMapView`]'s setters (each of
//! which triggers a redraw) or directly on [`crate::engine::MapCore`].
//! `resolve` turns a country code plus the current interaction state into the
//! concrete fill/border/shadow to draw, consulting the optional delegate for
//! per-country fill overrides.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use crate::engine::WorldMapDelegate;
use crate::state::InteractionState;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    /// Opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from 8-bit channels and an alpha in `0.0..=1.0`.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Darken each channel by `factor` (0.0 = unchanged, 1.0 = black).
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let scale = (1.0 - factor).clamp(0.0, 1.0);
        let dim = |c: u8| -> u8 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scaled = (f64::from(c) * scale).round() as u8;
            scaled
        };
        Self { r: dim(self.r), g: dim(self.g), b: dim(self.b), a: self.a }
    }

    /// CSS serialization, as consumed by canvas-style backends.
    #[must_use]
    pub fn css(self) -> String {
        if (self.a - 1.0).abs() < f64::EPSILON {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// A 2D offset in surface units (shadow displacement).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// A four-sided inset in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    #[must_use]
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }
}

/// Drop-shadow parameters for the selected country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    pub color: Color,
    pub offset: Offset,
    pub blur: f64,
}

/// The full set of configurable knobs: colors, shadow parameters, and the
/// ratio/padding values feeding the display transform.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Horizontal ratio divisor for the display transform; ≤ 0 means unset
    /// (derived from the other axis and the reference aspect ratio).
    pub horizontal_ratio_divisor: i32,
    /// Vertical ratio divisor; same unset semantics as the horizontal one.
    pub vertical_ratio_divisor: i32,
    /// Symmetric padding between the map and the surface's vertical edges.
    pub map_horizontal_padding: f64,
    /// Base color of the background gradient; `None` disables the gradient.
    pub background_gradient_color: Option<Color>,
    /// Inset applied to the background gradient's fill rectangle.
    pub background_gradient_inset: Insets,
    /// Default country fill color.
    pub country_color: Color,
    /// Country border color.
    pub country_border_color: Color,
    /// Default highlighted-country fill color.
    pub highlighted_color: Color,
    /// Highlighted-country border color.
    pub highlighted_border_color: Color,
    /// Default selected-country fill color.
    pub selected_color: Color,
    /// Selected-country border color.
    pub selected_border_color: Color,
    /// Selected-country shadow color.
    pub selected_shadow_color: Color,
    /// Selected-country shadow offset.
    pub selected_shadow_offset: Offset,
    /// Selected-country shadow blur radius.
    pub selected_shadow_blur: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            horizontal_ratio_divisor: 0,
            vertical_ratio_divisor: 0,
            map_horizontal_padding: 10.0,
            background_gradient_color: Some(Color::rgb(0x9f, 0xc6, 0xe0)),
            background_gradient_inset: Insets::default(),
            country_color: Color::rgb(0xc8, 0xc8, 0xc6),
            country_border_color: Color::rgb(0xff, 0xff, 0xff),
            highlighted_color: Color::rgb(0x63, 0xb1, 0xf2),
            highlighted_border_color: Color::rgb(0xff, 0xff, 0xff),
            selected_color: Color::rgb(0x1e, 0x90, 0xff),
            selected_border_color: Color::rgb(0xff, 0xff, 0xff),
            selected_shadow_color: Color::rgba(0x00, 0x00, 0x00, 0.4),
            selected_shadow_offset: Offset::new(0.0, 2.0),
            selected_shadow_blur: 6.0,
        }
    }
}

/// The concrete style to draw one country with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryStyle {
    pub fill: Color,
    pub border: Color,
    pub shadow: Option<ShadowStyle>,
}

/// Resolve the style for `code` given the current interaction state.
///
/// Selected wins over highlighted, which wins over the base style. For each
/// state the delegate's per-country fill override is consulted first and the
/// configured default used when the delegate is absent or returns `None`.
/// Border colors always come from config; the shadow applies only to the
/// selected country. This never fails.
#[must_use]
pub fn resolve(
    code: &str,
    state: &InteractionState,
    config: &StyleConfig,
    delegate: Option<&dyn WorldMapDelegate>,
) -> CountryStyle {
    if state.is_selected(code) {
        let fill = delegate
            .and_then(|d| d.selected_color_for_country(code))
            .unwrap_or(config.selected_color);
        return CountryStyle {
            fill,
            border: config.selected_border_color,
            shadow: Some(ShadowStyle {
                color: config.selected_shadow_color,
                offset: config.selected_shadow_offset,
                blur: config.selected_shadow_blur,
            }),
        };
    }

    if state.is_highlighted(code) {
        let fill = delegate
            .and_then(|d| d.highlighted_color_for_country(code))
            .unwrap_or(config.highlighted_color);
        return CountryStyle { fill, border: config.highlighted_border_color, shadow: None };
    }

    let fill = delegate.and_then(|d| d.color_for_country(code)).unwrap_or(config.country_color);
    CountryStyle { fill, border: config.country_border_color, shadow: None }
}
