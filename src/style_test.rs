#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::engine::WorldMapDelegate;
use crate::state::InteractionState;

// =============================================================
// Helpers
// =============================================================

fn state_with(highlighted: Option<&str>, selected: Option<&str>) -> InteractionState {
    InteractionState {
        highlighted: highlighted.map(str::to_owned),
        selected: selected.map(str::to_owned),
    }
}

/// Delegate that overrides every fill with a fixed color per state.
struct OverridingDelegate;

impl WorldMapDelegate for OverridingDelegate {
    fn color_for_country(&self, _code: &str) -> Option<Color> {
        Some(Color::rgb(1, 2, 3))
    }

    fn selected_color_for_country(&self, _code: &str) -> Option<Color> {
        Some(Color::rgb(4, 5, 6))
    }

    fn highlighted_color_for_country(&self, _code: &str) -> Option<Color> {
        Some(Color::rgb(7, 8, 9))
    }
}

/// Delegate that implements nothing — every method keeps its default.
struct SilentDelegate;

impl WorldMapDelegate for SilentDelegate {}

// =============================================================
// Color
// =============================================================

#[test]
fn css_opaque_is_hex() {
    assert_eq!(Color::rgb(0x1e, 0x90, 0xff).css(), "#1e90ff");
}

#[test]
fn css_translucent_is_rgba() {
    assert_eq!(Color::rgba(0, 0, 0, 0.4).css(), "rgba(0, 0, 0, 0.4)");
}

#[test]
fn with_alpha_keeps_channels() {
    let c = Color::rgb(10, 20, 30).with_alpha(0.5);
    assert_eq!((c.r, c.g, c.b), (10, 20, 30));
    assert_eq!(c.a, 0.5);
}

#[test]
fn darken_scales_channels() {
    let c = Color::rgb(100, 200, 40).darken(0.5);
    assert_eq!((c.r, c.g, c.b), (50, 100, 20));
}

#[test]
fn darken_zero_is_identity() {
    let c = Color::rgb(100, 200, 40);
    assert_eq!(c.darken(0.0), c);
}

#[test]
fn darken_full_is_black() {
    let c = Color::rgb(100, 200, 40).darken(1.0);
    assert_eq!((c.r, c.g, c.b), (0, 0, 0));
}

#[test]
fn darken_preserves_alpha() {
    let c = Color::rgba(100, 200, 40, 0.7).darken(0.5);
    assert_eq!(c.a, 0.7);
}

// =============================================================
// resolve: state cascade
// =============================================================

#[test]
fn base_state_uses_country_color() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(None, None), &config, None);
    assert_eq!(style.fill, config.country_color);
    assert_eq!(style.border, config.country_border_color);
    assert!(style.shadow.is_none());
}

#[test]
fn highlighted_state_uses_highlight_colors() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(Some("AA"), None), &config, None);
    assert_eq!(style.fill, config.highlighted_color);
    assert_eq!(style.border, config.highlighted_border_color);
    assert!(style.shadow.is_none());
}

#[test]
fn selected_state_uses_selection_colors_and_shadow() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(None, Some("AA")), &config, None);
    assert_eq!(style.fill, config.selected_color);
    assert_eq!(style.border, config.selected_border_color);
    let Some(shadow) = style.shadow else {
        panic!("selected style must carry a shadow")
    };
    assert_eq!(shadow.color, config.selected_shadow_color);
    assert_eq!(shadow.offset, config.selected_shadow_offset);
    assert_eq!(shadow.blur, config.selected_shadow_blur);
}

#[test]
fn selected_wins_over_highlighted() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(Some("AA"), Some("AA")), &config, None);
    assert_eq!(style.fill, config.selected_color);
}

#[test]
fn other_countries_keep_base_style() {
    let config = StyleConfig::default();
    let style = resolve("BB", &state_with(Some("AA"), Some("AA")), &config, None);
    assert_eq!(style.fill, config.country_color);
    assert!(style.shadow.is_none());
}

// =============================================================
// resolve: delegate overrides
// =============================================================

#[test]
fn delegate_overrides_base_fill() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(None, None), &config, Some(&OverridingDelegate));
    assert_eq!(style.fill, Color::rgb(1, 2, 3));
}

#[test]
fn delegate_overrides_selected_fill() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(None, Some("AA")), &config, Some(&OverridingDelegate));
    assert_eq!(style.fill, Color::rgb(4, 5, 6));
    assert!(style.shadow.is_some());
}

#[test]
fn delegate_overrides_highlighted_fill() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(Some("AA"), None), &config, Some(&OverridingDelegate));
    assert_eq!(style.fill, Color::rgb(7, 8, 9));
}

#[test]
fn delegate_never_overrides_borders() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(None, Some("AA")), &config, Some(&OverridingDelegate));
    assert_eq!(style.border, config.selected_border_color);
}

#[test]
fn declining_delegate_falls_back_to_config() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(None, Some("AA")), &config, Some(&SilentDelegate));
    assert_eq!(style.fill, config.selected_color);
}

#[test]
fn absent_delegate_falls_back_to_config() {
    let config = StyleConfig::default();
    let style = resolve("AA", &state_with(Some("AA"), None), &config, None);
    assert_eq!(style.fill, config.highlighted_color);
}
