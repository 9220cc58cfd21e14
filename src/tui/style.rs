//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Output power line color.
pub const OUTPUT_COLOR: Color = Color::Cyan;
/// Input (wind resource) power line color.
pub const INPUT_COLOR: Color = Color::Yellow;
/// Rated power reference line color.
pub const RATED_COLOR: Color = Color::DarkGray;
/// Capacity factor gauge color when high (>= 40%).
pub const CF_HIGH: Color = Color::Green;
/// Capacity factor gauge color when medium (>= 20%).
pub const CF_MID: Color = Color::Yellow;
/// Capacity factor gauge color when low (< 20%).
pub const CF_LOW: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Cut-out indicator color.
pub const CUT_OUT: Color = Color::Magenta;

/// Returns a color based on the capacity factor.
pub fn cf_color(cf: f64) -> Color {
    if cf >= 0.4 {
        CF_HIGH
    } else if cf >= 0.2 {
        CF_MID
    } else {
        CF_LOW
    }
}

/// Computes Y-axis bounds over every series with 10% padding.
pub fn auto_bounds_y(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
