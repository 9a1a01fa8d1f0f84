//! Deterministic chart color assignment.
//!
//! # Responsibility
//! - Produce one evenly spaced color per record, by position.
//! - Derive border tones from fill colors.
//!
//! # Invariants
//! - `palette(n)` depends on `n` only; repeated renders never shuffle colors.
//! - The hue circle is split into at least `MIN_HUE_SLOTS` slots, so small
//!   sets never get near-duplicate hues.
//! - Shaded lightness is always clamped to `[0, 100]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Minimum number of hue slots the color circle is divided into.
pub const MIN_HUE_SLOTS: usize = 6;
/// Fill saturation, in percent.
pub const PALETTE_SATURATION: u8 = 85;
/// Fill lightness, in percent.
pub const PALETTE_LIGHTNESS: u8 = 55;
/// Lightness delta used for bar borders.
pub const BORDER_SHADE_DELTA: i32 = -16;

static HSL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^hsl\(([0-9]+),\s*([0-9]+)%\s*,\s*([0-9]+)%\)$").expect("valid hsl regex")
});

// Unanchored: `shade` picks the first hsl(...) group anywhere in the input.
static HSL_SEARCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"hsl\(([0-9]+),\s*([0-9]+)%\s*,\s*([0-9]+)%\)").expect("valid hsl regex")
});

/// Hue/saturation/lightness color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Degrees. May equal 360 for very large palettes, which renders as 0.
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Returns this color with `delta` added to lightness, clamped to `[0, 100]`.
    pub fn shade(self, delta: i32) -> Self {
        let lightness = (i32::from(self.lightness) + delta).clamp(0, 100);
        Self {
            lightness: lightness as u8,
            ..self
        }
    }
}

impl Display for Hsl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Error for strings that are not in `hsl(H, S%, L%)` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HslParseError(pub String);

impl Display for HslParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "not an hsl color: `{}`", self.0)
    }
}

impl std::error::Error for HslParseError {}

impl FromStr for Hsl {
    type Err = HslParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || HslParseError(value.to_string());
        let captures = HSL_RE.captures(value.trim()).ok_or_else(invalid)?;
        let hue = captures[1].parse::<u16>().map_err(|_| invalid())?;
        let saturation = captures[2].parse::<u8>().map_err(|_| invalid())?;
        let lightness = captures[3].parse::<u8>().map_err(|_| invalid())?;
        Ok(Self::new(hue, saturation, lightness))
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns `n` evenly spaced colors for records `0..n`.
pub fn palette(n: usize) -> Vec<Hsl> {
    let slots = n.max(MIN_HUE_SLOTS) as f64;
    (0..n)
        .map(|index| {
            let hue = ((index as f64 * 360.0 / slots) % 360.0).round() as u16;
            Hsl::new(hue, PALETTE_SATURATION, PALETTE_LIGHTNESS)
        })
        .collect()
}

/// Shades a CSS `hsl(...)` string by `delta` lightness.
///
/// The first `hsl(H, S%, L%)` group found in `color` is used and re-emitted
/// on its own. Components are not range-checked: any lightness, however
/// large, is clamped to `[0, 100]` after adding `delta`. Input without such
/// a group is returned unchanged.
pub fn shade(color: &str, delta: i32) -> String {
    let Some(captures) = HSL_SEARCH_RE.captures(color) else {
        return color.to_string();
    };
    let hue = parse_component(&captures[1]);
    let saturation = parse_component(&captures[2]);
    let lightness = i128::from(parse_component(&captures[3])) + i128::from(delta);
    format!("hsl({hue}, {saturation}%, {}%)", lightness.clamp(0, 100))
}

// Digit runs too long for u64 saturate; lightness clamps to 100 either way.
fn parse_component(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{palette, shade, Hsl, BORDER_SHADE_DELTA};

    #[test]
    fn palette_is_deterministic_and_sized() {
        assert!(palette(0).is_empty());
        assert_eq!(palette(4), palette(4));
        assert_eq!(palette(9).len(), 9);
    }

    #[test]
    fn small_palettes_use_sixty_degree_steps() {
        for n in 1..=6 {
            let hues: Vec<u16> = palette(n).iter().map(|color| color.hue).collect();
            let expected: Vec<u16> = (0..n as u16).map(|index| index * 60).collect();
            assert_eq!(hues, expected, "n = {n}");
        }
    }

    #[test]
    fn larger_palettes_spread_over_the_circle() {
        let hues: Vec<u16> = palette(8).iter().map(|color| color.hue).collect();
        assert_eq!(hues, vec![0, 45, 90, 135, 180, 225, 270, 315]);

        let hues: Vec<u16> = palette(7).iter().map(|color| color.hue).collect();
        assert_eq!(hues, vec![0, 51, 103, 154, 206, 257, 309]);
    }

    #[test]
    fn palette_colors_render_as_css() {
        assert_eq!(palette(2)[1].to_string(), "hsl(60, 85%, 55%)");
    }

    #[test]
    fn shade_clamps_lightness() {
        assert_eq!(Hsl::new(10, 85, 5).shade(BORDER_SHADE_DELTA).lightness, 0);
        assert_eq!(Hsl::new(10, 85, 95).shade(16).lightness, 100);
        assert_eq!(Hsl::new(10, 85, 55).shade(BORDER_SHADE_DELTA).lightness, 39);
    }

    #[test]
    fn shade_string_keeps_hue_and_saturation() {
        assert_eq!(shade("hsl(120, 85%, 55%)", -16), "hsl(120, 85%, 39%)");
        assert_eq!(shade("hsl(120,85% , 10%)", -16), "hsl(120, 85%, 0%)");
    }

    #[test]
    fn shade_returns_malformed_input_unchanged() {
        assert_eq!(shade("#ff0000", -16), "#ff0000");
        assert_eq!(shade("hsl(red)", -16), "hsl(red)");
        assert_eq!(shade("", 16), "");
    }

    #[test]
    fn shade_clamps_lightness_beyond_one_hundred() {
        assert_eq!(shade("hsl(1, 2%, 300%)", -16), "hsl(1, 2%, 100%)");
        assert_eq!(shade("hsl(1, 2%, 999%)", -16), "hsl(1, 2%, 100%)");
        assert_eq!(
            shade("hsl(1, 2%, 99999999999999999999999%)", -16),
            "hsl(1, 2%, 100%)"
        );
        assert_eq!(shade("hsl(400, 250%, 50%)", 0), "hsl(400, 250%, 50%)");
    }

    #[test]
    fn shade_finds_hsl_group_inside_longer_text() {
        assert_eq!(
            shade("fill: hsl(120, 85%, 55%);", -16),
            "hsl(120, 85%, 39%)"
        );
        assert_eq!(shade("hsl(007, 85%, 55%)", -16), "hsl(7, 85%, 39%)");
    }
}
