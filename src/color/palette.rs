//! Palette and interpolation for relative-performance cell backgrounds
//!
//! Cell shades fade from white toward a base hue: a factor of 1 gives the
//! full base color, a factor of 0 gives white. Any nonzero factor below
//! 0.1 is raised to exactly 0.1 so a shaded cell never becomes
//! indistinguishable from an unshaded one.

/// An RGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color function form, e.g. `rgb(240,40,150)`.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
/// Neutral gray for cells with mixed numeric/text content.
pub const GRAY: Rgb = Rgb::new(200, 200, 200);
/// Base hue for bound columns and for the zero-band guard.
pub const DARK_GRAY: Rgb = Rgb::new(160, 160, 160);
/// Base hue for values worse than the comparison band.
pub const RED: Rgb = Rgb::new(240, 40, 150);
/// Base hue for values better than the comparison band.
pub const GREEN: Rgb = Rgb::new(130, 200, 30);

/// Minimum displayed intensity for a nonzero factor.
const MIN_VISIBLE_FACTOR: f64 = 0.1;

/// Background shade for a cell: white faded toward `base` by `factor`.
pub fn background_color(base: Rgb, factor: f64) -> Rgb {
    let factor = if factor != 0.0 && factor < MIN_VISIBLE_FACTOR {
        MIN_VISIBLE_FACTOR
    } else {
        factor
    };
    interpolate_color(WHITE, base, factor)
}

/// Per-channel linear interpolation from `from` toward `to`.
///
/// Factors at or above 1 return `to` unchanged; channels are floored to
/// integers.
pub fn interpolate_color(from: Rgb, to: Rgb, factor: f64) -> Rgb {
    if factor >= 1.0 {
        return to;
    }
    Rgb::new(
        interpolate_channel(from.r, to.r, factor),
        interpolate_channel(from.g, to.g, factor),
        interpolate_channel(from.b, to.b, factor),
    )
}

fn interpolate_channel(start: u8, end: u8, factor: f64) -> u8 {
    let value = start as f64 + (end as f64 - start as f64) * factor;
    value.floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_format() {
        assert_eq!(RED.css(), "rgb(240,40,150)");
        assert_eq!(WHITE.css(), "rgb(255,255,255)");
    }

    #[test]
    fn test_full_factor_returns_base() {
        assert_eq!(interpolate_color(WHITE, GREEN, 1.0), GREEN);
        // Saturates beyond 1 rather than overshooting
        assert_eq!(interpolate_color(WHITE, GREEN, 1.5), GREEN);
        assert_eq!(background_color(RED, 2.0), RED);
    }

    #[test]
    fn test_half_factor_floors_channels() {
        // 255 + (130 - 255) * 0.5 = 192.5 -> 192, etc.
        assert_eq!(background_color(GREEN, 0.5), Rgb::new(192, 227, 142));
        assert_eq!(background_color(RED, 0.25), Rgb::new(251, 201, 228));
    }

    #[test]
    fn test_zero_factor_stays_white() {
        assert_eq!(background_color(GREEN, 0.0), WHITE);
    }

    #[test]
    fn test_small_factors_raised_to_minimum() {
        let at_minimum = background_color(GREEN, 0.1);
        assert_eq!(background_color(GREEN, 0.05), at_minimum);
        assert_eq!(background_color(GREEN, 0.0001), at_minimum);
        // Negative factors are nonzero and below the threshold too
        assert_eq!(background_color(GREEN, -0.5), at_minimum);
        assert_eq!(at_minimum, Rgb::new(242, 249, 232));
    }

    #[test]
    fn test_zero_guard_shade() {
        // Dark gray at 0.9 is the fixed shade for zero-valued bands
        assert_eq!(background_color(DARK_GRAY, 0.9), Rgb::new(169, 169, 169));
    }
}
