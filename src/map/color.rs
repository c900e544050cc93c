//! Continuous color mapping for GDP values.

use eframe::egui::Color32;

/// Light end of the scale, shared with the filtered-out fill.
pub const SCALE_START: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);

/// Power-law scale mapping `[0, max]` onto a two-color ramp.
///
/// The position of a value is `(value / max) ^ exponent`. With an exponent
/// below one, small values are spread out and large values compressed, so a
/// right-skewed distribution still shows visible differences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerScale {
    exponent: f64,
    max: f64,
    start: Color32,
    end: Color32,
}

impl PowerScale {
    pub fn new(exponent: f64, max: f64, start: Color32, end: Color32) -> Self {
        Self {
            exponent,
            max,
            start,
            end,
        }
    }

    #[cfg(test)]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of `value` along the ramp, in `[0, 1]`.
    pub fn position(&self, value: f64) -> f64 {
        if self.max <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        (value.max(0.0) / self.max).powf(self.exponent).min(1.0)
    }

    /// Color for `value`.
    pub fn color(&self, value: f64) -> Color32 {
        lerp_rgb(self.start, self.end, self.position(value))
    }
}

/// Linear interpolation of two colors in RGB space.
pub fn lerp_rgb(a: Color32, b: Color32, t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color32 = Color32::from_rgb(0x00, 0x7a, 0xff);

    #[test]
    fn test_endpoints() {
        let scale = PowerScale::new(0.4, 4000.0, SCALE_START, BLUE);
        assert_eq!(scale.color(0.0), SCALE_START);
        assert_eq!(scale.color(4000.0), BLUE);
        assert_eq!(scale.color(-10.0), SCALE_START);
        assert_eq!(scale.color(9000.0), BLUE);
    }

    #[test]
    fn test_power_curve_is_sublinear() {
        let scale = PowerScale::new(0.4, 1000.0, SCALE_START, BLUE);
        // 10% of the domain lands ~40% along the ramp
        let p = scale.position(100.0);
        assert!((p - 0.1f64.powf(0.4)).abs() < 1e-12);
        assert!(p > 0.39 && p < 0.40);
    }

    #[test]
    fn test_position_is_strictly_increasing() {
        let scale = PowerScale::new(0.4, 4080.0, SCALE_START, BLUE);
        let mut last = -1.0;
        for v in [0.0, 1.0, 42.0, 100.0, 450.0, 2400.0, 4079.0, 4080.0] {
            let p = scale.position(v);
            assert!(p > last, "{} -> {} not above {}", v, p, last);
            last = p;
        }
    }

    #[test]
    fn test_zero_max_maps_to_start() {
        let scale = PowerScale::new(0.4, 0.0, SCALE_START, BLUE);
        assert_eq!(scale.color(50.0), SCALE_START);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(to_hex(BLUE), "#007aff");
        assert_eq!(to_hex(SCALE_START), "#f3f4f6");
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp_rgb(Color32::BLACK, Color32::from_rgb(200, 100, 50), 0.5);
        assert_eq!(mid, Color32::from_rgb(100, 50, 25));
    }
}
