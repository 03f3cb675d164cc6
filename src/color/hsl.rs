/// Hue/saturation/lightness triple.
///
/// `hue` is in degrees `[0, 360)`; `saturation` and `lightness` are in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation in `[0, 1]`.
    pub saturation: f64,
    /// Lightness in `[0, 1]`.
    pub lightness: f64,
}

impl Hsl {
    /// Build a triple, wrapping hue into `[0, 360)` and clamping the rest into `[0, 1]`.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hue = if hue.is_finite() {
            // rem_euclid rounds tiny negatives up to exactly 360.
            let h = hue.rem_euclid(360.0);
            if h >= 360.0 { 0.0 } else { h }
        } else {
            0.0
        };
        Self {
            hue,
            saturation: unit(saturation),
            lightness: unit(lightness),
        }
    }

    /// Convert to RGB channels in `[0, 255]` using the six 60° hue sectors.
    pub fn to_rgb(self) -> [f64; 3] {
        let Self {
            hue,
            saturation,
            lightness,
        } = self;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let h = hue / 60.0;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let m = lightness - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [(r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0]
    }

    /// Inverse of [`Hsl::to_rgb`] for channels in `[0, 255]`. Gray inputs report hue 0.
    pub fn from_rgb(rgb: [f64; 3]) -> Self {
        let [r, g, b] = rgb.map(|v| unit(v / 255.0));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        let d = max - min;
        if d <= f64::EPSILON {
            return Self {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }
        let saturation = d / (1.0 - (2.0 * lightness - 1.0).abs());
        let hue = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };
        Self::new(hue, saturation, lightness)
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/color/hsl.rs"]
mod tests;
