use crate::foundation::core::Dims;
use crate::foundation::math::{round_half_up, wrap};
use crate::modes::distortion::DistortionMode;

/// Per-frame displacement field for the camera effect.
///
/// Maps an output pixel to the source pixel it samples. Every result is wrapped into the
/// source grid, so [`DistortionField::source_offset`] is always a valid pixel start.
#[derive(Clone, Copy, Debug)]
pub struct DistortionField {
    mode: DistortionMode,
    factor: f64,
    time_ms: f64,
    dims: Dims,
}

impl DistortionField {
    /// Field for one frame. `factor` is the intensity rescaled into `[0, 1]`.
    pub fn new(mode: DistortionMode, factor: f64, time_ms: f64, dims: Dims) -> Self {
        Self {
            mode,
            factor,
            time_ms,
            dims,
        }
    }

    /// Source coordinate sampled by output pixel `(x, y)`.
    pub fn sample_coord(&self, x: u32, y: u32) -> (u32, u32) {
        let (fx, fy) = (f64::from(x), f64::from(y));
        let t = self.time_ms;
        let f = self.factor;

        let base = self.mode.config().displacement * f;
        let nx = (fy * 0.06 + t * 0.0014).sin();
        let ny = (fx * 0.05 + t * 0.0012).cos();

        let mut sx = i64::from(x) + round_half_up(nx * base * 0.9);
        let mut sy = i64::from(y) + round_half_up(ny * base * 0.9);

        match self.mode {
            DistortionMode::Prism => {}
            DistortionMode::Fracture => {
                sx += round_half_up((f64::from(x & 6) - 3.0) * f * 1.4);
                sy += round_half_up((f64::from(y & 4) - 2.0) * f * 1.8);
            }
            DistortionMode::Aurora => {
                sx += round_half_up(((fy + t * 0.12) * 0.09).sin() * 3.0 * f);
                sy += round_half_up(((fx + t * 0.15) * 0.07).cos() * 3.0 * f);
            }
        }

        (wrap(sx, self.dims.width), wrap(sy, self.dims.height))
    }

    /// Flat byte offset into the source buffer for output pixel `(x, y)`.
    pub fn source_offset(&self, x: u32, y: u32) -> usize {
        let (sx, sy) = self.sample_coord(x, y);
        ((sy as usize) * (self.dims.width as usize) + (sx as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/distortion.rs"]
mod tests;
