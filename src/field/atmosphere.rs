use crate::color::hsl::Hsl;
use crate::env::weather::{EnvBias, EnvFactor};
use crate::field::clock::WallClock;
use crate::foundation::core::{Dims, FrameTime};
use crate::modes::atmosphere::AtmosphereMode;
use std::f64::consts::PI;

/// One field sample: the base color plus the positional edge term used by the vignette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereSample {
    /// Base color before tone adjustments.
    pub hsl: Hsl,
    /// `sin(πx)·sin(πy)` over normalized coordinates, `[0, 1]`; peaks at the center.
    pub edge: f64,
}

/// Per-frame color field for the synthetic effect.
///
/// Built once per tick from a single environment snapshot; sampling never re-reads shared
/// state.
#[derive(Clone, Copy, Debug)]
pub struct AtmosphereField {
    mode: AtmosphereMode,
    amp: f64,
    t: f64,
    clock: WallClock,
    bias: EnvBias,
    dims: Dims,
}

impl AtmosphereField {
    /// Field for one frame.
    pub fn new(
        mode: AtmosphereMode,
        factor: f64,
        time: FrameTime,
        utc_offset_minutes: i32,
        env: &EnvFactor,
        dims: Dims,
    ) -> Self {
        let bias = env.bias();
        Self {
            mode,
            amp: 0.5 + factor,
            t: time.elapsed_ms / 1000.0 * bias.time_scale,
            clock: WallClock::from_unix_ms(time.wall_unix_ms, utc_offset_minutes),
            bias,
            dims,
        }
    }

    /// Calendar terms this field was built from.
    pub fn clock(&self) -> WallClock {
        self.clock
    }

    /// Field time in seconds after the wind bias.
    pub fn time_s(&self) -> f64 {
        self.t
    }

    /// Sample output pixel `(x, y)`.
    pub fn sample(&self, x: u32, y: u32) -> AtmosphereSample {
        let nx = f64::from(x) / f64::from(self.dims.width);
        let ny = f64::from(y) / f64::from(self.dims.height);
        let (t, amp) = (self.t, self.amp);
        let cfg = self.mode.config();
        let seasonal = self.clock.seasonal() * cfg.seasonal_hue;
        let daylight = self.clock.daylight();

        let (hue, sat, light) = match self.mode {
            AtmosphereMode::Dawn => (
                cfg.base_hue
                    + cfg.hue_sway * amp * (nx * 2.2 + t * 0.21).sin()
                    + 22.0 * ny
                    + 20.0 * daylight
                    + seasonal,
                cfg.saturation + cfg.saturation_sway * (ny * 2.4 + t * 0.13).cos(),
                cfg.lightness
                    + cfg.lightness_sway * (1.0 - ny) * (0.6 + 0.4 * daylight)
                    + 0.05 * amp * (t * 0.3 + nx * 4.0).sin(),
            ),
            AtmosphereMode::Storm => (
                cfg.base_hue
                    + cfg.hue_sway * amp * (nx * 9.7 + t * 1.3).sin() * (ny * 7.3 - t * 0.9).cos()
                    + 10.0 * amp * ((nx + ny) * 17.0 + t * 2.1).sin()
                    + seasonal,
                cfg.saturation + cfg.saturation_sway * (nx * 13.0 + t * 1.7).sin(),
                cfg.lightness
                    + cfg.lightness_sway * amp * (ny * 11.0 - t * 1.1).sin() * (nx * 5.0 + t * 0.7).cos()
                    + 0.08 * daylight,
            ),
            AtmosphereMode::Aurora => (
                cfg.base_hue
                    + cfg.hue_sway * amp * (nx * 1.8 + t * 0.11).sin()
                    + 40.0 * (ny * 1.3 - t * 0.07).cos()
                    + seasonal,
                cfg.saturation + cfg.saturation_sway * (t * 0.05 + ny * 2.0).sin(),
                cfg.lightness
                    + cfg.lightness_sway * (0.5 + 0.5 * (nx * 2.6 + t * 0.17).sin()) * (1.0 - ny)
                    + 0.04 * (1.0 - daylight),
            ),
        };

        AtmosphereSample {
            hsl: Hsl::new(
                hue + self.bias.hue_shift,
                sat * self.bias.saturation_mul,
                light * self.bias.lightness_mul,
            ),
            edge: (PI * nx).sin() * (PI * ny).sin(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/atmosphere.rs"]
mod tests;
