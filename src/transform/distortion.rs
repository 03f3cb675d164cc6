use crate::field::distortion::DistortionField;
use crate::foundation::core::{FrameBuffer, Intensity};
use crate::foundation::error::{LucentError, LucentResult};
use crate::foundation::math::clamp_channel;
use crate::modes::distortion::DistortionMode;
use rayon::prelude::*;

/// Global tone coefficients for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneParams {
    /// Contrast multiplier around 128.
    pub contrast: f64,
    /// Saturation multiplier around BT.601 luminance.
    pub saturation: f64,
    /// Posterization step; never below 2.
    pub levels: u32,
}

impl ToneParams {
    /// Coefficients for `mode` at `intensity`. Higher intensity means fewer, coarser levels.
    pub fn new(mode: DistortionMode, intensity: Intensity) -> Self {
        let cfg = mode.config();
        let f = intensity.factor();
        Self {
            contrast: cfg.contrast + (1.0 - f) * 0.45,
            saturation: cfg.saturation + f * 0.45,
            levels: ((18.0 - f * 10.0).floor() as u32).max(2),
        }
    }
}

/// ITU-R BT.601 luma.
pub fn luminance(rgb: [f64; 3]) -> f64 {
    0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2]
}

/// Scale chroma around luminance.
pub fn saturate(rgb: [f64; 3], amount: f64) -> [f64; 3] {
    let lum = luminance(rgb);
    rgb.map(|c| (c - lum) * amount + lum)
}

/// Scale around mid-gray and clamp.
pub fn contrast(rgb: [f64; 3], amount: f64) -> [f64; 3] {
    rgb.map(|c| clamp_channel((c - 128.0) * amount + 128.0))
}

/// Quantize down to a multiple of `levels`. Idempotent for a fixed level count.
pub fn posterize(v: f64, levels: u32) -> f64 {
    let step = f64::from(levels.max(2));
    (v / step).floor() * step
}

/// Apply the mode's color effect to one sampled pixel.
pub fn color_effect(
    mode: DistortionMode,
    rgb: [f64; 3],
    x: u32,
    y: u32,
    time_ms: f64,
    factor: f64,
) -> [f64; 3] {
    let [mut r, mut g, mut b] = rgb;
    match mode {
        DistortionMode::Prism => {
            let drift = ((f64::from(x) * 0.09 + time_ms * 0.001).sin() + 1.0) * 0.5 * factor * 65.0;
            r = clamp_channel(r + drift);
            g = clamp_channel(g - drift * 0.8);
            b = clamp_channel(b + drift * 0.75);
        }
        DistortionMode::Fracture => {
            let tick = (time_ms * 0.2).floor() as i64;
            let shard = (i64::from(x) + i64::from(y) + tick).rem_euclid(5);
            match shard {
                0 => std::mem::swap(&mut r, &mut g),
                2 => std::mem::swap(&mut g, &mut b),
                4 => r = clamp_channel(r + 40.0),
                _ => {}
            }
        }
        DistortionMode::Aurora => {
            let pulse =
                (time_ms * 0.0008 + f64::from(x + y) * 0.015).sin() * 70.0 * factor;
            b = clamp_channel(b + pulse + 20.0);
            g = clamp_channel(g + pulse * 0.35);
            r = clamp_channel(r * (0.75 + factor * 0.55));
        }
    }
    [r, g, b]
}

/// Full per-pixel pass for the camera effect.
///
/// `source` and `output` must share dimensions. A sample that falls outside the source reads
/// as black with opaque alpha, and a zero source alpha is written as opaque. Rows are processed
/// in parallel.
pub fn transform_distortion(
    source: &FrameBuffer,
    output: &mut FrameBuffer,
    mode: DistortionMode,
    intensity: Intensity,
    time_ms: f64,
) -> LucentResult<()> {
    let dims = source.dims();
    if output.dims() != dims {
        return Err(LucentError::render(format!(
            "transform_distortion expects matching buffers, got {}x{} -> {}x{}",
            dims.width,
            dims.height,
            output.width(),
            output.height()
        )));
    }

    let factor = intensity.factor();
    let tone = ToneParams::new(mode, intensity);
    let field = DistortionField::new(mode, factor, time_ms, dims);

    let row_len = dims.width as usize * 4;
    if row_len == 0 {
        return Ok(());
    }
    output
        .as_bytes_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let x = x as u32;
                let [sr, sg, sb, sa] = source
                    .pixel_at_offset(field.source_offset(x, y))
                    .unwrap_or([0, 0, 0, 255]);
                let rgb = [f64::from(sr), f64::from(sg), f64::from(sb)];

                let rgb = color_effect(mode, rgb, x, y, time_ms, factor);
                let rgb = contrast(saturate(rgb, tone.saturation), tone.contrast);
                let rgb = rgb.map(|c| posterize(c, tone.levels));

                px[0] = rgb[0] as u8;
                px[1] = rgb[1] as u8;
                px[2] = rgb[2] as u8;
                px[3] = if sa == 0 { 255 } else { sa };
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/distortion.rs"]
mod tests;
