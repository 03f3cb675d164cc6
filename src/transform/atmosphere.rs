use crate::field::atmosphere::AtmosphereField;
use crate::foundation::core::FrameBuffer;
use crate::foundation::error::{LucentError, LucentResult};
use crate::foundation::math::{channel_u8, clamp_channel, lerp};
use rayon::prelude::*;

/// Mix ratio toward the freshly generated color within a tick.
pub const INTRA_FRAME_MIX: f64 = 0.8;
/// Mix ratio toward the previous tick's output.
pub const HISTORY_MIX: f64 = 0.88;

/// Additive vignette offset for one pixel.
///
/// `edge` is the field's positional term; the fade oscillates with field time.
pub fn vignette(edge: f64, time_s: f64) -> f64 {
    let fade = 0.6 + 0.4 * (time_s * 0.25).sin();
    (edge - 0.35) * 36.0 * fade
}

/// Full per-pixel pass for the synthetic effect.
///
/// Generates into `output`, smooths against `previous`, then copies the result into
/// `previous` for the next tick. Alpha is always opaque.
pub fn transform_atmosphere(
    field: &AtmosphereField,
    output: &mut FrameBuffer,
    previous: &mut FrameBuffer,
) -> LucentResult<()> {
    let dims = output.dims();
    if previous.dims() != dims {
        return Err(LucentError::render(format!(
            "previous frame is {}x{} but output is {}x{}",
            previous.width(),
            previous.height(),
            dims.width,
            dims.height
        )));
    }

    let row_len = dims.width as usize * 4;
    if row_len == 0 {
        return Ok(());
    }
    let time_s = field.time_s();
    output
        .as_bytes_mut()
        .par_chunks_exact_mut(row_len)
        .zip(previous.as_bytes().par_chunks_exact(row_len))
        .enumerate()
        .for_each(|(y, (row, prev_row))| {
            let y = y as u32;
            for (x, (px, prev)) in row
                .chunks_exact_mut(4)
                .zip(prev_row.chunks_exact(4))
                .enumerate()
            {
                let sample = field.sample(x as u32, y);
                let shade = vignette(sample.edge, time_s);
                let target = sample.hsl.to_rgb().map(|c| clamp_channel(c + shade));

                for c in 0..3 {
                    px[c] = channel_u8(target[c]);
                    let intra = lerp(f64::from(px[c]), target[c], INTRA_FRAME_MIX);
                    px[c] = channel_u8(lerp(intra, f64::from(prev[c]), HISTORY_MIX));
                }
                px[3] = 255;
            }
        });

    previous.copy_from(output)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/atmosphere.rs"]
mod tests;
