use crate::foundation::core::Dims;
use crate::foundation::error::{LucentError, LucentResult};

/// Kernel radius covering three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Separable gaussian blur over a premultiplied RGBA8 buffer, returning a new buffer.
///
/// Edges clamp to the nearest in-bounds pixel.
pub fn blur_rgba8_premul(src: &[u8], dims: Dims, sigma: f32) -> LucentResult<Vec<u8>> {
    if src.len() != dims.byte_len() {
        return Err(LucentError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    let radius = radius_for_sigma(sigma);
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];

    horizontal_pass(src, &mut tmp, dims, &kernel);
    vertical_pass(&tmp, &mut out, dims, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> LucentResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(LucentError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(LucentError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push the rounding residue into the center tap so the kernel sums to exactly 1.0.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], dims: Dims, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(dims.width);
    for y in 0..i64::from(dims.height) {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], dims: Dims, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(dims.width);
    let h = i64::from(dims.height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
