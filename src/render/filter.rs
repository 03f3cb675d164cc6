use crate::foundation::core::Dims;
use crate::foundation::error::LucentResult;
use crate::render::blur::blur_rgba8_premul;

/// Filter applied to a layer before it is composited.
///
/// Amounts follow the canvas filter functions: `1.0` is the identity for the color filters,
/// and blur takes a standard deviation in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Scale chroma; `saturate(150%)` is `Saturate(1.5)`.
    Saturate(f32),
    /// Scale around mid-gray.
    Contrast(f32),
    /// Scale every color channel.
    Brightness(f32),
    /// Gaussian blur with the given standard deviation.
    Blur(f32),
}

impl Filter {
    /// Color matrix for the filter, or `None` for spatial filters.
    ///
    /// Row-major 4x5 over straight-alpha channels in `[0, 1]`.
    pub fn color_matrix(self) -> Option<[f32; 20]> {
        match self {
            Self::Saturate(s) => Some([
                0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s, 0.0, 0.0, //
                0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s, 0.0, 0.0, //
                0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0, //
            ]),
            Self::Contrast(c) => {
                let i = 0.5 - 0.5 * c;
                Some([
                    c, 0.0, 0.0, 0.0, i, //
                    0.0, c, 0.0, 0.0, i, //
                    0.0, 0.0, c, 0.0, i, //
                    0.0, 0.0, 0.0, 1.0, 0.0, //
                ])
            }
            Self::Brightness(b) => Some([
                b, 0.0, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, 0.0, 0.0, //
                0.0, 0.0, b, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0, //
            ]),
            Self::Blur(_) => None,
        }
    }
}

/// Apply `filters` left to right over a premultiplied RGBA8 buffer.
pub fn apply_filters(buf: &mut Vec<u8>, dims: Dims, filters: &[Filter]) -> LucentResult<()> {
    for &filter in filters {
        match filter {
            Filter::Blur(sigma) => *buf = blur_rgba8_premul(buf, dims, sigma)?,
            other => {
                if let Some(m) = other.color_matrix() {
                    color_matrix_rgba8_premul(buf, m);
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn color_matrix_rgba8_premul(buf: &mut [u8], m: [f32; 20]) {
    for px in buf.chunks_exact_mut(4) {
        let pa = f32::from(px[3]) / 255.0;
        let inv_a = if pa > 0.0 { 1.0 / pa } else { 0.0 };
        let r = f32::from(px[0]) / 255.0 * inv_a;
        let g = f32::from(px[1]) / 255.0 * inv_a;
        let b = f32::from(px[2]) / 255.0 * inv_a;
        let a = pa;

        let row = |o: usize| (m[o] * r + m[o + 1] * g + m[o + 2] * b + m[o + 3] * a + m[o + 4]).clamp(0.0, 1.0);
        let out_a = row(15);
        let out = [row(0), row(5), row(10)];

        for c in 0..3 {
            px[c] = ((out[c] * out_a) * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        px[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/filter.rs"]
mod tests;
