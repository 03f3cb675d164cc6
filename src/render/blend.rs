use crate::foundation::error::{LucentError, LucentResult};
use crate::foundation::math::mul_div255_u8;

/// Blend mode used when a layer is composited onto the presentation surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// `s + d - s*d` per channel; brightens.
    Screen,
    /// Source hue and saturation with backdrop luminosity.
    Color,
}

/// Composite a premultiplied RGBA8 layer onto `dst` in place.
pub fn composite_over(dst: &mut [u8], src: &[u8], opacity: f32, blend: BlendMode) -> LucentResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(LucentError::render(
            "composite_over expects equal-length rgba8 buffers",
        ));
    }

    // Dispatch once per layer; each arm gets its own kernel instance.
    match blend {
        BlendMode::Normal => over_in_place_opacity(dst, src, opacity),
        BlendMode::Screen => composite_blend(dst, src, opacity, |s, d| {
            [0, 1, 2].map(|c| s[c] + d[c] - s[c] * d[c])
        }),
        BlendMode::Color => composite_blend(dst, src, opacity, |s, d| set_lum(s, lum(d))),
    }
    Ok(())
}

fn over_in_place_opacity(dst: &mut [u8], src: &[u8], opacity: f32) {
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 0 {
        return;
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);

        d[3] = sa.saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = sc.saturating_add(dc);
        }
    }
}

#[inline(always)]
fn composite_blend<F>(dst: &mut [u8], src: &[u8], opacity: f32, blend_fn: F)
where
    F: Fn([f32; 3], [f32; 3]) -> [f32; 3],
{
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        // Source-over with the blend applied to unpremultiplied colors:
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        let sa = f32::from(s[3]) / 255.0 * opacity;
        if sa <= 0.0 {
            continue;
        }
        let da = f32::from(d[3]) / 255.0;
        let sp = [0, 1, 2].map(|c| f32::from(s[c]) / 255.0 * opacity);
        let dp = [0, 1, 2].map(|c| f32::from(d[c]) / 255.0);

        let sc = sp.map(|v| (v / sa).clamp(0.0, 1.0));
        let dc = if da > 0.0 {
            dp.map(|v| (v / da).clamp(0.0, 1.0))
        } else {
            [0.0; 3]
        };

        let mixed = blend_fn(sc, dc).map(|v| v.clamp(0.0, 1.0));
        for c in 0..3 {
            let out = sp[c] * (1.0 - da) + dp[c] * (1.0 - sa) + mixed[c] * sa * da;
            d[c] = to_u8(out);
        }
        d[3] = to_u8(sa + da * (1.0 - sa));
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Luminosity with the compositing weights (0.3, 0.59, 0.11).
pub(crate) fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color(c.map(|v| v + d))
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n > f32::EPSILON {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 && x - l > f32::EPSILON {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
